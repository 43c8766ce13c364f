//! Name syntax validation and canonical hashing.
//!
//! A valid name is 3 to 32 bytes drawn from `a-z`, `0-9` and `-`, and neither
//! starts nor ends with a hyphen. Interior hyphens, consecutive ones included,
//! are allowed. Checks run in that order: length, leading hyphen, trailing
//! hyphen, then per-byte charset.

use soul_types::NameHash;

use crate::error::NameError;

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 32;

/// Validate `name` and return its storage key.
pub fn validate(name: &str) -> Result<NameHash, NameError> {
    let bytes = name.as_bytes();
    let len = bytes.len();

    if len < MIN_NAME_LEN {
        return Err(NameError::TooShort {
            len,
            min: MIN_NAME_LEN,
        });
    }
    if len > MAX_NAME_LEN {
        return Err(NameError::TooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    if bytes[0] == b'-' {
        return Err(NameError::LeadingHyphen);
    }
    if bytes[len - 1] == b'-' {
        return Err(NameError::TrailingHyphen);
    }
    if let Some(position) = bytes.iter().position(|b| !is_name_byte(*b)) {
        return Err(NameError::InvalidCharacter {
            byte: bytes[position],
            position,
        });
    }

    Ok(NameHash::of(name))
}

/// True when `name` passes [`validate`].
pub fn is_valid(name: &str) -> bool {
    validate(name).is_ok()
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'
}
