use serde::{Deserialize, Serialize};

/// Surrogate identifier for a name-ownership token.
///
/// Ids are allocated in strictly increasing order and never reused.
/// `TokenId::NONE` (zero) means "never registered" and is never minted.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl TokenId {
    pub const NONE: TokenId = TokenId(0);

    /// The first id handed out by a fresh registry.
    pub const FIRST: TokenId = TokenId(1);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// The id after this one, or `None` once the id space is spent.
    pub fn next(&self) -> Option<TokenId> {
        self.0.checked_add(1).map(TokenId)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Amount in minor currency units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn minor(&self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_sentinel() {
        assert!(TokenId::NONE.is_none());
        assert!(!TokenId::FIRST.is_none());
        assert_eq!(TokenId::NONE.next(), Some(TokenId::FIRST));
    }

    #[test]
    fn token_ids_run_out_instead_of_wrapping() {
        assert_eq!(TokenId(u64::MAX - 1).next(), Some(TokenId(u64::MAX)));
        assert_eq!(TokenId(u64::MAX).next(), None);
    }

    #[test]
    fn amount_arithmetic_is_checked() {
        assert_eq!(Amount(5).checked_sub(Amount(7)), None);
        assert_eq!(Amount(5).checked_add(Amount(7)), Some(Amount(12)));
        assert_eq!(Amount(u64::MAX).checked_add(Amount(1)), None);
    }
}
