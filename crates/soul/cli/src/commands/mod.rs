//! CLI command implementations

pub mod admin;
pub mod audit;
pub mod names;
pub mod tokens;
