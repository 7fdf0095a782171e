//! Error types and result alias for the crate.
//!
//! Strokes never fail; degenerate input turns them into no-ops. This error type covers
//! configuration validation and registry mutation only.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("brush category '{name}' already exists")]
    DuplicateCategory { name: String },

    #[error("unknown brush category '{name}'")]
    UnknownCategory { name: String },
}
