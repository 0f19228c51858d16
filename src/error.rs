//! Error types for profiledb.
//!
//! This module defines all error types that can occur while operating on
//! the profile index or the surrounding command-line tool.

use crate::record::ProfileId;
use thiserror::Error;

/// Result type alias for profiledb operations.
///
/// This is a convenience alias for `Result<T, DbError>`.
pub type Result<T> = std::result::Result<T, DbError>;

/// Error types for index and shell operations.
///
/// A missing key is not represented here: searches and deletes of an
/// absent id are well-defined outcomes and surface as `None`.
#[derive(Error, Debug)]
pub enum DbError {
    /// I/O error while talking to the terminal or a config file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Insert was called with an id that is already present.
    ///
    /// The index is left unchanged and the existing record is kept.
    #[error("Profile with ID {id} already exists")]
    DuplicateKey {
        /// The rejected id
        id: ProfileId,
    },

    /// A field entered at the shell failed validation.
    ///
    /// The index itself never produces this error; it trusts its inputs.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// Human readable explanation
        reason: String,
    },

    /// The tree failed a structural self-check.
    ///
    /// Only produced by `BalancedIndex::verify`; seeing it means a bug.
    #[error("Index invariant violated: {0}")]
    InvariantViolation(String),

    /// Configuration validation failed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Latency histogram could not be created.
    #[error("Metrics error: {0}")]
    MetricsError(String),

    /// JSON parsing or serialization failed.
    ///
    /// This error occurs when reading or writing configuration files.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
