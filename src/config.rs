use crate::error::{DbError, Result};
use crate::record::{FieldLimits, DEFAULT_CONTACT_MAX_LEN, DEFAULT_NAME_MAX_LEN};
use serde::{Deserialize, Serialize};

/// Log levels accepted by `log_level`.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration for the profile database tool.
///
/// This structure holds the settings the interactive shell and the
/// benchmark run with. Use the builder pattern methods to customize settings.
///
/// # Example
///
/// ```
/// use profiledb::Config;
///
/// let config = Config::new()
///     .with_name_max_len(64)
///     .with_verify_after_mutation(true);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum profile name length in characters (default: 99).
    ///
    /// Valid range: 1 - 1024.
    pub name_max_len: usize,

    /// Maximum contact length in characters (default: 14).
    ///
    /// Valid range: 1 - 256.
    pub contact_max_len: usize,

    /// Run a full structural check of the index after every insert and
    /// delete (default: false).
    ///
    /// Costs O(n) per mutation; meant for debugging.
    pub verify_after_mutation: bool,

    /// Log filter used when `RUST_LOG` is not set (default: "warn").
    pub log_level: String,
}

impl Config {
    /// Creates a new configuration with default values.
    ///
    /// # Default Values
    ///
    /// - Name limit: 99 characters
    /// - Contact limit: 14 characters
    /// - Verify after mutation: disabled
    /// - Log level: warn
    pub fn new() -> Self {
        Self {
            name_max_len: DEFAULT_NAME_MAX_LEN,
            contact_max_len: DEFAULT_CONTACT_MAX_LEN,
            verify_after_mutation: false,
            log_level: "warn".to_string(),
        }
    }

    /// Validates the configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any parameter is invalid:
    /// - Name limit < 1 or > 1024
    /// - Contact limit < 1 or > 256
    /// - Unknown log level
    pub fn validate(&self) -> Result<()> {
        if self.name_max_len < 1 {
            return Err(DbError::ConfigError(
                "name_max_len must be at least 1".to_string()
            ));
        }
        if self.name_max_len > 1024 {
            return Err(DbError::ConfigError(
                "name_max_len cannot exceed 1024".to_string()
            ));
        }

        if self.contact_max_len < 1 {
            return Err(DbError::ConfigError(
                "contact_max_len must be at least 1".to_string()
            ));
        }
        if self.contact_max_len > 256 {
            return Err(DbError::ConfigError(
                "contact_max_len cannot exceed 256".to_string()
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(DbError::ConfigError(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join("|"),
                self.log_level
            )));
        }

        Ok(())
    }

    /// Field bounds the shell enforces before inserting
    pub fn field_limits(&self) -> FieldLimits {
        FieldLimits {
            name_max_len: self.name_max_len,
            contact_max_len: self.contact_max_len,
        }
    }

    /// Set name length limit
    pub fn with_name_max_len(mut self, len: usize) -> Self {
        self.name_max_len = len;
        self
    }

    /// Set contact length limit
    pub fn with_contact_max_len(mut self, len: usize) -> Self {
        self.contact_max_len = len;
        self
    }

    /// Enable structural checks after each mutation
    pub fn with_verify_after_mutation(mut self, enable: bool) -> Self {
        self.verify_after_mutation = enable;
        self
    }

    /// Set fallback log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
