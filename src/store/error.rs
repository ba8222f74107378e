//! Store error types
//!
//! Defines all errors that can occur in the persistence layer.

use thiserror::Error;

/// Errors that can occur in the key-value store and settings layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Setting name is not one of the known settings
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    /// Value is outside the setting's allowed domain
    #[error("Invalid value {value:?} for setting {setting}")]
    InvalidValue { setting: String, value: String },

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::UnknownSetting("colour".to_string());
        assert_eq!(err.to_string(), "Unknown setting: colour");

        let err = StoreError::InvalidValue {
            setting: "theme".to_string(),
            value: "neon".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value \"neon\" for setting theme");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }
}
