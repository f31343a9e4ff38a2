//! Custom error types for Kantong
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Kantong operations
#[derive(Error, Debug)]
pub enum KantongError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A record line that could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation errors for user input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} tidak ditemukan: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} sudah ada: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A budget category still referenced by transactions
    #[error("Pos '{name}' tidak bisa dihapus karena masih ada {count} transaksi")]
    InUse { name: String, count: u32 },

    /// A configured collection limit was reached
    #[error("Jumlah {entity_type} sudah mencapai batas (maks {limit})")]
    CapacityExceeded {
        entity_type: &'static str,
        limit: usize,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl KantongError {
    /// Create a "not found" error for budget categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Pos anggaran",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaksi",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Message suitable for a status line or form error
    ///
    /// Validation messages are shown without the "Validation error" prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for KantongError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KantongError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for KantongError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for Kantong operations
pub type KantongResult<T> = Result<T, KantongError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KantongError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = KantongError::transaction_not_found("T0042");
        assert_eq!(err.to_string(), "Transaksi tidak ditemukan: T0042");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_in_use_error() {
        let err = KantongError::InUse {
            name: "Makan".into(),
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Pos 'Makan' tidak bisa dihapus karena masih ada 3 transaksi"
        );
    }

    #[test]
    fn test_user_message_strips_validation_prefix() {
        let err = KantongError::Validation("Tanggal tidak valid".into());
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Tanggal tidak valid");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KantongError = io_err.into();
        assert!(matches!(err, KantongError::Io(_)));
    }
}
