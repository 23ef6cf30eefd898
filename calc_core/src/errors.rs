//! # Error Types
//!
//! Structured error types for calc_core. An invalid form value is an
//! ordinary state of the form, not a failure, so most of these errors are
//! reported back to the UI layer, logged, and then dropped. None of them
//! is fatal.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn require_bolts(bolts: f64) -> CalcResult<()> {
//!     if bolts <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "flange-bolts".to_string(),
//!             value: bolts.to_string(),
//!             reason: "Value must be greater than zero".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A field value is empty, non-numeric, non-finite or not positive
    #[error("Invalid input for '{field}': {value:?} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field the calculation reads is not present in the form
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A field identifier that does not name any known input
    #[error("Unknown field: {id}")]
    UnknownField { id: String },

    /// A section identifier that does not name any known section
    #[error("Section not found: {id}")]
    UnknownSection { id: String },

    /// A calculation name that does not name any known calculation
    #[error("Unknown calculation: {name}")]
    UnknownCalculation { name: String },

    /// Fetching an asset for the offline cache failed
    #[error("Fetch failed for '{path}': {reason}")]
    FetchFailed { path: String, reason: String },

    /// Clipboard write was rejected
    #[error("Clipboard unavailable: {reason}")]
    ClipboardUnavailable { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownField error
    pub fn unknown_field(id: impl Into<String>) -> Self {
        CalcError::UnknownField { id: id.into() }
    }

    /// Create an UnknownSection error
    pub fn unknown_section(id: impl Into<String>) -> Self {
        CalcError::UnknownSection { id: id.into() }
    }

    /// Create an UnknownCalculation error
    pub fn unknown_calculation(name: impl Into<String>) -> Self {
        CalcError::UnknownCalculation { name: name.into() }
    }

    /// Create a FetchFailed error
    pub fn fetch_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FetchFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by a malformed page or a bad lookup rather
    /// than by the user's input.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            CalcError::MissingField { .. }
                | CalcError::UnknownField { .. }
                | CalcError::UnknownSection { .. }
                | CalcError::UnknownCalculation { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownField { .. } => "UNKNOWN_FIELD",
            CalcError::UnknownSection { .. } => "UNKNOWN_SECTION",
            CalcError::UnknownCalculation { .. } => "UNKNOWN_CALCULATION",
            CalcError::FetchFailed { .. } => "FETCH_FAILED",
            CalcError::ClipboardUnavailable { .. } => "CLIPBOARD_UNAVAILABLE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("teeth-module", "-4", "Value must be greater than zero");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("pcd-bolts").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::unknown_section("settings").error_code(), "UNKNOWN_SECTION");
        assert_eq!(CalcError::fetch_failed("/app.js", "404").error_code(), "FETCH_FAILED");
    }

    #[test]
    fn test_lookup_failures() {
        assert!(CalcError::unknown_section("x").is_lookup_failure());
        assert!(CalcError::missing_field("x").is_lookup_failure());
        assert!(!CalcError::invalid_input("x", "", "empty").is_lookup_failure());
    }

    #[test]
    fn test_display_messages() {
        let error = CalcError::unknown_section("settings");
        assert_eq!(error.to_string(), "Section not found: settings");
    }
}
