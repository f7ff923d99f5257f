//! Error types for rehabtrack.
//!
//! This module defines all error types used throughout the rehabtrack crate.
//! Form and table errors are recovered at the dispatcher boundary; the rest
//! surface to the binary entry point.

use thiserror::Error;

/// The main error type for rehabtrack operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Store Errors ===
    /// An operation named a table that does not exist, or handed a table a
    /// record of the wrong kind.
    #[error("invalid table: {table}")]
    InvalidTable {
        /// The offending table identifier.
        table: String,
    },

    // === Form Errors ===
    /// A submitted field could not be coerced to its declared type.
    #[error("field '{field}' expects {expected}, got {value:?}")]
    FieldCoercion {
        /// Name of the form field.
        field: &'static str,
        /// The raw value that was submitted.
        value: String,
        /// Human-readable description of the accepted values.
        expected: &'static str,
    },

    /// A submission was sent to a page that has no form.
    #[error("page '{page}' does not accept submissions")]
    NoForm {
        /// Slug of the page.
        page: &'static str,
    },

    /// Navigation named a page that does not exist.
    #[error("unknown page: {slug}")]
    UnknownPage {
        /// The slug that was requested.
        slug: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Socket or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rehabtrack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid table error.
    #[must_use]
    pub fn invalid_table(table: impl Into<String>) -> Self {
        Self::InvalidTable {
            table: table.into(),
        }
    }

    /// Create a field coercion error.
    #[must_use]
    pub fn coercion(field: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::FieldCoercion {
            field,
            value: value.into(),
            expected,
        }
    }

    /// Check if this error was caused by user input rather than wiring.
    ///
    /// Input errors are reported back to the user, who may resubmit.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::FieldCoercion { .. })
    }

    /// Check if this error means the requested table or page does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InvalidTable { .. } | Self::UnknownPage { .. })
    }
}
