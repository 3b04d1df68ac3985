//! Centralized error handling for datadoc.
//!
//! The pipeline has three failure modes of its own, each unrecoverable at the
//! pipeline level:
//!
//! - [`DatadocError::InvalidArgument`]: the zero-division policy string was not
//!   one of `nan`, `inf` or `raise`. Raised before any data is read.
//! - [`DatadocError::DivisionByZero`]: policy `raise` found a zero denominator.
//!   Carries every offending row so the caller does not have to re-run.
//! - [`DatadocError::SchemaViolation`]: a table broke its column contract.
//!   Carries the complete list of violations and the stage that caught them.
//!
//! The remaining variants wrap I/O, Polars and JSON failures coming from the
//! loading and reporting layers.
//!
//! ```
//! use datadoc::error::DatadocError;
//!
//! fn describe(err: &DatadocError) -> &'static str {
//!     match err {
//!         DatadocError::InvalidArgument(_) => "bad argument",
//!         DatadocError::DivisionByZero { .. } => "zero denominator",
//!         DatadocError::SchemaViolation { .. } => "contract broken",
//!         _ => "other",
//!     }
//! }
//! ```

use crate::pipeline::contract::{SchemaViolation, ValidationStage};
use std::fmt;

/// Main error type for datadoc operations.
#[derive(Debug)]
pub enum DatadocError {
    /// Unrecognized argument value, detected before any data is touched
    InvalidArgument(String),

    /// Zero denominator found under the `raise` policy
    DivisionByZero {
        /// Denominator column that was scanned
        column: String,
        /// Zero-based row indices holding an exact zero
        rows: Vec<usize>,
    },

    /// Table failed its column contract
    SchemaViolation {
        /// Whether the input or the produced output was rejected
        stage: ValidationStage,
        /// Every violation found, not just the first
        violations: Vec<SchemaViolation>,
    },

    /// I/O errors (file operations)
    Io(std::io::Error),

    /// Data processing errors (Polars, parsing, etc.)
    DataProcessing(String),

    /// Configuration and JSON errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for DatadocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::DivisionByZero { column, rows } => write!(
                f,
                "Division by zero: column '{column}' contains zero at rows {rows:?}"
            ),
            Self::SchemaViolation { stage, violations } => {
                write!(
                    f,
                    "{stage} schema validation failed with {} violation(s)",
                    violations.len()
                )?;
                for violation in violations {
                    write!(f, "\n  - {violation}")?;
                }
                Ok(())
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DatadocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatadocError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for DatadocError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for DatadocError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for DatadocError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl DatadocError {
    /// True for the post-transform contract failure, which signals a bug
    /// in the pipeline rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::SchemaViolation {
                stage: ValidationStage::Output,
                ..
            }
        )
    }
}

/// Result type alias for datadoc operations.
pub type Result<T> = std::result::Result<T, DatadocError>;
