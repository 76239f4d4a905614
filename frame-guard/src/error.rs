//! Error types for frame-guard.
//!
//! Every check returns [`Result`]. A broken invariant surfaces as
//! [`GuardError::ValidationFailed`] carrying a typed [`Violation`] payload;
//! all other variants describe problems with the inputs themselves (unknown
//! columns, incompatible types, misaligned masks) and are never produced by a
//! table that merely contains bad data.

use crate::core::CheckKind;
use crate::locator::Violation;
use thiserror::Error;

/// The main error type for frame-guard.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A check found data that violates its invariant.
    #[error("{check} failed: {violation}")]
    ValidationFailed {
        /// The kind of check that failed
        check: CheckKind,
        /// Where or how the invariant was violated
        violation: Violation,
    },

    /// A column named by a check does not exist in the table.
    #[error("Column '{column}' not found in table")]
    ColumnNotFound { column: String },

    /// Values of incompatible kinds were compared, or a numeric check met a
    /// non-numeric column.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Two aligned structures (columns, index, masks) differ in length.
    #[error("Length mismatch: expected {expected} rows, found {found}")]
    Misaligned { expected: usize, found: usize },

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// The operation is not supported for the given input.
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Invalid check or suite configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, GuardError>`.
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a validation failure for `check` with the given payload.
    pub fn validation_failed(check: CheckKind, violation: Violation) -> Self {
        Self::ValidationFailed { check, violation }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Returns true if this error is a failed invariant rather than bad input.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. })
    }

    /// Returns the violation payload of a validation failure.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::ValidationFailed { violation, .. } => Some(violation),
            _ => None,
        }
    }

    /// Returns the kind of check that failed.
    pub fn check_kind(&self) -> Option<CheckKind> {
        match self {
            Self::ValidationFailed { check, .. } => Some(*check),
            _ => None,
        }
    }
}

/// Extension trait for adding context to errors.
///
/// Validation failures pass through untouched so their payload survives;
/// every other error is folded into [`GuardError::Internal`] with the context
/// prepended.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<GuardError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            failure @ GuardError::ValidationFailed { .. } => failure,
            GuardError::Internal(inner) => GuardError::Internal(format!("{}: {}", f(), inner)),
            other => GuardError::Internal(format!("{}: {}", f(), other)),
        })
    }
}
