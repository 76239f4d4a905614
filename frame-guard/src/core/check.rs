//! The `Check` trait and related types.

use crate::prelude::*;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Debug};

/// The kind of invariant a check enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// No null or NaN cells
    NoneMissing,
    /// Columns are ordered
    IsMonotonic,
    /// Exact `(rows, columns)` shape
    IsShape,
    /// Row identifiers occur once
    UniqueIndex,
    /// Values within each column occur once
    Unique,
    /// Values belong to an allowed set
    WithinSet,
    /// Values lie within inclusive bounds
    WithinRange,
    /// Values lie within `n` standard deviations of the column mean
    WithinNStd,
    /// Columns have the expected data types
    HasDtypes,
    /// Every cell satisfies a caller predicate
    VerifyAll,
    /// At least one cell satisfies a caller predicate
    VerifyAny,
}

impl CheckKind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::NoneMissing => "none_missing",
            CheckKind::IsMonotonic => "is_monotonic",
            CheckKind::IsShape => "is_shape",
            CheckKind::UniqueIndex => "unique_index",
            CheckKind::Unique => "unique",
            CheckKind::WithinSet => "within_set",
            CheckKind::WithinRange => "within_range",
            CheckKind::WithinNStd => "within_n_std",
            CheckKind::HasDtypes => "has_dtypes",
            CheckKind::VerifyAll => "verify_all",
            CheckKind::VerifyAny => "verify_any",
        }
    }

    /// Returns true for checks that report every violating cell of the table
    /// at once instead of stopping at the first offending column.
    pub fn reports_whole_table(&self) -> bool {
        matches!(
            self,
            CheckKind::NoneMissing | CheckKind::WithinNStd | CheckKind::VerifyAll
        )
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata describing a check, for logging and reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckMetadata {
    /// The column(s) this check operates on; empty means the whole table
    pub columns: Vec<String>,
    /// A human-readable description of what this check validates
    pub description: Option<String>,
    /// Additional key-value pairs for custom metadata
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, String>,
}

impl CheckMetadata {
    /// Creates a new metadata instance with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata for a multi-column check.
    pub fn for_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            description: None,
            custom: HashMap::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a custom metadata entry.
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }
}

/// An invariant that can be evaluated against a table.
///
/// Implementations are stateless and reusable: evaluating never mutates the
/// table, and the same check can run against any number of tables.
///
/// # Examples
///
/// ```rust
/// use frame_guard::core::{Check, CheckKind};
/// use frame_guard::locator::Violation;
/// use frame_guard::prelude::*;
/// use frame_guard::table::Table;
///
/// #[derive(Debug)]
/// struct NotEmpty;
///
/// impl Check for NotEmpty {
///     fn kind(&self) -> CheckKind {
///         CheckKind::IsShape
///     }
///
///     fn evaluate(&self, table: &dyn Table) -> Result<()> {
///         if table.num_rows() == 0 {
///             return Err(GuardError::validation_failed(
///                 self.kind(),
///                 Violation::Summary("table has no rows".to_string()),
///             ));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Check: Debug + Send + Sync {
    /// Returns the kind of invariant enforced.
    fn kind(&self) -> CheckKind;

    /// Evaluates the check.
    ///
    /// Returns `Ok(())` when the invariant holds and
    /// [`GuardError::ValidationFailed`] when it does not. Any other error
    /// means the check could not be evaluated against this table.
    fn evaluate(&self, table: &dyn Table) -> Result<()>;

    /// Returns the name of the check.
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Returns metadata about the check.
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::new()
    }

    /// Evaluates the check and hands back the very table it was given.
    fn validate<'t, T: Table>(&self, table: &'t T) -> Result<&'t T>
    where
        Self: Sized,
    {
        self.evaluate(table)?;
        Ok(table)
    }
}
