//! Checks driven by caller-supplied predicates.
//!
//! A predicate maps the table to one [`ColumnMask`] per column it inspects,
//! marking the cells that *satisfy* it.

use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::{ColumnMask, Violation, ViolationMask};
use crate::prelude::*;
use crate::table::Table;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A predicate evaluated against a whole table.
pub type Predicate = Arc<dyn Fn(&dyn Table) -> Result<Vec<ColumnMask>> + Send + Sync>;

/// Asserts that every cell inspected by a predicate satisfies it.
///
/// All failing cells are reported at once; null mask slots count as failing.
#[derive(Clone)]
pub struct VerifyAll {
    description: String,
    predicate: Predicate,
}

impl VerifyAll {
    /// Creates the check.
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&dyn Table) -> Result<Vec<ColumnMask>> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for VerifyAll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyAll")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Check for VerifyAll {
    fn kind(&self) -> CheckKind {
        CheckKind::VerifyAll
    }

    #[instrument(skip(self, table), fields(check = "verify_all", description = %self.description))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        let passing = (self.predicate)(table)?;
        let failing = ViolationMask::from_passing(table.num_rows(), passing)?;
        if !failing.any() {
            return Ok(());
        }
        debug!(failing = failing.count(), "Predicate failed");
        Err(GuardError::validation_failed(
            self.kind(),
            failing.into_violation(table.index())?,
        ))
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::new().with_description(self.description.clone())
    }
}

/// Asserts that at least one cell inspected by a predicate satisfies it.
#[derive(Clone)]
pub struct VerifyAny {
    description: String,
    predicate: Predicate,
}

impl VerifyAny {
    /// Creates the check.
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&dyn Table) -> Result<Vec<ColumnMask>> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for VerifyAny {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyAny")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Check for VerifyAny {
    fn kind(&self) -> CheckKind {
        CheckKind::VerifyAny
    }

    #[instrument(skip(self, table), fields(check = "verify_any", description = %self.description))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        let passing = ViolationMask::new(table.num_rows(), (self.predicate)(table)?)?;
        if passing.any() {
            return Ok(());
        }
        Err(GuardError::validation_failed(
            self.kind(),
            Violation::Summary(format!("no cell satisfies '{}'", self.description)),
        ))
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::new().with_description(self.description.clone())
    }
}

/// Asserts that every cell marked by `predicate` passes.
pub fn verify_all<'a, T, F>(table: &'a T, description: &str, predicate: F) -> Result<&'a T>
where
    T: Table,
    F: Fn(&dyn Table) -> Result<Vec<ColumnMask>> + Send + Sync + 'static,
{
    VerifyAll::new(description, predicate).validate(table)
}

/// Asserts that at least one cell marked by `predicate` passes.
pub fn verify_any<'a, T, F>(table: &'a T, description: &str, predicate: F) -> Result<&'a T>
where
    T: Table,
    F: Fn(&dyn Table) -> Result<Vec<ColumnMask>> + Send + Sync + 'static,
{
    VerifyAny::new(description, predicate).validate(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::CellLocation;
    use crate::table::Value;
    use crate::test_fixtures::{grades_frame, int_frame};

    fn positive(table: &dyn Table) -> Result<Vec<ColumnMask>> {
        table
            .column_names()
            .into_iter()
            .map(|name| {
                let values = Value::collect(table.column(name)?.as_ref())?;
                Ok(ColumnMask::from_fn(name, values.len(), |row| {
                    values[row].as_f64().is_some_and(|v| v > 0.0)
                }))
            })
            .collect()
    }

    #[test]
    fn test_verify_all() {
        let frame = int_frame(&[("a", vec![Some(1), Some(2)]), ("b", vec![Some(3), Some(4)])]);
        let checked = verify_all(&frame, "positive", positive).unwrap();
        assert!(std::ptr::eq(checked, &frame));

        let frame = int_frame(&[("a", vec![Some(1), Some(-2)]), ("b", vec![None, Some(4)])]);
        let err = verify_all(&frame, "positive", positive).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&Violation::Locations(vec![
                CellLocation::new(0, "b"),
                CellLocation::new(1, "a"),
            ]))
        );
    }

    #[test]
    fn test_verify_any() {
        let frame = int_frame(&[("a", vec![Some(-1), Some(2)])]);
        assert!(verify_any(&frame, "positive", positive).is_ok());

        let frame = int_frame(&[("a", vec![Some(-1), Some(0)])]);
        let err = verify_any(&frame, "positive", positive).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&Violation::Summary("no cell satisfies 'positive'".to_string()))
        );
    }

    #[test]
    fn test_predicate_errors_propagate() {
        let frame = grades_frame();
        let err = verify_all(&frame, "bad column", |table: &dyn Table| {
            table.column("nope")?;
            Ok(vec![])
        })
        .unwrap_err();
        assert!(matches!(err, GuardError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_misaligned_predicate_masks_are_rejected() {
        let frame = grades_frame();
        let err = VerifyAll::new("short", |_: &dyn Table| {
            Ok(vec![ColumnMask::from_fn("grade", 1, |_| true)])
        })
        .evaluate(&frame)
        .unwrap_err();
        assert!(matches!(err, GuardError::Misaligned { .. }));
    }
}
