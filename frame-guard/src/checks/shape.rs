//! Shape check.

use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::Violation;
use crate::prelude::*;
use crate::table::Table;
use tracing::instrument;

/// Asserts that the table has exactly `(rows, columns)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsShape {
    shape: (usize, usize),
}

impl IsShape {
    /// Creates a shape check.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            shape: (rows, columns),
        }
    }
}

impl Check for IsShape {
    fn kind(&self) -> CheckKind {
        CheckKind::IsShape
    }

    #[instrument(skip(self, table), fields(check = "is_shape", expected = ?self.shape))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        let actual = table.shape();
        if actual == self.shape {
            return Ok(());
        }
        Err(GuardError::validation_failed(
            self.kind(),
            Violation::Summary(format!(
                "expected shape {:?}, actual shape {:?}",
                self.shape, actual
            )),
        ))
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::new()
            .with_description("Checks the number of rows and columns")
            .with_custom("rows", self.shape.0.to_string())
            .with_custom("columns", self.shape.1.to_string())
    }
}

/// Asserts that the table has exactly `shape = (rows, columns)`.
pub fn is_shape<T: Table>(table: &T, shape: (usize, usize)) -> Result<&T> {
    IsShape::new(shape.0, shape.1).validate(table)
}
