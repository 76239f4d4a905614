//! Data type check.

use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::Violation;
use crate::prelude::*;
use crate::table::Table;
use arrow::datatypes::DataType;
use tracing::instrument;

/// Asserts that each listed column has the expected Arrow data type.
///
/// Columns are compared in the order given and the first mismatch fails.
#[derive(Debug, Clone, Default)]
pub struct HasDtypes {
    items: Vec<(String, DataType)>,
}

impl HasDtypes {
    /// Creates a dtype check from `(column, data type)` pairs.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, DataType)>,
        S: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .map(|(column, dtype)| (column.into(), dtype))
                .collect(),
        }
    }

    /// Adds a column and its expected type.
    pub fn column(mut self, column: impl Into<String>, dtype: DataType) -> Self {
        self.items.push((column.into(), dtype));
        self
    }
}

impl Check for HasDtypes {
    fn kind(&self) -> CheckKind {
        CheckKind::HasDtypes
    }

    #[instrument(skip(self, table), fields(check = "has_dtypes", columns = self.items.len()))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        for (column, expected) in &self.items {
            let actual = table.dtype(column)?;
            if actual != expected {
                return Err(GuardError::validation_failed(
                    self.kind(),
                    Violation::Summary(format!(
                        "column '{column}' has the wrong dtype (expected {expected}, found {actual})"
                    )),
                ));
            }
        }
        Ok(())
    }

    fn metadata(&self) -> CheckMetadata {
        self.items.iter().fold(
            CheckMetadata::for_columns(self.items.iter().map(|(column, _)| column.clone()))
                .with_description("Checks column data types"),
            |metadata, (column, dtype)| metadata.with_custom(column.clone(), dtype.to_string()),
        )
    }
}

/// Asserts that each column in `items` has its expected data type.
pub fn has_dtypes<'t, T: Table>(table: &'t T, items: &[(&str, DataType)]) -> Result<&'t T> {
    HasDtypes::new(items.iter().cloned()).validate(table)
}
