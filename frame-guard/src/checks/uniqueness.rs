//! Uniqueness checks for the row index and for column values.

use super::{owned_columns, selected_columns};
use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::{ColumnMask, Violation};
use crate::prelude::*;
use crate::table::{Table, Value};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Asserts that every row identifier occurs exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueIndex;

impl Check for UniqueIndex {
    fn kind(&self) -> CheckKind {
        CheckKind::UniqueIndex
    }

    #[instrument(skip(self, table), fields(check = "unique_index", rows = table.num_rows()))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        let duplicates = table.index().duplicates();
        if duplicates.is_empty() {
            return Ok(());
        }
        debug!(duplicates = duplicates.len(), "Index has duplicate labels");
        Err(GuardError::validation_failed(
            self.kind(),
            Violation::Duplicates(duplicates),
        ))
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::new().with_description("Checks that row identifiers are unique")
    }
}

/// Asserts that the row index holds no duplicate identifiers.
pub fn unique_index<T: Table>(table: &T) -> Result<&T> {
    UniqueIndex.validate(table)
}

/// Hashable identity of a cell value within one column.
#[derive(Debug, PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Null,
    Boolean(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
    Utf8(&'a str),
}

impl<'a> From<&'a Value> for ValueKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => ValueKey::Null,
            Value::Boolean(v) => ValueKey::Boolean(*v),
            Value::Int(v) => ValueKey::Int(*v),
            Value::UInt(v) => ValueKey::UInt(*v),
            // -0.0 == 0.0, and every NaN is treated as the same missing value
            Value::Float(v) if v.is_nan() => ValueKey::Null,
            Value::Float(v) if *v == 0.0 => ValueKey::Float(0.0f64.to_bits()),
            Value::Float(v) => ValueKey::Float(v.to_bits()),
            Value::Utf8(v) => ValueKey::Utf8(v),
        }
    }
}

/// Asserts that values within each selected column are unique.
///
/// Missing values count as equal to each other. The first column holding a
/// repeat fails with every repeated occurrence after the first.
#[derive(Debug, Clone, Default)]
pub struct Unique {
    columns: Option<Vec<String>>,
}

impl Unique {
    /// Checks every column of the table.
    pub fn all() -> Self {
        Self::default()
    }

    /// Checks only the given columns.
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: Some(columns.into_iter().map(Into::into).collect()),
        }
    }
}

impl Check for Unique {
    fn kind(&self) -> CheckKind {
        CheckKind::Unique
    }

    #[instrument(skip(self, table), fields(check = "unique", columns = ?self.columns))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        for column in selected_columns(table, self.columns.as_deref())? {
            let array = table.column(&column)?;
            let values = Value::collect(array.as_ref())?;

            let mut seen = HashSet::with_capacity(values.len());
            let repeats: Vec<bool> = values
                .iter()
                .map(|value| !seen.insert(ValueKey::from(value)))
                .collect();
            let mask = ColumnMask::from_fn(column.as_str(), repeats.len(), |row| repeats[row]);
            if mask.any() {
                debug!(column = %column, repeats = mask.count(), "Column has repeated values");
                return Err(GuardError::validation_failed(
                    self.kind(),
                    Violation::Series(mask.locate_series(table.index(), Some(array.as_ref()))?),
                ));
            }
        }
        Ok(())
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::for_columns(self.columns.clone().unwrap_or_default())
            .with_description("Checks that values within each column are unique")
    }
}

/// Asserts that values within each of `columns` (all columns when `None`)
/// are unique.
pub fn unique<'t, T: Table>(table: &'t T, columns: Option<&[&str]>) -> Result<&'t T> {
    Unique {
        columns: owned_columns(columns),
    }
    .validate(table)
}
