//! Set membership check.

use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::{ColumnMask, Violation};
use crate::prelude::*;
use crate::table::{Table, Value};
use tracing::{debug, instrument};

/// Asserts that each listed column only holds values from its allowed set.
///
/// Columns are checked in the order given; the first column with a value
/// outside its set fails with those values keyed by row identifier.
#[derive(Debug, Clone, Default)]
pub struct WithinSet {
    items: Vec<(String, Vec<Value>)>,
}

impl WithinSet {
    /// Creates a membership check from `(column, allowed values)` pairs.
    pub fn new<I, S, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        Self {
            items: items
                .into_iter()
                .map(|(column, allowed)| {
                    (column.into(), allowed.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Adds a column and its allowed values.
    pub fn column<V>(mut self, column: impl Into<String>, allowed: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        self.items
            .push((column.into(), allowed.into_iter().map(Into::into).collect()));
        self
    }
}

impl Check for WithinSet {
    fn kind(&self) -> CheckKind {
        CheckKind::WithinSet
    }

    #[instrument(skip(self, table), fields(check = "within_set", columns = self.items.len()))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        for (column, allowed) in &self.items {
            let array = table.column(column)?;
            let values = Value::collect(array.as_ref())?;
            let outside = ColumnMask::from_fn(column.as_str(), values.len(), |row| {
                !allowed.iter().any(|member| member.matches(&values[row]))
            });

            if outside.any() {
                debug!(column = %column, outside = outside.count(), "Values not in set");
                return Err(GuardError::validation_failed(
                    self.kind(),
                    Violation::Series(outside.locate_series(table.index(), Some(array.as_ref()))?),
                ));
            }
        }
        Ok(())
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::for_columns(self.items.iter().map(|(column, _)| column.clone()))
            .with_description("Checks that values belong to an allowed set")
    }
}

/// Asserts that each column in `items` only holds its allowed values.
pub fn within_set<'t, T: Table>(table: &'t T, items: &[(&str, Vec<Value>)]) -> Result<&'t T> {
    WithinSet::new(
        items
            .iter()
            .map(|(column, allowed)| (*column, allowed.iter().cloned())),
    )
    .validate(table)
}
