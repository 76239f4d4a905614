//! Inclusive range check.

use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::{ColumnMask, Violation};
use crate::prelude::*;
use crate::table::{Table, Value};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Asserts that each listed column lies within `[lower, upper]`.
///
/// Bounds are inclusive and must both be present; a null or NaN bound is a
/// configuration error. Missing values are never out of range. The first
/// column with an offending row fails with a `true` entry per offending row.
#[derive(Debug, Clone, Default)]
pub struct WithinRange {
    items: Vec<(String, (Value, Value))>,
}

impl WithinRange {
    /// Creates a range check from `(column, (lower, upper))` pairs.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, (Value, Value))>,
        S: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .map(|(column, bounds)| (column.into(), bounds))
                .collect(),
        }
    }

    /// Adds a column and its inclusive bounds.
    pub fn column(
        mut self,
        column: impl Into<String>,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Self {
        self.items
            .push((column.into(), (lower.into(), upper.into())));
        self
    }
}

/// Returns true if `value` falls outside `[lower, upper]`.
fn out_of_range(value: &Value, lower: &Value, upper: &Value) -> Result<bool> {
    Ok(value.compare(lower)? == Some(Ordering::Less)
        || value.compare(upper)? == Some(Ordering::Greater))
}

impl Check for WithinRange {
    fn kind(&self) -> CheckKind {
        CheckKind::WithinRange
    }

    #[instrument(skip(self, table), fields(check = "within_range", columns = self.items.len()))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        for (column, (lower, upper)) in &self.items {
            if lower.is_missing() || upper.is_missing() {
                return Err(GuardError::Configuration(format!(
                    "range for '{column}' has a missing bound ({lower}, {upper})"
                )));
            }
            if lower.compare(upper)? == Some(Ordering::Greater) {
                return Err(GuardError::Configuration(format!(
                    "range for '{column}' has lower bound {lower} above upper bound {upper}"
                )));
            }

            let values = Value::collect(table.column(column)?.as_ref())?;
            let outside = values
                .iter()
                .map(|value| out_of_range(value, lower, upper))
                .collect::<Result<Vec<bool>>>()?;
            let mask = ColumnMask::from_fn(column.as_str(), outside.len(), |row| outside[row]);

            if mask.any() {
                debug!(column = %column, outside = mask.count(), "Values out of range");
                return Err(GuardError::validation_failed(
                    self.kind(),
                    Violation::Series(mask.locate_series(table.index(), None)?),
                ));
            }
        }
        Ok(())
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::for_columns(self.items.iter().map(|(column, _)| column.clone()))
            .with_description("Checks that values lie within inclusive bounds")
    }
}

/// Asserts that each column in `items` lies within its inclusive
/// `(lower, upper)` bounds.
pub fn within_range<'t, T: Table>(
    table: &'t T,
    items: &[(&str, (Value, Value))],
) -> Result<&'t T> {
    WithinRange::new(items.iter().cloned()).validate(table)
}
