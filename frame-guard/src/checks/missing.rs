//! No-missing-values check.

use super::{owned_columns, selected_columns};
use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::{ColumnMask, ViolationMask};
use crate::prelude::*;
use crate::table::Table;
use arrow::array::{Array, AsArray, BooleanArray};
use arrow::compute::{self, cast};
use arrow::datatypes::{DataType, Float64Type};
use tracing::{debug, instrument};

/// Asserts that the selected columns hold no null or NaN cells.
///
/// Every missing cell in the selection is reported at once.
#[derive(Debug, Clone, Default)]
pub struct NoneMissing {
    columns: Option<Vec<String>>,
}

impl NoneMissing {
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

/// Marks null cells, and NaN cells of floating point columns.
fn missing_mask(column: &str, array: &dyn Array) -> Result<ColumnMask> {
    let nulls = ColumnMask::new(column, compute::is_null(array)?);
    if !array.data_type().is_floating() {
        return Ok(nulls);
    }

    let floats = cast(array, &DataType::Float64)?;
    let nans: BooleanArray = floats
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| Some(v.is_some_and(f64::is_nan)))
        .collect();
    nulls.or(&ColumnMask::new(column, nans))
}

impl Check for NoneMissing {
    fn kind(&self) -> CheckKind {
        CheckKind::NoneMissing
    }

    #[instrument(skip(self, table), fields(check = "none_missing", columns = ?self.columns))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        let columns = selected_columns(table, self.columns.as_deref())?;
        let masks = columns
            .iter()
            .map(|name| missing_mask(name, table.column(name)?.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let missing = ViolationMask::new(table.num_rows(), masks)?;
        if !missing.any() {
            debug!(columns = columns.len(), "No missing values");
            return Ok(());
        }

        debug!(missing = missing.count(), "Found missing values");
        Err(GuardError::validation_failed(
            self.kind(),
            missing.into_violation(table.index())?,
        ))
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::for_columns(self.columns.clone().unwrap_or_default())
            .with_description("Checks that no cell is null or NaN")
    }
}

/// Asserts there are no missing values in `columns` (all columns when `None`).
pub fn none_missing<'t, T: Table>(table: &'t T, columns: Option<&[&str]>) -> Result<&'t T> {
    NoneMissing {
        columns: owned_columns(columns),
    }
    .validate(table)
}
