//! Column aggregates used by the outlier check.

use crate::prelude::*;
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};

/// Reads a numeric column as `f64`, mapping nulls and NaN to `None`.
pub fn numeric_values(column: &str, array: &dyn Array) -> Result<Vec<Option<f64>>> {
    if !array.data_type().is_numeric() {
        return Err(GuardError::type_mismatch(
            format!("numeric column '{column}'"),
            array.data_type().to_string(),
        ));
    }
    let floats = cast(array, &DataType::Float64)?;
    Ok(floats
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Mean and spread of the non-missing values of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMoments {
    /// Count of non-missing values.
    pub count: usize,
    /// Mean value, `None` when the column has no values.
    pub mean: Option<f64>,
    /// Sum of squared deviations from the mean.
    pub sum_squared_deviations: f64,
}

impl ColumnMoments {
    /// Computes the moments over the present values.
    pub fn from_values(values: &[Option<f64>]) -> Self {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let count = present.len();
        if count == 0 {
            return Self {
                count,
                mean: None,
                sum_squared_deviations: 0.0,
            };
        }

        let mean = present.iter().sum::<f64>() / count as f64;
        let sum_squared_deviations = present.iter().map(|v| (v - mean).powi(2)).sum();
        Self {
            count,
            mean: Some(mean),
            sum_squared_deviations,
        }
    }

    /// Sample standard deviation (n - 1 denominator). Undefined below two values.
    pub fn sample_std_dev(&self) -> Option<f64> {
        if self.count <= 1 {
            None
        } else {
            Some((self.sum_squared_deviations / (self.count - 1) as f64).sqrt())
        }
    }
}
