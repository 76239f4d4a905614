//! Outlier bound check.

use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::{ColumnMask, ViolationMask};
use crate::prelude::*;
use crate::table::stats::{numeric_values, ColumnMoments};
use crate::table::Table;
use tracing::{debug, instrument};

/// Default number of standard deviations a value may lie from its column mean.
pub const DEFAULT_N_STD: f64 = 3.0;

/// Asserts that every cell lies strictly within `n` sample standard
/// deviations of its column's mean.
///
/// Applies to the whole table, whose columns must all be numeric. Means and
/// deviations are recomputed on every evaluation. A cell is an inlier only
/// when `|value - mean| < n * std`; missing cells, and every cell of a column
/// whose deviation is undefined (fewer than two values), are outliers. All
/// outliers are reported at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithinNStd {
    n: f64,
}

impl WithinNStd {
    /// Creates the check with multiplier `n`.
    pub fn new(n: f64) -> Self {
        Self { n }
    }
}

impl Default for WithinNStd {
    fn default() -> Self {
        Self::new(DEFAULT_N_STD)
    }
}

impl Check for WithinNStd {
    fn kind(&self) -> CheckKind {
        CheckKind::WithinNStd
    }

    #[instrument(skip(self, table), fields(check = "within_n_std", n = self.n))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        if !self.n.is_finite() || self.n < 0.0 {
            return Err(GuardError::Configuration(format!(
                "standard deviation multiplier must be a non-negative number, got {}",
                self.n
            )));
        }

        let mut masks = Vec::with_capacity(table.num_columns());
        for column in table.column_names() {
            let values = numeric_values(column, table.column(column)?.as_ref())?;
            let moments = ColumnMoments::from_values(&values);
            let spread = moments.sample_std_dev().map(|std| self.n * std);

            let mask = ColumnMask::from_fn(column, values.len(), |row| {
                match (values[row], moments.mean, spread) {
                    (Some(value), Some(mean), Some(spread)) => {
                        let inlier = (value - mean).abs() < spread;
                        !inlier
                    }
                    _ => true,
                }
            });
            masks.push(mask);
        }

        let outliers = ViolationMask::new(table.num_rows(), masks)?;
        if !outliers.any() {
            return Ok(());
        }

        debug!(outliers = outliers.count(), "Found outliers");
        Err(GuardError::validation_failed(
            self.kind(),
            outliers.into_violation(table.index())?,
        ))
    }

    fn metadata(&self) -> CheckMetadata {
        CheckMetadata::new()
            .with_description("Checks that values lie within n standard deviations of the mean")
            .with_custom("n", self.n.to_string())
    }
}

/// Asserts that no cell lies `n` (default [`DEFAULT_N_STD`]) or more sample
/// standard deviations from its column mean.
pub fn within_n_std<T: Table>(table: &T, n: Option<f64>) -> Result<&T> {
    WithinNStd::new(n.unwrap_or(DEFAULT_N_STD)).validate(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{CellLocation, Violation};
    use crate::test_fixtures::{float_frame, grades_frame, int_frame};

    /// -3 and 3 among seventeen zeros: mean 0, sample std exactly 1.
    fn boundary_column() -> Vec<Option<f64>> {
        let mut values = vec![Some(-3.0), Some(3.0)];
        values.extend(std::iter::repeat(Some(0.0)).take(17));
        values
    }

    #[test]
    fn test_inliers_pass() {
        let values: Vec<Option<f64>> = (1..=5).map(|v| Some(v as f64)).collect();
        let frame = float_frame(&[("x", values)]);
        let checked = within_n_std(&frame, None).unwrap();
        assert!(std::ptr::eq(checked, &frame));
    }

    #[test]
    fn test_reports_outliers_across_columns() {
        let mut values: Vec<Option<i64>> = vec![Some(10); 20];
        values.push(Some(1_000));
        let mut other: Vec<Option<i64>> = (0..21).map(|v| Some(v % 3)).collect();
        other[3] = Some(500);

        let frame = int_frame(&[("a", values), ("b", other)]);
        let err = within_n_std(&frame, None).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&Violation::Locations(vec![
                CellLocation::new(3, "b"),
                CellLocation::new(20, "a"),
            ]))
        );
    }

    #[test]
    fn test_value_exactly_at_bound_is_an_outlier() {
        let frame = float_frame(&[("x", boundary_column())]);
        let err = within_n_std(&frame, Some(3.0)).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&Violation::Locations(vec![
                CellLocation::new(0, "x"),
                CellLocation::new(1, "x"),
            ]))
        );
        assert!(within_n_std(&frame, Some(3.000_001)).is_ok());
    }

    #[test]
    fn test_smaller_multiplier_is_stricter() {
        let frame = float_frame(&[("x", vec![Some(1.0), Some(2.0), Some(3.0), Some(10.0)])]);
        assert!(within_n_std(&frame, None).is_ok());
        assert!(within_n_std(&frame, Some(1.0)).is_err());
    }

    #[test]
    fn test_missing_cells_are_outliers() {
        let frame = grades_frame();
        let numeric = crate::table::Frame::from_columns(vec![
            ("score", frame.column("score").unwrap().clone()),
            ("year", frame.column("year").unwrap().clone()),
        ])
        .unwrap();
        let err = within_n_std(&numeric, None).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&Violation::Locations(vec![CellLocation::new(2, "score")]))
        );
    }

    #[test]
    fn test_non_numeric_columns_are_type_errors() {
        let frame = grades_frame();
        let err = within_n_std(&frame, None).unwrap_err();
        assert!(matches!(err, GuardError::TypeMismatch { .. }));
    }

    #[test]
    fn test_invalid_multiplier() {
        let frame = float_frame(&[("x", boundary_column())]);
        assert!(matches!(
            within_n_std(&frame, Some(f64::NAN)),
            Err(GuardError::Configuration(_))
        ));
    }
}
