//! Method-style access to the built-in checks.

use crate::checks::{self, Monotonic};
use crate::locator::ColumnMask;
use crate::prelude::*;
use crate::table::{Table, Value};
use arrow::datatypes::DataType;

/// Extension trait exposing every built-in check as a method on the table.
///
/// Each method returns the table itself on success, so checks chain with
/// `?`:
///
/// ```rust
/// use arrow::array::{ArrayRef, Float64Array};
/// use frame_guard::prelude::*;
/// use frame_guard::table::Frame;
/// use std::sync::Arc;
///
/// # fn main() -> Result<()> {
/// let frame = Frame::from_columns(vec![(
///     "price",
///     Arc::new(Float64Array::from(vec![1.5, 2.0, 2.5])) as ArrayRef,
/// )])?;
///
/// frame
///     .none_missing(None)?
///     .is_monotonic(None, Monotonic::increasing().strict())?
///     .within_range(&[("price", (Value::Float(0.0), Value::Float(10.0)))])?;
/// # Ok(())
/// # }
/// ```
pub trait GuardExt: Table + Sized {
    /// See [`checks::none_missing`].
    fn none_missing(&self, columns: Option<&[&str]>) -> Result<&Self> {
        checks::none_missing(self, columns)
    }

    /// See [`checks::is_monotonic`].
    fn is_monotonic(
        &self,
        items: Option<&[(&str, Monotonic)]>,
        default: Monotonic,
    ) -> Result<&Self> {
        checks::is_monotonic(self, items, default)
    }

    /// See [`checks::is_shape`].
    fn is_shape(&self, shape: (usize, usize)) -> Result<&Self> {
        checks::is_shape(self, shape)
    }

    /// See [`checks::unique_index`].
    fn unique_index(&self) -> Result<&Self> {
        checks::unique_index(self)
    }

    /// See [`checks::unique`].
    fn unique(&self, columns: Option<&[&str]>) -> Result<&Self> {
        checks::unique(self, columns)
    }

    /// See [`checks::within_set`].
    fn within_set(&self, items: &[(&str, Vec<Value>)]) -> Result<&Self> {
        checks::within_set(self, items)
    }

    /// See [`checks::within_range`].
    fn within_range(&self, items: &[(&str, (Value, Value))]) -> Result<&Self> {
        checks::within_range(self, items)
    }

    /// See [`checks::within_n_std`].
    fn within_n_std(&self, n: Option<f64>) -> Result<&Self> {
        checks::within_n_std(self, n)
    }

    /// See [`checks::has_dtypes`].
    fn has_dtypes(&self, items: &[(&str, DataType)]) -> Result<&Self> {
        checks::has_dtypes(self, items)
    }

    /// See [`checks::verify_all`].
    fn verify_all<F>(&self, description: &str, predicate: F) -> Result<&Self>
    where
        F: Fn(&dyn Table) -> Result<Vec<ColumnMask>> + Send + Sync + 'static,
    {
        checks::verify_all(self, description, predicate)
    }

    /// See [`checks::verify_any`].
    fn verify_any<F>(&self, description: &str, predicate: F) -> Result<&Self>
    where
        F: Fn(&dyn Table) -> Result<Vec<ColumnMask>> + Send + Sync + 'static,
    {
        checks::verify_any(self, description, predicate)
    }
}

impl<T: Table> GuardExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CheckKind;
    use crate::test_fixtures::{grades_frame, int_frame};

    #[test]
    fn test_chained_checks_return_same_table() {
        let frame = grades_frame();
        let checked = frame
            .unique_index()
            .and_then(|f| f.is_shape((4, 3)))
            .and_then(|f| f.within_set(&[("grade", vec!["A".into(), "B".into(), "C".into()])]))
            .and_then(|f| {
                f.has_dtypes(&[("grade", DataType::Utf8), ("year", DataType::Int64)])
            })
            .and_then(|f| {
                f.is_monotonic(
                    Some(&[("year", Monotonic::increasing())]),
                    Monotonic::default(),
                )
            })
            .unwrap();
        assert!(std::ptr::eq(checked, &frame));
    }

    #[test]
    fn test_chain_stops_at_first_failure() {
        let frame = grades_frame();
        let err = frame
            .is_shape((4, 3))
            .and_then(|f| f.none_missing(None))
            .and_then(|f| f.is_shape((0, 0)))
            .unwrap_err();
        assert_eq!(err.check_kind(), Some(CheckKind::NoneMissing));
    }

    #[test]
    fn test_numeric_methods() {
        let frame = int_frame(&[("x", vec![Some(1), Some(2), Some(3)])]);
        assert!(frame.within_n_std(None).is_ok());
        assert!(frame.unique(None).is_ok());
        assert!(frame
            .within_range(&[("x", (Value::Int(1), Value::Int(3)))])
            .is_ok());
        assert!(frame
            .verify_any("has a two", |table: &dyn Table| {
                let values = Value::collect(table.column("x")?.as_ref())?;
                Ok(vec![ColumnMask::from_fn("x", values.len(), |row| {
                    values[row] == Value::Int(2)
                })])
            })
            .is_ok());
    }
}
