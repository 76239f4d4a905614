//! Frames shared by the unit tests.

use crate::table::{Frame, RowIndex};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Builds a frame of `Int64` columns.
pub(crate) fn int_frame(columns: &[(&str, Vec<Option<i64>>)]) -> Frame {
    Frame::from_columns(
        columns
            .iter()
            .map(|(name, values)| (*name, Arc::new(Int64Array::from(values.clone())) as ArrayRef)),
    )
    .unwrap()
}

/// Builds a frame of `Float64` columns.
pub(crate) fn float_frame(columns: &[(&str, Vec<Option<f64>>)]) -> Frame {
    Frame::from_columns(
        columns
            .iter()
            .map(|(name, values)| (*name, Arc::new(Float64Array::from(values.clone())) as ArrayRef)),
    )
    .unwrap()
}

/// Student grades indexed by student name.
///
/// | index | grade | score | year |
/// |-------|-------|-------|------|
/// | ann   | "A"   | 91.0  | 2021 |
/// | bob   | "B"   | 84.5  | 2022 |
/// | cy    | "C"   | null  | 2022 |
/// | dee   | "A"   | 97.0  | 2023 |
pub(crate) fn grades_frame() -> Frame {
    let batch = RecordBatch::try_from_iter(vec![
        (
            "grade",
            Arc::new(StringArray::from(vec!["A", "B", "C", "A"])) as ArrayRef,
        ),
        (
            "score",
            Arc::new(Float64Array::from(vec![Some(91.0), Some(84.5), None, Some(97.0)])) as ArrayRef,
        ),
        (
            "year",
            Arc::new(Int64Array::from(vec![2021, 2022, 2022, 2023])) as ArrayRef,
        ),
    ])
    .unwrap();
    Frame::with_index(batch, RowIndex::new(["ann", "bob", "cy", "dee"])).unwrap()
}
