//! The table capability interface consumed by every check.
//!
//! Checks never touch storage directly. They go through [`Table`], which
//! exposes exactly what validation needs: columns by name, the row index,
//! per-column data types and the table's shape. [`Frame`] implements it on
//! top of an Arrow [`RecordBatch`] plus a [`RowIndex`].
//!
//! ```rust
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use frame_guard::table::{Frame, Table};
//! use std::sync::Arc;
//!
//! let frame = Frame::from_columns(vec![
//!     ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
//!     ("grade", Arc::new(StringArray::from(vec!["A", "B", "C"])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! assert_eq!(frame.shape(), (3, 2));
//! assert_eq!(frame.column_names(), vec!["id", "grade"]);
//! ```

mod index;
pub mod stats;
mod value;

pub use index::{IndexLabel, RowIndex};
pub use value::Value;

use crate::prelude::*;
use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

/// Read-only access to a tabular dataset.
///
/// Implementations must keep every column the same length as the row index.
pub trait Table {
    /// Returns the column names in table order.
    fn column_names(&self) -> Vec<&str>;

    /// Looks up a column by name.
    fn column(&self, name: &str) -> Result<&ArrayRef>;

    /// Returns the row index.
    fn index(&self) -> &RowIndex;

    /// Returns the data type of a column.
    fn dtype(&self, name: &str) -> Result<&DataType> {
        Ok(self.column(name)?.data_type())
    }

    /// Returns the number of rows.
    fn num_rows(&self) -> usize {
        self.index().len()
    }

    /// Returns the number of columns.
    fn num_columns(&self) -> usize {
        self.column_names().len()
    }

    /// Returns `(row_count, column_count)`.
    fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }
}

/// An in-memory table: an Arrow record batch with a row index.
#[derive(Debug, Clone)]
pub struct Frame {
    batch: RecordBatch,
    index: RowIndex,
}

impl Frame {
    /// Wraps a record batch with the positional index `0..num_rows`.
    pub fn new(batch: RecordBatch) -> Self {
        let index = RowIndex::range(batch.num_rows());
        Self { batch, index }
    }

    /// Wraps a record batch with an explicit index.
    ///
    /// Fails if the index length differs from the batch's row count.
    pub fn with_index(batch: RecordBatch, index: RowIndex) -> Result<Self> {
        if index.len() != batch.num_rows() {
            return Err(GuardError::Misaligned {
                expected: batch.num_rows(),
                found: index.len(),
            });
        }
        Ok(Self { batch, index })
    }

    /// Builds a frame from named columns with a positional index.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: AsRef<str>,
    {
        let batch = RecordBatch::try_from_iter(columns)?;
        Ok(Self::new(batch))
    }

    /// Moves `column` out of the data and uses its values as the row index.
    pub fn set_index(mut self, column: &str) -> Result<Self> {
        let position = self
            .batch
            .schema()
            .index_of(column)
            .map_err(|_| GuardError::column_not_found(column))?;
        let labels = self.batch.remove_column(position);
        self.index = RowIndex::from_array(labels.as_ref())?;
        Ok(self)
    }

    /// Returns the underlying record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Consumes the frame, returning the batch and index.
    pub fn into_parts(self) -> (RecordBatch, RowIndex) {
        (self.batch, self.index)
    }
}

impl From<RecordBatch> for Frame {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

impl Table for Frame {
    fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    fn column(&self, name: &str) -> Result<&ArrayRef> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| GuardError::column_not_found(name))
    }

    fn index(&self) -> &RowIndex {
        &self.index
    }

    fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }
}
