//! Built-in checks.
//!
//! Each invariant comes in two shapes: a free function taking the table and
//! the check's parameters, and a struct implementing [`Check`] for use in a
//! [`CheckSuite`](crate::core::CheckSuite). Both return the table they were
//! given on success, so calls chain:
//!
//! ```rust
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use frame_guard::checks::{is_shape, none_missing, within_set};
//! use frame_guard::table::Frame;
//! use std::sync::Arc;
//!
//! # fn main() -> frame_guard::prelude::Result<()> {
//! let frame = Frame::from_columns(vec![
//!     ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
//!     ("grade", Arc::new(StringArray::from(vec!["A", "B", "C"])) as ArrayRef),
//! ])?;
//!
//! let checked = within_set(
//!     is_shape(none_missing(&frame, None)?, (3, 2))?,
//!     &[("grade", vec!["A".into(), "B".into(), "C".into()])],
//! )?;
//! assert!(std::ptr::eq(checked, &frame));
//! # Ok(())
//! # }
//! ```
//!
//! ## Reporting
//!
//! `none_missing`, `within_n_std` and `verify_all` report every bad cell of
//! the table in one [`Violation::Locations`](crate::locator::Violation). The
//! remaining checks stop at the first offending column.

mod dtypes;
mod membership;
mod missing;
mod monotonic;
mod outliers;
mod range;
mod shape;
mod uniqueness;
mod verify;

pub use dtypes::{has_dtypes, HasDtypes};
pub use membership::{within_set, WithinSet};
pub use missing::{none_missing, NoneMissing};
pub use monotonic::{is_monotonic, Direction, IsMonotonic, Monotonic};
pub use outliers::{within_n_std, WithinNStd, DEFAULT_N_STD};
pub use range::{within_range, WithinRange};
pub use shape::{is_shape, IsShape};
pub use uniqueness::{unique, unique_index, Unique, UniqueIndex};
pub use verify::{verify_all, verify_any, Predicate, VerifyAll, VerifyAny};

use crate::prelude::*;
use crate::table::Table;

/// Resolves an optional column selection against the table.
///
/// `None` selects every column in table order; an explicit selection keeps
/// its own order and must name existing columns.
pub(crate) fn selected_columns(
    table: &dyn Table,
    columns: Option<&[String]>,
) -> Result<Vec<String>> {
    match columns {
        None => Ok(table
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect()),
        Some(columns) => {
            for column in columns {
                table.column(column)?;
            }
            Ok(columns.to_vec())
        }
    }
}

pub(crate) fn owned_columns(columns: Option<&[&str]>) -> Option<Vec<String>> {
    columns.map(|columns| columns.iter().map(|c| c.to_string()).collect())
}

