//! # frame-guard - Assertions for tabular data
//!
//! frame-guard checks structural and statistical invariants of in-memory
//! tables backed by Arrow [`RecordBatch`](arrow::record_batch::RecordBatch)es.
//! Every check either hands the table straight back, so checks chain inside a
//! pipeline, or fails with a [`GuardError::ValidationFailed`](error::GuardError)
//! that pinpoints the offending rows and cells.
//!
//! ## Quick Start
//!
//! ```rust
//! use arrow::array::{ArrayRef, Float64Array, StringArray};
//! use frame_guard::prelude::*;
//! use frame_guard::table::Frame;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let frame = Frame::from_columns(vec![
//!     ("grade", Arc::new(StringArray::from(vec!["A", "B", "D"])) as ArrayRef),
//!     ("score", Arc::new(Float64Array::from(vec![91.0, 84.5, 62.0])) as ArrayRef),
//! ])?;
//!
//! let checked = frame.none_missing(None)?.is_shape((3, 2))?;
//! assert!(std::ptr::eq(checked, &frame));
//!
//! let err = frame
//!     .within_set(&[("grade", vec!["A".into(), "B".into(), "C".into()])])
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "within_set failed: 1 bad row(s) in column 'grade': [2: \"D\"]"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Checks
//!
//! | check | invariant |
//! |-------|-----------|
//! | `none_missing` | no null (or NaN) cells |
//! | `is_monotonic` | columns ordered, optionally strictly |
//! | `is_shape` | exact `(rows, columns)` |
//! | `unique_index` | no repeated row identifiers |
//! | `unique` | no repeated values within a column |
//! | `within_set` | values drawn from an allowed set |
//! | `within_range` | values inside inclusive bounds |
//! | `within_n_std` | values near their column mean |
//! | `has_dtypes` | columns have the expected Arrow types |
//! | `verify_all` / `verify_any` | caller-supplied predicates |
//!
//! Each is available as a free function in [`checks`], as a method through
//! [`GuardExt`](core::GuardExt), and as a [`Check`](core::Check) value for
//! [`CheckSuite`](core::CheckSuite)s.
//!
//! ## Architecture
//!
//! - **`table`**: the [`Table`](table::Table) abstraction, [`Frame`](table::Frame),
//!   row identifiers and scalar values
//! - **`locator`**: boolean masks and the violation payloads built from them
//! - **`checks`**: the built-in invariants
//! - **`core`**: the `Check` trait, suites and the extension trait
//! - **`formatters`**: human, JSON and Markdown renderings of failures
//! - **`logging`**: suite log settings and subscriber setup

pub mod checks;
pub mod core;
pub mod error;
pub mod formatters;
pub mod locator;
pub mod logging;
pub mod prelude;
pub mod table;

#[cfg(test)]
mod test_fixtures;
