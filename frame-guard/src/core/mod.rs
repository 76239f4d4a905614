//! Core check types.
//!
//! - **[`Check`]**: an invariant that can be evaluated against any [`Table`](crate::table::Table)
//! - **[`CheckKind`]**: which invariant a failure came from
//! - **[`CheckSuite`]**: an ordered, fail-fast collection of checks
//! - **[`GuardExt`]**: every built-in check as a method on the table
//!
//! ```text
//! CheckSuite
//!     ├── NoneMissing
//!     ├── IsShape
//!     └── WithinSet
//!             │
//!             ▼
//!     Ok(&table) | Err(GuardError::ValidationFailed { check, violation })
//! ```

mod check;
mod ext;
mod suite;

pub use check::{Check, CheckKind, CheckMetadata};
pub use ext::GuardExt;
pub use suite::{CheckSuite, CheckSuiteBuilder};
