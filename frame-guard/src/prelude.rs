//! Prelude for commonly used types and traits in frame-guard.

pub use crate::checks::{Direction, Monotonic};
pub use crate::core::{Check, CheckKind, CheckSuite, GuardExt};
pub use crate::error::{ErrorContext, GuardError, Result};
pub use crate::formatters::{FormatterConfig, ViolationFormatter};
pub use crate::locator::Violation;
pub use crate::logging::LogConfig;
pub use crate::table::{Frame, IndexLabel, RowIndex, Table, Value};
