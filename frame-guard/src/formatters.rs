//! Rendering check failures for people and tools.
//!
//! A failed check is just a [`GuardError`]. The formatters here turn one into
//! console text, JSON or Markdown. Errors that are not validation failures
//! are rendered as plain error messages.
//!
//! # Examples
//!
//! ```rust
//! use arrow::array::{ArrayRef, Int64Array};
//! use frame_guard::checks::none_missing;
//! use frame_guard::formatters::{FormatterConfig, HumanFormatter, ViolationFormatter};
//! use frame_guard::table::Frame;
//! use std::sync::Arc;
//!
//! let frame = Frame::from_columns(vec![(
//!     "id",
//!     Arc::new(Int64Array::from(vec![Some(1), None])) as ArrayRef,
//! )])
//! .unwrap();
//!
//! let err = none_missing(&frame, None).unwrap_err();
//! let text = HumanFormatter::with_config(FormatterConfig::minimal())
//!     .format(&err)
//!     .unwrap();
//! assert!(text.contains("none_missing"));
//! ```

use crate::core::CheckKind;
use crate::locator::Violation;
use crate::prelude::*;
use serde::Serialize;
use std::fmt::{self, Write};

/// Options shared by all formatters.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Maximum number of entries to list (`None` for all)
    pub max_entries: Option<usize>,
    /// Whether to use ANSI colors (human formatter only)
    pub use_colors: bool,
    /// Whether to name the failed check
    pub include_check_name: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            use_colors: true,
            include_check_name: true,
        }
    }
}

impl FormatterConfig {
    /// Headline plus any summary line.
    pub fn minimal() -> Self {
        Self {
            max_entries: Some(0),
            use_colors: false,
            include_check_name: true,
        }
    }

    /// Everything, colored.
    pub fn detailed() -> Self {
        Self::default()
    }

    /// Uncolored and capped at 50 entries.
    pub fn ci() -> Self {
        Self {
            max_entries: Some(50),
            use_colors: false,
            include_check_name: true,
        }
    }

    /// Sets the entry cap.
    pub fn with_max_entries(mut self, max: Option<usize>) -> Self {
        self.max_entries = max;
        self
    }

    /// Sets whether to use colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Number of entries of `violation` to list. A summary is the whole
    /// diagnostic, so it is never capped.
    fn limit(&self, violation: &Violation) -> usize {
        let total = violation.count();
        match violation {
            Violation::Summary(_) => total,
            _ => self.max_entries.map_or(total, |max| max.min(total)),
        }
    }
}

/// Turns a check error into a string.
///
/// ```rust
/// use frame_guard::formatters::ViolationFormatter;
/// use frame_guard::prelude::*;
///
/// struct OneLine;
///
/// impl ViolationFormatter for OneLine {
///     fn format(&self, error: &GuardError) -> Result<String> {
///         Ok(error.to_string())
///     }
/// }
/// ```
pub trait ViolationFormatter {
    /// Formats the error.
    fn format(&self, error: &GuardError) -> Result<String>;
}

/// One line per reported entry, in payload order.
fn entry_lines(violation: &Violation) -> Vec<String> {
    match violation {
        Violation::Locations(cells) => cells
            .iter()
            .map(|cell| format!("row {}, column '{}'", cell.row, cell.column))
            .collect(),
        Violation::Series(series) => series
            .entries
            .iter()
            .map(|(row, value)| format!("row {row} in '{}': {value}", series.column))
            .collect(),
        Violation::Summary(message) => vec![message.clone()],
        Violation::Duplicates(labels) => labels
            .iter()
            .map(|label| format!("index label {label}"))
            .collect(),
    }
}

fn format_failed(err: fmt::Error) -> GuardError {
    GuardError::Internal(format!("Failed to format report: {err}"))
}

/// Console output.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a formatter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with the given configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.config.use_colors {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn render(&self, error: &GuardError, out: &mut String) -> fmt::Result {
        let (check, violation) = match error {
            GuardError::ValidationFailed { check, violation } => (check, violation),
            other => {
                return writeln!(out, "{} {other}", self.paint("31", "Error:"));
            }
        };

        if self.config.include_check_name {
            writeln!(out, "{} {check}", self.paint("31", "Check failed:"))?;
        } else {
            writeln!(out, "{}", self.paint("31", "Check failed"))?;
        }

        let entries = entry_lines(violation);
        let shown = self.config.limit(violation).min(entries.len());
        for entry in &entries[..shown] {
            writeln!(out, "  - {entry}")?;
        }
        if entries.len() > shown {
            writeln!(out, "  ... and {} more", entries.len() - shown)?;
        }
        Ok(())
    }
}

impl ViolationFormatter for HumanFormatter {
    fn format(&self, error: &GuardError) -> Result<String> {
        let mut output = String::new();
        self.render(error, &mut output).map_err(format_failed)?;
        Ok(output)
    }
}

#[derive(Serialize)]
struct FailureReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<CheckKind>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation: Option<&'a Violation>,
    truncated: bool,
}

/// Structured JSON output.
///
/// Validation failures serialize their full payload unless `max_entries`
/// caps it, in which case the payload is dropped, the message only counts
/// the entries and `truncated` is set.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a pretty-printing formatter with the default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a formatter with the given configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to pretty-print.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViolationFormatter for JsonFormatter {
    fn format(&self, error: &GuardError) -> Result<String> {
        let violation = error.violation();
        let truncated = violation.is_some_and(|v| self.config.limit(v) < v.count());
        let message = match (error.check_kind(), violation) {
            (Some(check), Some(v)) if truncated => {
                format!("{check} failed: {} bad entries, details truncated", v.count())
            }
            _ => error.to_string(),
        };
        let report = FailureReport {
            check: error
                .check_kind()
                .filter(|_| self.config.include_check_name),
            message,
            violation: violation.filter(|_| !truncated),
            truncated,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| GuardError::Serialization(format!("Failed to serialize report: {e}")))
    }
}

/// Markdown output for reports and pull request comments.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    /// Creates a formatter with the default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    /// Creates a formatter with the given configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the heading level, clamped to 1..=6.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    fn render(&self, error: &GuardError, out: &mut String) -> fmt::Result {
        let h = "#".repeat(self.heading_level as usize);
        let (check, violation) = match error {
            GuardError::ValidationFailed { check, violation } => (check, violation),
            other => {
                writeln!(out, "{h} Error")?;
                writeln!(out)?;
                return writeln!(out, "{other}");
            }
        };

        if self.config.include_check_name {
            writeln!(out, "{h} Check failed: `{check}`")?;
        } else {
            writeln!(out, "{h} Check failed")?;
        }

        let entries = entry_lines(violation);
        let shown = self.config.limit(violation).min(entries.len());
        if shown > 0 {
            writeln!(out)?;
        }
        for entry in &entries[..shown] {
            writeln!(out, "- {entry}")?;
        }
        if entries.len() > shown {
            writeln!(out)?;
            writeln!(out, "_{} more not shown_", entries.len() - shown)?;
        }
        Ok(())
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViolationFormatter for MarkdownFormatter {
    fn format(&self, error: &GuardError) -> Result<String> {
        let mut output = String::new();
        self.render(error, &mut output).map_err(format_failed)?;
        Ok(output)
    }
}
