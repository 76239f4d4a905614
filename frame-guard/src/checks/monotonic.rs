//! Monotonicity check.
//!
//! A column's ordering is judged from the comparisons of consecutive values.
//! The base requirement depends on the direction: non-decreasing,
//! non-increasing, or (for [`Direction::Unspecified`]) either one. Strictness
//! additionally forbids equal neighbours: every step must rise, every step
//! must fall, or, without a direction, all steps must rise or all must fall.
//! A column passes only if both requirements hold.
//!
//! Columns with fewer than two values pass under every setting. A null or
//! NaN between other values has no place in an ordering, so a column of two
//! or more values containing one is never monotonic.

use crate::core::{Check, CheckKind, CheckMetadata};
use crate::locator::Violation;
use crate::prelude::*;
use crate::table::{Table, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, instrument};

/// The ordering direction a column must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Values never decrease
    Increasing,
    /// Values never increase
    Decreasing,
    /// Values either never decrease or never increase
    #[default]
    Unspecified,
}

impl From<Option<bool>> for Direction {
    /// `Some(true)` is increasing, `Some(false)` decreasing, `None` either.
    fn from(increasing: Option<bool>) -> Self {
        match increasing {
            Some(true) => Direction::Increasing,
            Some(false) => Direction::Decreasing,
            None => Direction::Unspecified,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Increasing => write!(f, "increasing"),
            Direction::Decreasing => write!(f, "decreasing"),
            Direction::Unspecified => write!(f, "monotonic"),
        }
    }
}

/// Direction and strictness required of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Monotonic {
    /// Required direction
    pub direction: Direction,
    /// Whether equal consecutive values are forbidden
    pub strict: bool,
}

impl Monotonic {
    /// Creates a requirement.
    pub fn new(direction: impl Into<Direction>, strict: bool) -> Self {
        Self {
            direction: direction.into(),
            strict,
        }
    }

    /// Non-decreasing.
    pub fn increasing() -> Self {
        Self::new(Direction::Increasing, false)
    }

    /// Non-increasing.
    pub fn decreasing() -> Self {
        Self::new(Direction::Decreasing, false)
    }

    /// Either non-decreasing or non-increasing.
    pub fn either() -> Self {
        Self::new(Direction::Unspecified, false)
    }

    /// Forbids equal consecutive values.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Returns true if `values` satisfy the requirement.
    pub fn holds_for(&self, values: &[Value]) -> Result<bool> {
        let Some(steps) = Steps::of(values)? else {
            return Ok(false);
        };
        let (base, tight) = match self.direction {
            Direction::Increasing => (steps.non_decreasing, steps.rising),
            Direction::Decreasing => (steps.non_increasing, steps.falling),
            Direction::Unspecified => (
                steps.non_decreasing || steps.non_increasing,
                steps.rising || steps.falling,
            ),
        };
        Ok(base && (!self.strict || tight))
    }
}

impl fmt::Display for Monotonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.strict {
            write!(f, "strictly {}", self.direction)
        } else {
            write!(f, "{}", self.direction)
        }
    }
}

/// What the consecutive comparisons of a sequence have in common.
#[derive(Debug, Clone, Copy)]
struct Steps {
    non_decreasing: bool,
    non_increasing: bool,
    rising: bool,
    falling: bool,
}

impl Steps {
    /// Summarizes the steps of `values`, or `None` if some neighbour pair has
    /// no ordering.
    fn of(values: &[Value]) -> Result<Option<Self>> {
        let mut steps = Steps {
            non_decreasing: true,
            non_increasing: true,
            rising: true,
            falling: true,
        };
        for pair in values.windows(2) {
            let Some(ordering) = pair[0].compare(&pair[1])? else {
                return Ok(None);
            };
            steps.non_decreasing &= ordering != Ordering::Greater;
            steps.non_increasing &= ordering != Ordering::Less;
            steps.rising &= ordering == Ordering::Less;
            steps.falling &= ordering == Ordering::Greater;
        }
        Ok(Some(steps))
    }
}

/// Asserts that columns are monotonic.
///
/// Columns are evaluated in order and the first one out of order fails the
/// check.
#[derive(Debug, Clone, Default)]
pub struct IsMonotonic {
    items: Option<Vec<(String, Monotonic)>>,
    default: Monotonic,
}

impl IsMonotonic {
    /// Applies `requirement` to every column of the table.
    pub fn all(requirement: Monotonic) -> Self {
        Self {
            items: None,
            default: requirement,
        }
    }

    /// Applies a separate requirement to each listed column.
    pub fn items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, Monotonic)>,
        S: Into<String>,
    {
        Self {
            items: Some(
                items
                    .into_iter()
                    .map(|(column, requirement)| (column.into(), requirement))
                    .collect(),
            ),
            default: Monotonic::default(),
        }
    }

    fn resolved_items(&self, table: &dyn Table) -> Vec<(String, Monotonic)> {
        match &self.items {
            Some(items) => items.clone(),
            None => table
                .column_names()
                .into_iter()
                .map(|column| (column.to_string(), self.default))
                .collect(),
        }
    }
}

impl Check for IsMonotonic {
    fn kind(&self) -> CheckKind {
        CheckKind::IsMonotonic
    }

    #[instrument(skip(self, table), fields(check = "is_monotonic"))]
    fn evaluate(&self, table: &dyn Table) -> Result<()> {
        for (column, requirement) in self.resolved_items(table) {
            let values = Value::collect(table.column(&column)?.as_ref())?;
            if !requirement.holds_for(&values)? {
                debug!(column = %column, requirement = %requirement, "Column out of order");
                return Err(GuardError::validation_failed(
                    self.kind(),
                    Violation::Summary(format!("column '{column}' is not {requirement}")),
                ));
            }
        }
        Ok(())
    }

    fn metadata(&self) -> CheckMetadata {
        let columns = self
            .items
            .iter()
            .flatten()
            .map(|(column, _)| column.clone())
            .collect::<Vec<_>>();
        CheckMetadata::for_columns(columns)
            .with_description("Checks that columns are ordered")
            .with_custom("default", self.default.to_string())
    }
}

/// Asserts that columns are monotonic.
///
/// `items` pairs columns with their own requirement; when `None`, every
/// column must satisfy `default`.
pub fn is_monotonic<'t, T: Table>(
    table: &'t T,
    items: Option<&[(&str, Monotonic)]>,
    default: Monotonic,
) -> Result<&'t T> {
    let check = match items {
        Some(items) => IsMonotonic::items(items.iter().copied()),
        None => IsMonotonic::all(default),
    };
    check.validate(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{float_frame, int_frame};

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    fn all_settings() -> Vec<Monotonic> {
        let mut settings = Vec::new();
        for direction in [
            Direction::Increasing,
            Direction::Decreasing,
            Direction::Unspecified,
        ] {
            for strict in [false, true] {
                settings.push(Monotonic::new(direction, strict));
            }
        }
        settings
    }

    #[test]
    fn test_empty_and_single_values_are_vacuously_monotonic() {
        for setting in all_settings() {
            assert!(setting.holds_for(&[]).unwrap(), "{setting}");
            assert!(setting.holds_for(&ints(&[4])).unwrap(), "{setting}");
            assert!(setting.holds_for(&[Value::Null]).unwrap(), "{setting}");
        }
    }

    #[test]
    fn test_constant_column() {
        let constant = ints(&[3, 3, 3]);
        for setting in all_settings() {
            assert_eq!(
                setting.holds_for(&constant).unwrap(),
                !setting.strict,
                "{setting}"
            );
        }
    }

    #[test]
    fn test_strictness_tightens() {
        let with_repeat = ints(&[1, 2, 2, 5]);
        assert!(Monotonic::increasing().holds_for(&with_repeat).unwrap());
        assert!(!Monotonic::increasing().strict().holds_for(&with_repeat).unwrap());
        assert!(Monotonic::either().holds_for(&with_repeat).unwrap());
        assert!(!Monotonic::either().strict().holds_for(&with_repeat).unwrap());

        let falling = ints(&[9, 4, 4, 1]);
        assert!(Monotonic::decreasing().holds_for(&falling).unwrap());
        assert!(!Monotonic::decreasing().strict().holds_for(&falling).unwrap());
    }

    #[test]
    fn test_unspecified_direction_accepts_either_order() {
        let ascending = ints(&[1, 2, 3]);
        let descending = ints(&[3, 2, 1]);
        let zigzag = ints(&[1, 3, 2]);
        for strict in [false, true] {
            let either = Monotonic::new(Direction::Unspecified, strict);
            assert!(either.holds_for(&ascending).unwrap());
            assert!(either.holds_for(&descending).unwrap());
            assert!(!either.holds_for(&zigzag).unwrap());
        }
    }

    #[test]
    fn test_direction_is_enforced() {
        let ascending = ints(&[1, 2, 3]);
        assert!(Monotonic::increasing().holds_for(&ascending).unwrap());
        assert!(!Monotonic::decreasing().holds_for(&ascending).unwrap());
    }

    #[test]
    fn test_missing_values_break_ordering() {
        let with_gap = vec![Value::Int(1), Value::Null, Value::Int(3)];
        assert!(!Monotonic::increasing().holds_for(&with_gap).unwrap());
        let with_nan = vec![Value::Float(1.0), Value::Float(f64::NAN)];
        assert!(!Monotonic::either().holds_for(&with_nan).unwrap());
    }

    #[test]
    fn test_strings_are_ordered_lexically() {
        let names: Vec<Value> = ["ann", "bob", "cy"].into_iter().map(Value::from).collect();
        assert!(Monotonic::increasing().strict().holds_for(&names).unwrap());
    }

    #[test]
    fn test_direction_from_tristate() {
        assert_eq!(Direction::from(Some(true)), Direction::Increasing);
        assert_eq!(Direction::from(Some(false)), Direction::Decreasing);
        assert_eq!(Direction::from(None), Direction::Unspecified);
    }

    #[test]
    fn test_check_uses_default_for_every_column() {
        let frame = int_frame(&[
            ("a", vec![Some(1), Some(2), Some(3)]),
            ("b", vec![Some(5), Some(5), Some(6)]),
        ]);
        let checked = is_monotonic(&frame, None, Monotonic::increasing()).unwrap();
        assert!(std::ptr::eq(checked, &frame));

        let err = is_monotonic(&frame, None, Monotonic::increasing().strict()).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&Violation::Summary(
                "column 'b' is not strictly increasing".to_string()
            ))
        );
    }

    #[test]
    fn test_check_fails_on_first_offending_item() {
        let frame = float_frame(&[
            ("a", vec![Some(3.0), Some(2.0), Some(1.0)]),
            ("b", vec![Some(1.0), Some(0.0), Some(2.0)]),
            ("c", vec![Some(1.0), Some(1.0), Some(0.0)]),
        ]);
        let items = [
            ("a", Monotonic::decreasing().strict()),
            ("c", Monotonic::increasing()),
            ("b", Monotonic::either()),
        ];
        let err = is_monotonic(&frame, Some(&items), Monotonic::default()).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&Violation::Summary(
                "column 'c' is not increasing".to_string()
            ))
        );
    }

    #[test]
    fn test_check_on_empty_and_single_row_tables() {
        let empty = int_frame(&[("a", vec![])]);
        let single = int_frame(&[("a", vec![Some(1)])]);
        for setting in all_settings() {
            assert!(is_monotonic(&empty, None, setting).is_ok());
            assert!(is_monotonic(&single, None, setting).is_ok());
        }
    }
}
