//! Property-based tests for frame-guard checks.
//!
//! Each property generates columns with a known shape (sorted, with
//! repeats, with nulls) and compares the check outcome with an answer
//! computed independently from the generated data.

use arrow::array::{ArrayRef, Int64Array};
use frame_guard::locator::Violation;
use frame_guard::prelude::*;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

fn int_column(values: Vec<Option<i64>>) -> Frame {
    Frame::from_columns(vec![("x", Arc::new(Int64Array::from(values)) as ArrayRef)]).unwrap()
}

fn dense(values: &[i64]) -> Frame {
    int_column(values.iter().copied().map(Some).collect())
}

fn all_requirements() -> Vec<Monotonic> {
    [Direction::Increasing, Direction::Decreasing, Direction::Unspecified]
        .into_iter()
        .flat_map(|direction| [Monotonic::new(direction, false), Monotonic::new(direction, true)])
        .collect()
}

/// Sorted values containing at least one repeated neighbor.
fn sorted_with_repeat() -> impl Strategy<Value = Vec<i64>> {
    (prop::collection::vec(-1_000i64..1_000, 1..40), any::<prop::sample::Index>()).prop_map(
        |(mut values, at)| {
            let repeated = values[at.index(values.len())];
            values.push(repeated);
            values.sort_unstable();
            values
        },
    )
}

/// Strictly increasing values.
fn strictly_increasing() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(-1_000i64..1_000, 2..40)
        .prop_map(|values| values.into_iter().collect())
}

// ============================================================================
// Monotonicity
// ============================================================================

proptest! {
    #[test]
    fn prop_short_columns_are_monotonic(value in proptest::option::of(any::<i64>()), single in any::<bool>()) {
        let frame = if single { int_column(vec![value]) } else { int_column(vec![]) };
        for requirement in all_requirements() {
            prop_assert!(frame.is_monotonic(None, requirement).is_ok());
        }
    }

    #[test]
    fn prop_repeats_fail_only_strict_checks(values in sorted_with_repeat()) {
        let ascending = dense(&values);
        prop_assert!(ascending.is_monotonic(None, Monotonic::increasing()).is_ok());
        prop_assert!(ascending.is_monotonic(None, Monotonic::increasing().strict()).is_err());

        let reversed: Vec<i64> = values.iter().rev().copied().collect();
        let descending = dense(&reversed);
        prop_assert!(descending.is_monotonic(None, Monotonic::decreasing()).is_ok());
        prop_assert!(descending.is_monotonic(None, Monotonic::decreasing().strict()).is_err());
    }

    #[test]
    fn prop_unspecified_direction_accepts_either_order(values in strictly_increasing()) {
        let reversed: Vec<i64> = values.iter().rev().copied().collect();
        for frame in [dense(&values), dense(&reversed)] {
            prop_assert!(frame.is_monotonic(None, Monotonic::either()).is_ok());
            prop_assert!(frame.is_monotonic(None, Monotonic::either().strict()).is_ok());
        }
    }

    #[test]
    fn prop_unordered_columns_fail_unspecified(values in strictly_increasing()) {
        prop_assume!(values.len() >= 3);
        // rise then fall
        let mut zigzag = values.clone();
        zigzag.swap(0, 1);
        let frame = dense(&zigzag);
        prop_assert!(frame.is_monotonic(None, Monotonic::either()).is_err());
        prop_assert!(frame.is_monotonic(None, Monotonic::either().strict()).is_err());
    }
}

// ============================================================================
// Range, uniqueness, completeness
// ============================================================================

proptest! {
    #[test]
    fn prop_range_is_inclusive(lower in -1_000i64..1_000, width in 0i64..1_000) {
        let upper = lower + width;
        let bounds = (Value::Int(lower), Value::Int(upper));

        let inside = dense(&[lower, upper]);
        prop_assert!(inside.within_range(&[("x", bounds.clone())]).is_ok());

        for outside in [lower - 1, upper + 1] {
            let frame = dense(&[outside]);
            prop_assert!(frame.within_range(&[("x", bounds.clone())]).is_err());
        }
    }

    #[test]
    fn prop_duplicate_labels_are_reported(labels in prop::collection::vec(0i64..20, 0..30)) {
        let batch = dense(&labels).batch().clone();
        let frame = Frame::with_index(batch, RowIndex::new(labels.iter().copied())).unwrap();

        let mut seen = HashSet::new();
        let expected: BTreeSet<IndexLabel> = labels
            .iter()
            .filter(|label| !seen.insert(**label))
            .map(|label| IndexLabel::Int(*label))
            .collect();

        match frame.unique_index() {
            Ok(checked) => {
                prop_assert!(expected.is_empty());
                prop_assert!(std::ptr::eq(checked, &frame));
            }
            Err(err) => prop_assert_eq!(err.violation(), Some(&Violation::Duplicates(expected))),
        }
    }

    #[test]
    fn prop_every_missing_cell_is_located(values in prop::collection::vec(proptest::option::of(-5i64..5), 0..50)) {
        let frame = int_column(values.clone());
        let missing = values.iter().filter(|v| v.is_none()).count();
        match frame.none_missing(None) {
            Ok(_) => prop_assert_eq!(missing, 0),
            Err(err) => prop_assert_eq!(err.violation().map(Violation::count), Some(missing)),
        }
    }

    #[test]
    fn prop_outlier_multiplier_is_monotone(values in prop::collection::vec(-100i64..100, 2..40), n in 0.5f64..4.0) {
        // anything that passes a tighter bound passes a looser one
        let frame = dense(&values);
        if frame.within_n_std(Some(n)).is_ok() {
            prop_assert!(frame.within_n_std(Some(n + 1.0)).is_ok());
        }
    }
}
