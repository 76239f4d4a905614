//! Locating violations.
//!
//! Checks mark bad cells in boolean masks aligned to the rows of the table
//! and hand them to the locator, which renders them into a [`Violation`].
//! The locator never knows why a cell is bad; it only reports where.
//!
//! Masks are combined with Arrow's boolean kernels, but only after their
//! lengths are checked explicitly. Null mask slots never mark a cell.

use crate::prelude::*;
use crate::table::{IndexLabel, RowIndex, Value};
use arrow::array::{Array, BooleanArray};
use arrow::compute;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A single bad cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellLocation {
    /// Row identifier of the cell
    pub row: IndexLabel,
    /// Column name of the cell
    pub column: String,
}

impl CellLocation {
    /// Creates a new cell location.
    pub fn new(row: impl Into<IndexLabel>, column: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The offending rows of one column, keyed by row identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesReport {
    /// Column the entries belong to
    pub column: String,
    /// `(row, value)` pairs in row order
    pub entries: Vec<(IndexLabel, Value)>,
}

impl SeriesReport {
    /// Returns the number of offending rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no rows are reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the row identifiers of the offending rows.
    pub fn rows(&self) -> impl Iterator<Item = &IndexLabel> {
        self.entries.iter().map(|(row, _)| row)
    }

    /// Returns the value reported for `row`.
    pub fn get(&self, row: &IndexLabel) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(label, _)| label == row)
            .map(|(_, value)| value)
    }
}

/// The payload of a validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Violation {
    /// Every bad `(row, column)` cell, row-major.
    Locations(Vec<CellLocation>),
    /// Offending rows of a single column.
    Series(SeriesReport),
    /// An expected-versus-actual description.
    Summary(String),
    /// Row identifiers that occur more than once.
    Duplicates(BTreeSet<IndexLabel>),
}

impl Violation {
    /// Returns how many cells, rows or labels the payload reports.
    ///
    /// A summary counts as one.
    pub fn count(&self) -> usize {
        match self {
            Violation::Locations(cells) => cells.len(),
            Violation::Series(series) => series.len(),
            Violation::Summary(_) => 1,
            Violation::Duplicates(labels) => labels.len(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Locations(cells) => {
                write!(f, "{} bad cell(s): ", cells.len())?;
                write_joined(f, cells.iter())
            }
            Violation::Series(series) => {
                write!(
                    f,
                    "{} bad row(s) in column '{}': ",
                    series.len(),
                    series.column
                )?;
                write_joined(
                    f,
                    series
                        .entries
                        .iter()
                        .map(|(row, value)| format!("{row}: {value}")),
                )
            }
            Violation::Summary(message) => write!(f, "{message}"),
            Violation::Duplicates(labels) => {
                write!(f, "duplicate index labels: ")?;
                write_joined(f, labels.iter())
            }
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

/// A boolean mask over the rows of one column. `true` marks a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMask {
    column: String,
    bits: BooleanArray,
}

impl ColumnMask {
    /// Creates a mask for `column`.
    pub fn new(column: impl Into<String>, bits: BooleanArray) -> Self {
        Self {
            column: column.into(),
            bits,
        }
    }

    /// Creates a mask by evaluating `marked` for every row position.
    pub fn from_fn(
        column: impl Into<String>,
        len: usize,
        marked: impl Fn(usize) -> bool,
    ) -> Self {
        let bits = (0..len).map(marked).collect::<Vec<_>>();
        Self::new(column, BooleanArray::from(bits))
    }

    /// Returns the column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the number of rows covered.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the mask covers no rows.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns true if `row` is marked. Null slots are unmarked.
    pub fn is_set(&self, row: usize) -> bool {
        row < self.bits.len() && self.bits.is_valid(row) && self.bits.value(row)
    }

    /// Returns true if any row is marked.
    pub fn any(&self) -> bool {
        self.bits.true_count() > 0
    }

    /// Returns the number of marked rows.
    pub fn count(&self) -> usize {
        self.bits.true_count()
    }

    /// Iterates over the positions of marked rows.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.bits.len()).filter(move |&row| self.is_set(row))
    }

    /// Marks rows marked in either mask.
    pub fn or(&self, other: &ColumnMask) -> Result<ColumnMask> {
        ensure_aligned(self.len(), other.len())?;
        Ok(Self::new(
            self.column.clone(),
            compute::or(&self.bits, &other.bits)?,
        ))
    }

    /// Marks rows marked in both masks.
    pub fn and(&self, other: &ColumnMask) -> Result<ColumnMask> {
        ensure_aligned(self.len(), other.len())?;
        Ok(Self::new(
            self.column.clone(),
            compute::and(&self.bits, &other.bits)?,
        ))
    }

    /// Marks exactly the rows this mask leaves unmarked, null slots included.
    pub fn invert(&self) -> ColumnMask {
        Self::from_fn(self.column.clone(), self.len(), |row| !self.is_set(row))
    }

    /// Renders the marked rows as a series keyed by row identifier.
    ///
    /// With `values`, each entry carries the cell's value; without, each
    /// entry is `true`.
    pub fn locate_series(
        &self,
        index: &RowIndex,
        values: Option<&dyn Array>,
    ) -> Result<SeriesReport> {
        ensure_aligned(index.len(), self.len())?;
        if let Some(values) = values {
            ensure_aligned(index.len(), values.len())?;
        }

        let entries = self
            .positions()
            .map(|row| {
                let label = index
                    .get(row)
                    .cloned()
                    .ok_or_else(|| GuardError::Internal(format!("row {row} outside index")))?;
                let value = match values {
                    Some(values) => Value::from_array(values, row)?,
                    None => Value::Boolean(true),
                };
                Ok((label, value))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SeriesReport {
            column: self.column.clone(),
            entries,
        })
    }
}

/// Masks over several columns, all aligned to the same rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationMask {
    len: usize,
    columns: Vec<ColumnMask>,
}

impl ViolationMask {
    /// Creates a mask over `len` rows. Every column mask must cover `len` rows.
    pub fn new(len: usize, columns: Vec<ColumnMask>) -> Result<Self> {
        for column in &columns {
            ensure_aligned(len, column.len())?;
        }
        Ok(Self { len, columns })
    }

    /// Builds a violation mask from masks marking cells that *pass* a
    /// predicate. Unmarked and null slots become violations.
    pub fn from_passing(len: usize, passing: Vec<ColumnMask>) -> Result<Self> {
        let columns = passing.iter().map(ColumnMask::invert).collect();
        Self::new(len, columns)
    }

    /// Returns the number of rows covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the mask covers no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the column masks in layout order.
    pub fn columns(&self) -> &[ColumnMask] {
        &self.columns
    }

    /// Returns true if any cell is marked.
    pub fn any(&self) -> bool {
        self.columns.iter().any(ColumnMask::any)
    }

    /// Returns the number of marked cells.
    pub fn count(&self) -> usize {
        self.columns.iter().map(ColumnMask::count).sum()
    }

    /// Marks cells marked in either mask. Both masks must have the same rows
    /// and the same column layout.
    pub fn or(&self, other: &ViolationMask) -> Result<ViolationMask> {
        ensure_aligned(self.len, other.len)?;
        if self.columns.len() != other.columns.len() {
            return Err(GuardError::Configuration(format!(
                "cannot combine masks over {} and {} columns",
                self.columns.len(),
                other.columns.len()
            )));
        }
        let columns = self
            .columns
            .iter()
            .zip(&other.columns)
            .map(|(left, right)| {
                if left.column != right.column {
                    return Err(GuardError::Configuration(format!(
                        "cannot combine mask for '{}' with mask for '{}'",
                        left.column, right.column
                    )));
                }
                left.or(right)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(self.len, columns)
    }

    /// Lists the marked cells, row-major: rows in index order, then columns
    /// in the mask's own layout order.
    pub fn locate(&self, index: &RowIndex) -> Result<Vec<CellLocation>> {
        ensure_aligned(index.len(), self.len)?;
        let mut cells = Vec::new();
        for (row, label) in index.iter().enumerate() {
            for column in &self.columns {
                if column.is_set(row) {
                    cells.push(CellLocation {
                        row: label.clone(),
                        column: column.column.clone(),
                    });
                }
            }
        }
        Ok(cells)
    }

    /// Locates the marked cells and wraps them as a [`Violation`].
    pub fn into_violation(self, index: &RowIndex) -> Result<Violation> {
        Ok(Violation::Locations(self.locate(index)?))
    }
}

fn ensure_aligned(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(GuardError::Misaligned { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::StringArray;

    fn mask(column: &str, bits: Vec<Option<bool>>) -> ColumnMask {
        ColumnMask::new(column, BooleanArray::from(bits))
    }

    #[test]
    fn test_locate_is_row_major_in_layout_order() {
        let index = RowIndex::new(["r0", "r1", "r2"]);
        let violations = ViolationMask::new(
            3,
            vec![
                mask("b", vec![Some(true), Some(false), Some(true)]),
                mask("a", vec![Some(true), Some(false), Some(false)]),
            ],
        )
        .unwrap();

        let cells = violations.locate(&index).unwrap();
        assert_eq!(
            cells,
            vec![
                CellLocation::new("r0", "b"),
                CellLocation::new("r0", "a"),
                CellLocation::new("r2", "b"),
            ]
        );
        assert_eq!(violations.count(), 3);
    }

    #[test]
    fn test_null_slots_are_unmarked() {
        let column = mask("a", vec![None, Some(true)]);
        assert!(!column.is_set(0));
        assert!(column.is_set(1));
        assert_eq!(column.positions().collect::<Vec<_>>(), vec![1]);
        assert!(column.invert().is_set(0));
    }

    #[test]
    fn test_misaligned_masks_are_rejected() {
        let result = ViolationMask::new(3, vec![mask("a", vec![Some(true)])]);
        assert!(matches!(
            result,
            Err(GuardError::Misaligned {
                expected: 3,
                found: 1
            })
        ));

        let short = mask("a", vec![Some(true)]);
        let long = mask("a", vec![Some(true), Some(false)]);
        assert!(short.or(&long).is_err());

        let violations = ViolationMask::new(1, vec![short]).unwrap();
        assert!(violations.locate(&RowIndex::range(2)).is_err());
    }

    #[test]
    fn test_mask_or() {
        let left = ViolationMask::new(2, vec![mask("a", vec![Some(true), Some(false)])]).unwrap();
        let right = ViolationMask::new(2, vec![mask("a", vec![Some(false), Some(true)])]).unwrap();
        let combined = left.or(&right).unwrap();
        assert_eq!(combined.count(), 2);

        let other = ViolationMask::new(2, vec![mask("b", vec![Some(false), Some(true)])]).unwrap();
        assert!(left.or(&other).is_err());
    }

    #[test]
    fn test_locate_series_with_values() {
        let index = RowIndex::new([10, 11, 12]);
        let grades = StringArray::from(vec!["A", "D", "C"]);
        let column = mask("grade", vec![Some(false), Some(true), Some(false)]);

        let series = column.locate_series(&index, Some(&grades)).unwrap();
        assert_eq!(series.column, "grade");
        assert_eq!(series.entries, vec![(IndexLabel::Int(11), Value::from("D"))]);
        assert_eq!(series.get(&IndexLabel::Int(11)), Some(&Value::from("D")));
    }

    #[test]
    fn test_locate_series_as_boolean_mask() {
        let index = RowIndex::range(3);
        let column = mask("x", vec![Some(true), Some(false), Some(true)]);
        let series = column.locate_series(&index, None).unwrap();
        assert_eq!(
            series.entries,
            vec![
                (IndexLabel::Int(0), Value::Boolean(true)),
                (IndexLabel::Int(2), Value::Boolean(true)),
            ]
        );
    }

    #[test]
    fn test_from_passing_inverts() {
        let passing = vec![mask("a", vec![Some(true), Some(false), None])];
        let violations = ViolationMask::from_passing(3, passing).unwrap();
        let cells = violations.locate(&RowIndex::range(3)).unwrap();
        assert_eq!(
            cells,
            vec![CellLocation::new(1, "a"), CellLocation::new(2, "a")]
        );
    }

    #[test]
    fn test_violation_display() {
        let cells = Violation::Locations(vec![CellLocation::new(0, "a"), CellLocation::new(3, "b")]);
        assert_eq!(cells.to_string(), "2 bad cell(s): [(0, a), (3, b)]");

        let series = Violation::Series(SeriesReport {
            column: "grade".to_string(),
            entries: vec![(IndexLabel::Int(1), Value::from("D"))],
        });
        assert_eq!(
            series.to_string(),
            "1 bad row(s) in column 'grade': [1: \"D\"]"
        );

        let dupes = Violation::Duplicates([IndexLabel::Int(2)].into_iter().collect());
        assert_eq!(dupes.to_string(), "duplicate index labels: [2]");
        assert_eq!(dupes.count(), 1);
    }

    #[test]
    fn test_violation_serializes_tagged() {
        let violation = Violation::Locations(vec![CellLocation::new(0, "a")]);
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["kind"], "locations");
        assert_eq!(json["detail"][0]["column"], "a");
        assert_eq!(json["detail"][0]["row"], 0);
    }
}
