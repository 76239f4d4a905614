//! Row identifiers.

use super::Value;
use crate::prelude::*;
use arrow::array::Array;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// The identifier of a single row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexLabel {
    /// Integer label, the default for positional indexes
    Int(i64),
    /// String label
    Str(String),
}

impl fmt::Display for IndexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexLabel::Int(v) => write!(f, "{v}"),
            IndexLabel::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for IndexLabel {
    fn from(v: i64) -> Self {
        IndexLabel::Int(v)
    }
}

impl From<i32> for IndexLabel {
    fn from(v: i32) -> Self {
        IndexLabel::Int(v as i64)
    }
}

impl From<&str> for IndexLabel {
    fn from(v: &str) -> Self {
        IndexLabel::Str(v.to_string())
    }
}

impl From<String> for IndexLabel {
    fn from(v: String) -> Self {
        IndexLabel::Str(v)
    }
}

impl TryFrom<Value> for IndexLabel {
    type Error = GuardError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Int(v) => Ok(IndexLabel::Int(v)),
            Value::Utf8(v) => Ok(IndexLabel::Str(v)),
            other => Err(GuardError::type_mismatch(
                "integer or string index label",
                other.kind(),
            )),
        }
    }
}

/// The ordered sequence of row identifiers of a table.
///
/// Labels are not required to be unique; see
/// [`unique_index`](crate::checks::unique_index).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowIndex {
    labels: Vec<IndexLabel>,
}

impl RowIndex {
    /// Creates an index from explicit labels.
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<IndexLabel>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the positional index `0..len`.
    pub fn range(len: usize) -> Self {
        Self {
            labels: (0..len as i64).map(IndexLabel::Int).collect(),
        }
    }

    /// Builds an index from the values of an integer or string column.
    ///
    /// Null labels are rejected.
    pub fn from_array(array: &dyn Array) -> Result<Self> {
        let labels = Value::collect(array)?
            .into_iter()
            .map(IndexLabel::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels })
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at position `row`.
    pub fn get(&self, row: usize) -> Option<&IndexLabel> {
        self.labels.get(row)
    }

    /// Returns the labels in row order.
    pub fn labels(&self) -> &[IndexLabel] {
        &self.labels
    }

    /// Iterates over the labels in row order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexLabel> {
        self.labels.iter()
    }

    /// Returns the set of labels occurring more than once.
    pub fn duplicates(&self) -> BTreeSet<IndexLabel> {
        let mut seen = HashSet::with_capacity(self.labels.len());
        self.labels
            .iter()
            .filter(|label| !seen.insert(*label))
            .cloned()
            .collect()
    }

    /// Returns true if every label occurs exactly once.
    pub fn is_unique(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.labels.len());
        self.labels.iter().all(|label| seen.insert(label))
    }
}

impl<L: Into<IndexLabel>> FromIterator<L> for RowIndex {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self::new(iter)
    }
}
