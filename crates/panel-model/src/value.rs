//! Linking variables and their comparable values.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single comparable cell of a linking variable.
///
/// Ordering is total: numbers first (IEEE total order), then text
/// (lexicographic), then missing values last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LinkValue {
    /// Absent value.
    Missing,
    /// Numeric value.
    Number(f64),
    /// Categorical value compared lexicographically.
    Text(String),
}

impl LinkValue {
    fn kind_rank(&self) -> u8 {
        match self {
            LinkValue::Number(_) => 0,
            LinkValue::Text(_) => 1,
            LinkValue::Missing => 2,
        }
    }

    /// Returns the numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LinkValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true for [`LinkValue::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, LinkValue::Missing)
    }
}

impl Ord for LinkValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LinkValue::Number(a), LinkValue::Number(b)) => a.total_cmp(b),
            (LinkValue::Text(a), LinkValue::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for LinkValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LinkValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LinkValue {}

impl fmt::Display for LinkValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkValue::Missing => f.write_str("NA"),
            LinkValue::Number(v) => write!(f, "{v}"),
            LinkValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for LinkValue {
    /// NaN becomes [`LinkValue::Missing`].
    fn from(value: f64) -> Self {
        if value.is_nan() {
            LinkValue::Missing
        } else {
            LinkValue::Number(value)
        }
    }
}

impl From<i64> for LinkValue {
    fn from(value: i64) -> Self {
        LinkValue::Number(value as f64)
    }
}

impl From<&str> for LinkValue {
    fn from(value: &str) -> Self {
        LinkValue::Text(value.to_string())
    }
}

impl From<String> for LinkValue {
    fn from(value: String) -> Self {
        LinkValue::Text(value)
    }
}

impl<T: Into<LinkValue>> From<Option<T>> for LinkValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(LinkValue::Missing, Into::into)
    }
}

/// One dataset's linking column: a name and its values in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkingVariable {
    pub name: String,
    pub values: Vec<LinkValue>,
}

impl LinkingVariable {
    /// Create a linking variable from any values convertible to [`LinkValue`].
    pub fn new<V>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<LinkValue>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of rows in the source dataset.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a 0-based row index.
    pub fn value(&self, row: usize) -> Option<&LinkValue> {
        self.values.get(row)
    }
}
