//! Scalar cell values read out of Arrow columns.

use crate::prelude::*;
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single cell value.
///
/// Integers of every width widen into [`Value::Int`] (or [`Value::UInt`] for
/// `u64`), floats and decimals into [`Value::Float`], and temporal columns
/// into their underlying integer representation. Dictionary columns read as
/// their decoded values. Comparisons between integers and floats
/// are numeric; any other cross-kind comparison is a type mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A null cell
    Null,
    /// Boolean value
    Boolean(bool),
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value that does not fit into `i64`
    UInt(u64),
    /// Floating point value
    Float(f64),
    /// String value
    Utf8(String),
}

impl Value {
    /// Reads the value at `row` out of `array`.
    pub fn from_array(array: &dyn Array, row: usize) -> Result<Self> {
        if row >= array.len() {
            return Err(GuardError::Misaligned {
                expected: array.len(),
                found: row + 1,
            });
        }
        if array.is_null(row) {
            return Ok(Value::Null);
        }

        let value = match array.data_type() {
            DataType::Null => Value::Null,
            DataType::Boolean => Value::Boolean(array.as_boolean().value(row)),
            DataType::Int8 => Value::Int(array.as_primitive::<Int8Type>().value(row) as i64),
            DataType::Int16 => Value::Int(array.as_primitive::<Int16Type>().value(row) as i64),
            DataType::Int32 => Value::Int(array.as_primitive::<Int32Type>().value(row) as i64),
            DataType::Int64 => Value::Int(array.as_primitive::<Int64Type>().value(row)),
            DataType::UInt8 => Value::Int(array.as_primitive::<UInt8Type>().value(row) as i64),
            DataType::UInt16 => Value::Int(array.as_primitive::<UInt16Type>().value(row) as i64),
            DataType::UInt32 => Value::Int(array.as_primitive::<UInt32Type>().value(row) as i64),
            DataType::UInt64 => {
                let v = array.as_primitive::<UInt64Type>().value(row);
                i64::try_from(v).map_or(Value::UInt(v), Value::Int)
            }
            DataType::Float32 => {
                Value::Float(array.as_primitive::<Float32Type>().value(row) as f64)
            }
            DataType::Float64 => Value::Float(array.as_primitive::<Float64Type>().value(row)),
            DataType::Utf8 => Value::Utf8(array.as_string::<i32>().value(row).to_string()),
            DataType::LargeUtf8 => Value::Utf8(array.as_string::<i64>().value(row).to_string()),
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
                let ints = cast(&array.slice(row, 1), &DataType::Int64)?;
                Value::Int(ints.as_primitive::<Int64Type>().value(0))
            }
            DataType::Decimal128(_, _) | DataType::Decimal256(_, _) => {
                let floats = cast(&array.slice(row, 1), &DataType::Float64)?;
                Value::Float(floats.as_primitive::<Float64Type>().value(0))
            }
            DataType::Dictionary(_, value_type) => {
                let decoded = cast(&array.slice(row, 1), value_type)?;
                return Self::from_array(decoded.as_ref(), 0);
            }
            other => {
                return Err(GuardError::NotSupported(format!(
                    "reading cell values of type {other}"
                )))
            }
        };
        Ok(value)
    }

    /// Reads every value of `array` in row order.
    pub fn collect(array: &dyn Array) -> Result<Vec<Self>> {
        (0..array.len())
            .map(|row| Self::from_array(array, row))
            .collect()
    }

    /// Returns a short name for the kind of this value.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Utf8(_) => "string",
        }
    }

    /// Returns true for null cells and floating point NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::UInt(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_) | Value::Float(_))
    }

    /// Orders `self` against `other`.
    ///
    /// Returns `Ok(None)` when either side is null or NaN, since such values
    /// have no position in an ordering. Comparing values of incompatible kinds
    /// (a string with a number, say) is an error rather than a coercion.
    pub fn compare(&self, other: &Value) -> Result<Option<Ordering>> {
        let ordering = match (self, other) {
            (Value::Null, _) | (_, Value::Null) => None,
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Utf8(a), Value::Utf8(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::UInt(a), Value::UInt(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::UInt(b)) => Some(compare_signed_unsigned(*a, *b)),
            (Value::UInt(a), Value::Int(b)) => Some(compare_signed_unsigned(*b, *a).reverse()),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => x.partial_cmp(&y),
                    _ => None,
                }
            }
            (a, b) => return Err(GuardError::type_mismatch(a.kind(), b.kind())),
        };
        Ok(ordering)
    }

    /// Equality used for set membership.
    ///
    /// Numbers compare by numeric value across integer and float kinds,
    /// missing values (null and NaN) match each other, and values of
    /// unrelated kinds never match.
    pub fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (a, b) if a.is_missing() || b.is_missing() => a.is_missing() && b.is_missing(),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                matches!(a.compare(b), Ok(Some(Ordering::Equal)))
            }
            (a, b) => a == b,
        }
    }
}

fn compare_signed_unsigned(signed: i64, unsigned: u64) -> Ordering {
    if signed < 0 {
        Ordering::Less
    } else {
        (signed as u64).cmp(&unsigned)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Utf8(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::UInt(v), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
