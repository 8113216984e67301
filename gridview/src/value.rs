//! Cell values extracted from rows by column accessors.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// A dynamic value produced by a column accessor.
///
/// Accessors never fail: a field that is missing from a partial record is
/// reported as [`CellValue::Empty`], which displays as an empty cell, sorts
/// after every other value in ascending order, and matches no structured
/// filter except [`Filter::IsEmpty`](crate::Filter::IsEmpty).
///
/// # Type Mapping
///
/// | Source | Variant |
/// |--------|---------|
/// | missing / null | `Empty` |
/// | flag | `Bool` |
/// | integer count | `Int` |
/// | ratio / measurement | `Float` |
/// | price / money | `Decimal` |
/// | name, code, status | `Text` |
/// | timestamp | `DateTime` |
///
/// # Example
///
/// ```
/// use gridview::CellValue;
///
/// let title = CellValue::from("Summer sale");
/// let stock = CellValue::from(42i64);
/// let missing = CellValue::from(None::<String>);
/// assert!(missing.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing or null value.
    #[default]
    Empty,
    /// Boolean flag.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// Text value.
    Text(String),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Returns `true` if this is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Decimal(_) => "decimal",
            CellValue::Text(_) => "text",
            CellValue::DateTime(_) => "datetime",
        }
    }

    /// Returns the text content if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a decimal if it is numeric.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CellValue::Int(v) => Some(Decimal::from(*v)),
            CellValue::Float(v) => Decimal::from_f64(*v),
            CellValue::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Decimal(v) => v.to_f64(),
            _ => None,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_)
        )
    }

    /// Rank used to order values of different kinds deterministically.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_) => 1,
            CellValue::DateTime(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Empty => 4,
        }
    }

    /// Compares two values in their natural order.
    ///
    /// Text compares case-insensitively first and falls back to an exact
    /// comparison so that the order is total. Numbers compare numerically
    /// across integer, float and decimal. `Empty` sorts after everything.
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Greater,
            (_, CellValue::Empty) => Ordering::Less,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => numeric_cmp(a, b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    /// Loose equality used by structured filters.
    ///
    /// Text matches case-insensitively and numbers match across numeric
    /// kinds. `Empty` never equals anything.
    pub fn loosely_equals(&self, other: &CellValue) -> bool {
        match (self, other) {
            (CellValue::Empty, _) | (_, CellValue::Empty) => false,
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase() == b.to_lowercase(),
            (a, b) if a.is_numeric() && b.is_numeric() => numeric_cmp(a, b) == Ordering::Equal,
            (a, b) => a == b,
        }
    }

    /// Parses user input into the most specific value it represents.
    ///
    /// Recognizes booleans, integers, decimals, RFC 3339 timestamps and
    /// `YYYY-MM-DD` dates (midnight UTC). Anything else is text; an empty
    /// string is `Empty`.
    pub fn parse(input: &str) -> CellValue {
        let input = input.trim();
        if input.is_empty() {
            return CellValue::Empty;
        }
        match input.to_ascii_lowercase().as_str() {
            "true" | "yes" => return CellValue::Bool(true),
            "false" | "no" => return CellValue::Bool(false),
            _ => {}
        }
        if let Ok(v) = input.parse::<i64>() {
            return CellValue::Int(v);
        }
        if let Ok(v) = Decimal::from_str(input) {
            return CellValue::Decimal(v);
        }
        if let Ok(v) = DateTime::parse_from_rfc3339(input) {
            return CellValue::DateTime(v.with_timezone(&Utc));
        }
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
        {
            return CellValue::DateTime(midnight.and_utc());
        }
        CellValue::Text(input.to_string())
    }
}

fn numeric_cmp(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
        _ => match (a.as_decimal(), b.as_decimal()) {
            (Some(a), Some(b)) => a.cmp(&b),
            // Floats outside the decimal range (NaN, infinities).
            _ => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        },
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => write!(f, "Yes"),
            CellValue::Bool(false) => write!(f, "No"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Decimal(v) => write!(f, "{v}"),
            CellValue::Text(v) => write!(f, "{v}"),
            CellValue::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M")),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<Decimal> for CellValue {
    fn from(v: Decimal) -> Self {
        CellValue::Decimal(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(v: &String) -> Self {
        CellValue::Text(v.clone())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}
