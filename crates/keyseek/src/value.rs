//! Runtime value types for column reads and seek comparisons.
//!
//! [`Value`] is what a [`Record`](crate::Record) hands out when a column is
//! read: it borrows from the record. [`Scalar`] is the owned form kept inside
//! predicates and filters, which must outlive the anchor read.

use std::cmp::Ordering;
use std::fmt;

/// Column value borrowed from a record.
///
/// # Example
///
/// ```
/// use keyseek::{Number, Value};
///
/// struct Article {
///     id: u64,
///     title: String,
/// }
///
/// fn read<'a>(article: &'a Article, column: &str) -> Value<'a> {
///     match column {
///         "id" => Value::Number(Number::U64(article.id)),
///         "title" => Value::String(&article.title),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Enum discriminant value.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
    /// The record exposes no value for the column.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if the column had no readable value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Copies the value out of the record.
    ///
    /// Returns `None` for [`Value::None`].
    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            Value::String(s) => Some(Scalar::String((*s).to_string())),
            Value::Number(n) => Some(Scalar::Number(*n)),
            Value::Timestamp(t) => Some(Scalar::Timestamp(*t)),
            Value::Enum(d) => Some(Scalar::Enum(*d)),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::None => None,
        }
    }

    /// Compares this value with a stored scalar of the same kind.
    ///
    /// Returns `None` on a kind mismatch, a missing value or NaN.
    pub fn compare_scalar(&self, scalar: &Scalar) -> Option<Ordering> {
        compare_values(self, &scalar.as_value())
    }
}

/// Compares two values of the same kind.
///
/// Returns `None` if the kinds differ, either side is [`Value::None`], or a
/// float comparison hits NaN.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Owned column value stored in predicates, filters and SQL parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Timestamp value.
    Timestamp(Timestamp),
    /// Enum discriminant.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
}

impl Scalar {
    /// Borrows this scalar as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Scalar::String(s) => Value::String(s),
            Scalar::Number(n) => Value::Number(*n),
            Scalar::Timestamp(t) => Value::Timestamp(*t),
            Scalar::Enum(d) => Value::Enum(*d),
            Scalar::Bool(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{s:?}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Timestamp(t) => write!(f, "{}ms", t.0),
            Scalar::Enum(d) => write!(f, "#{d}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl From<Timestamp> for Scalar {
    fn from(t: Timestamp) -> Self {
        Scalar::Timestamp(t)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

macro_rules! scalar_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(n: $ty) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }
        )*
    };
}

scalar_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Numeric value.
///
/// Mixed integer kinds compare exactly. Anything involving a float goes
/// through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed kinds.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            // negative signed values sort below every unsigned one
            (Number::I64(a), Number::U64(b)) => Some(if a < 0 {
                Ordering::Less
            } else {
                (a as u64).cmp(&b)
            }),
            (Number::U64(a), Number::I64(b)) => Some(if b < 0 {
                Ordering::Greater
            } else {
                a.cmp(&(b as u64))
            }),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Timestamp as milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a timestamp from seconds since Unix epoch.
    ///
    /// Saturates at the `i64` millisecond range.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
