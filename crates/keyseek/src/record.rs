//! Column access for anchors and rows.
//!
//! [`Record`] is the only thing the seek builder needs from a domain object:
//! a way to read a column by name. It is usually derived with
//! `#[derive(Record)]` (feature `macros`), but a manual impl is a plain match.

use std::collections::{BTreeMap, HashMap};

use crate::value::{Scalar, Timestamp, Value};

/// A record whose columns can be read by name.
///
/// # Derive Usage
///
/// ```ignore
/// use keyseek::Record;
///
/// #[derive(Record)]
/// struct Article {
///     #[column(Number)]
///     id: u64,
///     #[column(Number)]
///     author_id: u64,
///     #[column(skip)]
///     body: String,
/// }
///
/// assert_eq!(Article::AUTHOR_ID, "author_id");
/// ```
///
/// # Manual Implementation
///
/// ```
/// use keyseek::{Number, Record, Value};
///
/// struct Article {
///     id: u64,
///     title: String,
/// }
///
/// impl Record for Article {
///     fn field_value(&self, column: &str) -> Value<'_> {
///         match column {
///             "id" => Value::Number(Number::U64(self.id)),
///             "title" => Value::String(&self.title),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of `column`, or [`Value::None`] when the record has
    /// no such column.
    ///
    /// The value must be of the kind the lookup compares that column with.
    fn field_value(&self, column: &str) -> Value<'_>;
}

impl<T: Record + ?Sized> Record for &T {
    fn field_value(&self, column: &str) -> Value<'_> {
        (**self).field_value(column)
    }
}

impl Record for BTreeMap<String, Scalar> {
    fn field_value(&self, column: &str) -> Value<'_> {
        self.get(column).map_or(Value::None, Scalar::as_value)
    }
}

impl<S: std::hash::BuildHasher> Record for HashMap<String, Scalar, S> {
    fn field_value(&self, column: &str) -> Value<'_> {
        self.get(column).map_or(Value::None, Scalar::as_value)
    }
}

/// Converts an enum column to a stable discriminant.
///
/// Used by `#[column(Enum)]`. Discriminants define the sort order of the
/// column, so pick them explicitly.
///
/// ```
/// use keyseek::FieldEnum;
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Draft,
///     Published,
/// }
///
/// impl FieldEnum for Status {
///     fn discriminant(&self) -> u32 {
///         match self {
///             Status::Draft => 0,
///             Status::Published => 1,
///         }
///     }
/// }
/// ```
pub trait FieldEnum {
    /// Returns the discriminant of this variant.
    fn discriminant(&self) -> u32;
}

/// Converts a datetime column to a [`Timestamp`].
///
/// Used by `#[column(Timestamp)]`.
pub trait FieldTimestamp {
    /// Converts this value to a [`Timestamp`].
    fn timestamp(&self) -> Timestamp;
}

impl FieldTimestamp for i64 {
    fn timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl FieldTimestamp for Timestamp {
    fn timestamp(&self) -> Timestamp {
        *self
    }
}
