//! Order specifications.
//!
//! An [`OrderSpec`] is the normalized form of whatever order description the
//! caller used to produce the result set being navigated. Normalization
//! guarantees a total order: the tie-breaker column from [`SeekConfig`] is
//! appended (ascending) when the caller did not name it.

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SeekConfig;
use crate::error::{Result, SeekError};
use crate::record::Record;
use crate::value::{compare_values, Value};

static SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<column>\S+)(?:\s+(?P<dir>asc|desc))?$").expect("segment pattern")
});

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the SQL keyword for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }

    fn parse(token: &str) -> Option<Dir> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Dir::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Dir::Desc)
        } else {
            None
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of an order, with its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The column to sort by.
    pub column: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates an ascending entry.
    pub fn asc(column: impl Into<String>) -> Self {
        OrderBy::new(column, Dir::Asc)
    }

    /// Creates a descending entry.
    pub fn desc(column: impl Into<String>) -> Self {
        OrderBy::new(column, Dir::Desc)
    }

    /// Creates an entry with the given direction.
    pub fn new(column: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            column: column.into(),
            dir,
        }
    }

    /// Returns this entry with its direction flipped.
    pub fn reversed(&self) -> OrderBy {
        OrderBy::new(self.column.clone(), self.dir.reversed())
    }

    /// Compares two column values under this entry's direction.
    ///
    /// Missing values sort last regardless of direction. Returns `None` on a
    /// kind mismatch or NaN.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        match (a, b) {
            (Value::None, Value::None) => Some(Ordering::Equal),
            (Value::None, _) => Some(Ordering::Greater),
            (_, Value::None) => Some(Ordering::Less),
            _ => compare_values(a, b).map(|ordering| self.dir.apply(ordering)),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.dir)
    }
}

/// An order description as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOrder {
    /// Delimited `"column [ASC|DESC]"` segments, e.g. `"author_id DESC, id"`.
    Text(String),
    /// An already-structured list of entries.
    Columns(Vec<OrderBy>),
}

impl From<&str> for RawOrder {
    fn from(raw: &str) -> Self {
        RawOrder::Text(raw.to_string())
    }
}

impl From<String> for RawOrder {
    fn from(raw: String) -> Self {
        RawOrder::Text(raw)
    }
}

impl From<Vec<OrderBy>> for RawOrder {
    fn from(columns: Vec<OrderBy>) -> Self {
        RawOrder::Columns(columns)
    }
}

/// A normalized, total order over a collection.
///
/// Non-empty, column names unique, and always containing the configured
/// tie-breaker column. Entries are in priority order, first highest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    columns: Vec<OrderBy>,
}

impl OrderSpec {
    /// Parses a delimited order description.
    ///
    /// ```
    /// use keyseek::{OrderSpec, SeekConfig};
    ///
    /// let spec = OrderSpec::parse("author_id desc", &SeekConfig::default()).unwrap();
    /// assert_eq!(spec.to_string(), "author_id DESC, id ASC");
    /// ```
    pub fn parse(raw: &str, config: &SeekConfig) -> Result<OrderSpec> {
        if raw.trim().is_empty() {
            return Err(SeekError::invalid_order("empty order description"));
        }

        let columns = raw
            .split(config.delimiter)
            .map(|segment| parse_segment(segment.trim()))
            .collect::<Result<Vec<_>>>()?;

        Self::from_columns(columns, config)
    }

    /// Normalizes an already-structured list of entries.
    pub fn from_columns(columns: Vec<OrderBy>, config: &SeekConfig) -> Result<OrderSpec> {
        if columns.is_empty() {
            return Err(SeekError::invalid_order("empty order description"));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(columns.len());
        for entry in &columns {
            if entry.column.trim().is_empty() {
                return Err(SeekError::invalid_order("order segment names an empty column"));
            }
            if seen.contains(&entry.column.as_str()) {
                return Err(SeekError::invalid_order(format!(
                    "column '{}' is ordered on twice",
                    entry.column
                )));
            }
            seen.push(&entry.column);
        }

        let mut spec = OrderSpec { columns };
        if !spec.contains(&config.tie_breaker) {
            spec.columns.push(OrderBy::asc(config.tie_breaker.clone()));
        }
        Ok(spec)
    }

    /// Normalizes either form of caller input.
    pub fn from_raw(raw: &RawOrder, config: &SeekConfig) -> Result<OrderSpec> {
        match raw {
            RawOrder::Text(text) => Self::parse(text, config),
            RawOrder::Columns(columns) => Self::from_columns(columns.clone(), config),
        }
    }

    /// The default order: the tie-breaker column alone, ascending.
    pub fn tie_breaker_only(config: &SeekConfig) -> OrderSpec {
        OrderSpec {
            columns: vec![OrderBy::asc(config.tie_breaker.clone())],
        }
    }

    /// Returns the entries in priority order.
    pub fn columns(&self) -> &[OrderBy] {
        &self.columns
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no entries. Never the case once normalized.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns `true` if `column` is one of the entries.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|entry| entry.column == column)
    }

    /// Returns the order with every direction flipped.
    pub fn reversed(&self) -> OrderSpec {
        OrderSpec {
            columns: self.columns.iter().map(OrderBy::reversed).collect(),
        }
    }

    /// Compares two records lexicographically under this order.
    ///
    /// Columns that cannot be compared (kind mismatch, NaN) count as equal
    /// and fall through to the next entry.
    pub fn compare<A, B>(&self, a: &A, b: &B) -> Ordering
    where
        A: Record + ?Sized,
        B: Record + ?Sized,
    {
        for entry in &self.columns {
            let left = a.field_value(&entry.column);
            let right = b.field_value(&entry.column);
            match entry.compare(&left, &right) {
                Some(Ordering::Equal) | None => continue,
                Some(ordering) => return ordering,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

fn parse_segment(segment: &str) -> Result<OrderBy> {
    if segment.is_empty() || Dir::parse(segment).is_some() {
        return Err(SeekError::invalid_order("order segment names an empty column"));
    }

    let caps = SEGMENT.captures(segment).ok_or_else(|| {
        SeekError::invalid_order(format!("cannot read order segment '{segment}'"))
    })?;

    let dir = caps
        .name("dir")
        .and_then(|m| Dir::parse(m.as_str()))
        .unwrap_or_default();

    Ok(OrderBy::new(&caps["column"], dir))
}
