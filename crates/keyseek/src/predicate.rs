//! Predicate trees handed to a lookup.
//!
//! A [`Predicate`] is an immutable tree of single-column [`Comparison`]s
//! joined by `And`/`Or`, plus opaque [`RawClause`] leaves carried over from
//! caller filters. Trees are built once per lookup and never shared.

use std::fmt;

use crate::op::Op;
use crate::record::Record;
use crate::value::{Scalar, Value};

/// A single `column op value` test.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// The column to compare.
    pub column: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: Scalar,
}

impl Comparison {
    /// Creates a new comparison.
    pub fn new(column: impl Into<String>, op: Op, value: impl Into<Scalar>) -> Self {
        Comparison {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluates this comparison against a column value.
    ///
    /// A missing value or a kind mismatch never matches.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        field_value
            .compare_scalar(&self.value)
            .is_some_and(|ordering| self.op.eval_ordering(ordering))
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op, self.value)
    }
}

/// A pre-built condition fragment with its positional parameters.
///
/// The fragment is opaque: keyseek never parses it, it only carries it to
/// the lookup and splices it into rendered SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClause {
    /// The condition text, with one `?` per parameter.
    pub sql: String,
    /// Parameters bound to the `?` placeholders, in order.
    pub params: Vec<Scalar>,
}

impl RawClause {
    /// Creates a clause without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        RawClause {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends a positional parameter.
    pub fn bind(mut self, value: impl Into<Scalar>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Returns `true` if the fragment is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.sql.trim().is_empty()
    }
}

/// A boolean expression over record columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A single-column comparison.
    Comparison(Comparison),
    /// True when every child is true. Empty is true.
    And(Vec<Predicate>),
    /// True when any child is true. Empty is false.
    Or(Vec<Predicate>),
    /// An opaque caller-supplied condition.
    Raw(RawClause),
}

impl Predicate {
    /// Shorthand for a comparison leaf.
    pub fn compare(column: impl Into<String>, op: Op, value: impl Into<Scalar>) -> Self {
        Predicate::Comparison(Comparison::new(column, op, value))
    }

    /// Evaluates the tree against a record.
    ///
    /// Returns `None` if the tree contains a [`Predicate::Raw`] leaf, which
    /// only the storage engine can interpret.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> Option<bool> {
        match self {
            Predicate::Comparison(cmp) => Some(cmp.matches(&record.field_value(&cmp.column))),
            Predicate::And(children) => children
                .iter()
                .map(|child| child.matches(record))
                .collect::<Option<Vec<_>>>()
                .map(|results| results.into_iter().all(|b| b)),
            Predicate::Or(children) => children
                .iter()
                .map(|child| child.matches(record))
                .collect::<Option<Vec<_>>>()
                .map(|results| results.into_iter().any(|b| b)),
            Predicate::Raw(_) => None,
        }
    }

    /// Returns the first raw clause in depth-first order.
    pub fn first_raw(&self) -> Option<&RawClause> {
        match self {
            Predicate::Comparison(_) => None,
            Predicate::And(children) | Predicate::Or(children) => {
                children.iter().find_map(Predicate::first_raw)
            }
            Predicate::Raw(raw) => Some(raw),
        }
    }
}

impl From<Comparison> for Predicate {
    fn from(cmp: Comparison) -> Self {
        Predicate::Comparison(cmp)
    }
}

impl From<RawClause> for Predicate {
    fn from(raw: RawClause) -> Self {
        Predicate::Raw(raw)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(")")
        }

        match self {
            Predicate::Comparison(cmp) => write!(f, "{cmp}"),
            Predicate::And(children) => join(f, children, " AND "),
            Predicate::Or(children) => join(f, children, " OR "),
            Predicate::Raw(raw) => write!(f, "({})", raw.sql),
        }
    }
}
