//! Caller filters and their merge with the seek predicate.

use crate::op::Op;
use crate::predicate::{Predicate, RawClause};
use crate::value::Scalar;

/// An additional restriction on the navigated result set.
///
/// Must be the same filter that produced the result set, or the computed
/// neighbor is meaningless.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Column equalities, kept in insertion order.
    Equals(Vec<(String, Scalar)>),
    /// An opaque pre-built condition with positional parameters.
    Raw(RawClause),
    /// A raw condition further restricted by column equalities.
    Mixed {
        raw: RawClause,
        equals: Vec<(String, Scalar)>,
    },
}

impl Filter {
    /// Starts an equality filter with one column.
    ///
    /// ```
    /// use keyseek::Filter;
    ///
    /// let filter = Filter::eq("author_id", 1).and_eq("published", true);
    /// assert_eq!(filter.to_predicate().unwrap().to_string(), "(author_id = 1 AND published = true)");
    /// ```
    pub fn eq(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Filter::Equals(vec![(column.into(), value.into())])
    }

    /// Adds another equality.
    ///
    /// The raw fragment of a raw filter is never rewritten. The equality is
    /// kept as its own comparison, so its column is checked like any other.
    pub fn and_eq(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        let pair = (column.into(), value.into());
        match self {
            Filter::Equals(mut pairs) => {
                pairs.push(pair);
                Filter::Equals(pairs)
            }
            Filter::Raw(raw) if raw.is_blank() => Filter::Equals(vec![pair]),
            Filter::Raw(raw) => Filter::Mixed {
                raw,
                equals: vec![pair],
            },
            Filter::Mixed { raw, mut equals } => {
                equals.push(pair);
                Filter::Mixed { raw, equals }
            }
        }
    }

    /// Creates a raw filter from a condition fragment.
    pub fn raw(clause: RawClause) -> Self {
        Filter::Raw(clause)
    }

    /// Normalizes the filter into a predicate.
    ///
    /// An empty equality list or a blank raw clause restricts nothing and
    /// yields `None`. A single equality yields the bare comparison. A mixed
    /// filter yields the raw clause first, then its equalities.
    pub fn to_predicate(&self) -> Option<Predicate> {
        let (raw, pairs) = match self {
            Filter::Equals(pairs) => (None, pairs.as_slice()),
            Filter::Raw(raw) => (Some(raw), &[][..]),
            Filter::Mixed { raw, equals } => (Some(raw), equals.as_slice()),
        };

        let mut conjuncts: Vec<Predicate> = raw
            .filter(|raw| !raw.is_blank())
            .map(|raw| Predicate::Raw(raw.clone()))
            .into_iter()
            .chain(equalities(pairs))
            .collect();
        match conjuncts.len() {
            0 => None,
            1 => conjuncts.pop(),
            _ => Some(Predicate::And(conjuncts)),
        }
    }
}

fn equalities(pairs: &[(String, Scalar)]) -> impl Iterator<Item = Predicate> + '_ {
    pairs
        .iter()
        .map(|(column, value)| Predicate::compare(column.clone(), Op::Eq, value.clone()))
}

impl<K, V> FromIterator<(K, V)> for Filter
where
    K: Into<String>,
    V: Into<Scalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Filter::Equals(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<RawClause> for Filter {
    fn from(clause: RawClause) -> Self {
        Filter::Raw(clause)
    }
}

/// Conjoins a caller filter with the seek predicate.
///
/// `None` means "no restriction". The filter is only read.
pub fn merge(filter: Option<&Filter>, seek: Option<Predicate>) -> Option<Predicate> {
    match (filter.and_then(Filter::to_predicate), seek) {
        (Some(filter), Some(seek)) => Some(Predicate::And(vec![filter, seek])),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}
