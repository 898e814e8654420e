//! Seek predicate construction.
//!
//! Expands the lexicographic tuple comparison
//! `(c1, c2, .., cn) op (v1, v2, .., vn)` into single-column comparisons:
//!
//! ```text
//! c1 op1 v1 OR (c1 = v1 AND (c2 op2 v2 OR (c2 = v2 AND (.. cn opn vn))))
//! ```
//!
//! Each column carries its own operator, so mixed ASC/DESC orders work.
//! Because every order ends in a unique tie-breaker, the expansion selects
//! exactly the rows strictly beyond the anchor and never the anchor itself.

use crate::direction::Resolved;
use crate::error::{Result, SeekError};
use crate::op::Op;
use crate::predicate::Predicate;
use crate::record::Record;
use crate::value::Scalar;

/// One `(column, operator, anchor value)` step of a seek.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekTerm {
    pub column: String,
    pub op: Op,
    pub value: Scalar,
}

impl SeekTerm {
    pub fn new(column: impl Into<String>, op: Op, value: impl Into<Scalar>) -> Self {
        SeekTerm {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

/// Builds the seek predicate from terms in priority order.
///
/// Returns `None` for an empty list.
pub fn build_seek(terms: Vec<SeekTerm>) -> Option<Predicate> {
    let mut terms = terms.into_iter().rev();
    let last = terms.next()?;
    let base = Predicate::compare(last.column, last.op, last.value);

    Some(terms.fold(base, |acc, term| {
        let tie = Predicate::And(vec![
            Predicate::compare(term.column.clone(), Op::Eq, term.value.clone()),
            acc,
        ]);
        Predicate::Or(vec![Predicate::compare(term.column, term.op, term.value), tie])
    }))
}

/// Reads the anchor's value for every resolved column.
///
/// Fails with [`SeekError::MissingAnchorValue`] on the first column the
/// anchor has no value for.
pub fn anchor_terms<A: Record + ?Sized>(anchor: &A, resolved: &Resolved) -> Result<Vec<SeekTerm>> {
    resolved
        .columns
        .iter()
        .map(|(column, op)| {
            let value = anchor.field_value(column).to_scalar().ok_or_else(|| {
                SeekError::MissingAnchorValue {
                    column: column.clone(),
                }
            })?;
            Ok(SeekTerm::new(column.clone(), *op, value))
        })
        .collect()
}

/// Builds the seek predicate selecting rows strictly beyond `anchor`.
pub fn seek_predicate<A: Record + ?Sized>(
    anchor: &A,
    resolved: &Resolved,
) -> Result<Option<Predicate>> {
    Ok(build_seek(anchor_terms(anchor, resolved)?))
}
