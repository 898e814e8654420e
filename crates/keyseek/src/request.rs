//! The query handed to a lookup.

use crate::direction::{resolve, Traversal};
use crate::error::Result;
use crate::filter::{merge, Filter};
use crate::order::OrderSpec;
use crate::predicate::Predicate;
use crate::record::Record;
use crate::seek::seek_predicate;

/// A single-row query: predicate, row order, limit.
///
/// Built fresh for every lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// Rows must satisfy this predicate. `None` restricts nothing.
    pub predicate: Option<Predicate>,
    /// Rows must come back in this order.
    pub order: OrderSpec,
    /// Maximum number of rows to return.
    pub limit: usize,
}

impl QueryRequest {
    /// Creates a request for the first row matching `predicate` under `order`.
    pub fn first(predicate: Option<Predicate>, order: OrderSpec) -> Self {
        QueryRequest {
            predicate,
            order,
            limit: 1,
        }
    }
}

/// Builds the neighbor request for `anchor`.
///
/// Resolves the traversal, reads the anchor's order columns, builds the seek
/// predicate and conjoins `filter` with it. Nothing is returned unless every
/// step succeeds.
///
/// ```
/// use std::collections::BTreeMap;
///
/// use keyseek::{build_request, Filter, OrderSpec, Scalar, SeekConfig, Traversal};
///
/// let anchor = BTreeMap::from([
///     ("id".to_string(), Scalar::from(5)),
///     ("author_id".to_string(), Scalar::from(1)),
/// ]);
/// let order = OrderSpec::parse("author_id", &SeekConfig::default()).unwrap();
/// let filter = Filter::eq("author_id", 1);
///
/// let request = build_request(&anchor, Traversal::Previous, &order, Some(&filter)).unwrap();
/// assert_eq!(request.order.to_string(), "author_id DESC, id DESC");
/// assert_eq!(request.limit, 1);
/// assert_eq!(
///     request.predicate.unwrap().to_string(),
///     "(author_id = 1 AND (author_id < 1 OR (author_id = 1 AND id < 5)))"
/// );
/// ```
pub fn build_request<A: Record + ?Sized>(
    anchor: &A,
    traversal: Traversal,
    order: &OrderSpec,
    filter: Option<&Filter>,
) -> Result<QueryRequest> {
    let resolved = resolve(order, traversal);
    let seek = seek_predicate(anchor, &resolved)?;
    Ok(QueryRequest::first(merge(filter, seek), resolved.effective))
}
