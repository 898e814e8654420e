//! Neighbor lookups.
//!
//! A [`Finder`] pairs a [`Lookup`] (the storage engine) with the order and
//! filter that produced the result set being navigated. Each call builds a
//! fresh [`QueryRequest`] and issues exactly one lookup with a limit of one.
//!
//! The order and filter given to a finder must match the ones used to
//! produce the navigated result set. This is not checked.

use tracing::{debug, trace};

use crate::config::SeekConfig;
use crate::direction::Traversal;
use crate::error::SeekError;
use crate::filter::Filter;
use crate::order::{OrderSpec, RawOrder};
use crate::record::Record;
use crate::request::{build_request, QueryRequest};

/// The storage engine contract.
///
/// Implementations must return rows in `request.order`, honor
/// `request.limit`, treat a `None` predicate as "no restriction" and report
/// "no rows" as `Ok(None)`.
///
/// Seek construction errors are converted into [`Lookup::Error`], so callers
/// see one error type and the lookup's own errors pass through unchanged.
pub trait Lookup {
    /// The row type returned by the lookup.
    type Row;
    /// The lookup's error type.
    type Error: From<SeekError>;

    /// Returns the first row matching `request`, if any.
    fn lookup(&self, request: &QueryRequest) -> Result<Option<Self::Row>, Self::Error>;
}

impl<L: Lookup + ?Sized> Lookup for &L {
    type Row = L::Row;
    type Error = L::Error;

    fn lookup(&self, request: &QueryRequest) -> Result<Option<Self::Row>, Self::Error> {
        (**self).lookup(request)
    }
}

/// Order and filter of a navigated result set.
///
/// Used both as the context a [`Finder`] is configured with and as per-call
/// overrides. A field set on the overrides replaces the context's field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    /// Order of the result set. Defaults to the tie-breaker alone.
    pub order: Option<RawOrder>,
    /// Filter of the result set.
    pub filter: Option<Filter>,
}

impl FindOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        FindOptions::default()
    }

    /// Sets the order.
    pub fn order(mut self, order: impl Into<RawOrder>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Sets the filter.
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Finds the records adjacent to an anchor.
///
/// ```
/// use keyseek::{Filter, FindOptions, Finder, MemoryTable, Number, Record, Value};
///
/// struct Article {
///     id: u64,
///     author_id: u64,
/// }
///
/// impl Record for Article {
///     fn field_value(&self, column: &str) -> Value<'_> {
///         match column {
///             "id" => Value::Number(Number::U64(self.id)),
///             "author_id" => Value::Number(Number::U64(self.author_id)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let articles: Vec<Article> = (1..=9)
///     .map(|id| Article { id, author_id: (id - 1) % 3 })
///     .collect();
///
/// let finder = Finder::new(MemoryTable::new(&articles))
///     .with_context(FindOptions::new().filter(Filter::eq("author_id", 1u64)));
///
/// let next = finder.find_next(&articles[4]).unwrap();
/// assert_eq!(next.map(|a| a.id), Some(8));
/// ```
#[derive(Debug, Clone)]
pub struct Finder<L> {
    lookup: L,
    config: SeekConfig,
    context: FindOptions,
}

impl<L: Lookup> Finder<L> {
    /// Creates a finder with the default configuration and no context.
    pub fn new(lookup: L) -> Self {
        Finder {
            lookup,
            config: SeekConfig::default(),
            context: FindOptions::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SeekConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the order and filter of the navigated result set.
    pub fn with_context(mut self, context: FindOptions) -> Self {
        self.context = context;
        self
    }

    /// Returns the underlying lookup.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SeekConfig {
        &self.config
    }

    /// Builds the request a neighbor lookup would issue, without issuing it.
    pub fn request<A: Record + ?Sized>(
        &self,
        anchor: Option<&A>,
        traversal: Traversal,
        overrides: &FindOptions,
    ) -> Result<QueryRequest, SeekError> {
        let anchor = anchor.ok_or(SeekError::MissingAnchor)?;

        let order = match overrides.order.as_ref().or(self.context.order.as_ref()) {
            Some(raw) => OrderSpec::from_raw(raw, &self.config)?,
            None => OrderSpec::tie_breaker_only(&self.config),
        };
        let filter = overrides.filter.as_ref().or(self.context.filter.as_ref());

        let request = build_request(anchor, traversal, &order, filter)?;
        debug!(
            traversal = %traversal,
            order = %request.order,
            filtered = filter.is_some(),
            "built neighbor request"
        );
        if let Some(predicate) = &request.predicate {
            trace!(%predicate, "seek predicate");
        }
        Ok(request)
    }

    /// Finds the neighbor of `anchor` in direction `traversal`.
    ///
    /// Fails with [`SeekError::MissingAnchor`] (converted into the lookup's
    /// error) when `anchor` is `None`. Returns `Ok(None)` when the anchor has
    /// no neighbor in that direction.
    pub fn find<A: Record + ?Sized>(
        &self,
        anchor: Option<&A>,
        traversal: Traversal,
        overrides: &FindOptions,
    ) -> Result<Option<L::Row>, L::Error> {
        let request = self.request(anchor, traversal, overrides)?;
        let row = self.lookup.lookup(&request)?;
        debug!(traversal = %traversal, found = row.is_some(), "neighbor lookup finished");
        Ok(row)
    }

    /// Finds the row after `anchor` in the context order.
    pub fn find_next<A: Record + ?Sized>(&self, anchor: &A) -> Result<Option<L::Row>, L::Error> {
        self.find(Some(anchor), Traversal::Next, &FindOptions::default())
    }

    /// Finds the row before `anchor` in the context order.
    pub fn find_prev<A: Record + ?Sized>(&self, anchor: &A) -> Result<Option<L::Row>, L::Error> {
        self.find(Some(anchor), Traversal::Previous, &FindOptions::default())
    }

    /// Finds the row after `anchor`, with per-call overrides.
    pub fn find_next_with<A: Record + ?Sized>(
        &self,
        anchor: &A,
        overrides: &FindOptions,
    ) -> Result<Option<L::Row>, L::Error> {
        self.find(Some(anchor), Traversal::Next, overrides)
    }

    /// Finds the row before `anchor`, with per-call overrides.
    pub fn find_prev_with<A: Record + ?Sized>(
        &self,
        anchor: &A,
        overrides: &FindOptions,
    ) -> Result<Option<L::Row>, L::Error> {
        self.find(Some(anchor), Traversal::Previous, overrides)
    }

    /// Finds both neighbors as `(next, previous)`.
    ///
    /// Issues two independent lookups. If the collection changes between
    /// them the pair may be inconsistent.
    pub fn find_next_and_prev<A: Record + ?Sized>(
        &self,
        anchor: &A,
    ) -> Result<(Option<L::Row>, Option<L::Row>), L::Error> {
        self.find_next_and_prev_with(anchor, &FindOptions::default())
    }

    /// Finds both neighbors as `(next, previous)`, with per-call overrides.
    pub fn find_next_and_prev_with<A: Record + ?Sized>(
        &self,
        anchor: &A,
        overrides: &FindOptions,
    ) -> Result<(Option<L::Row>, Option<L::Row>), L::Error> {
        let next = self.find(Some(anchor), Traversal::Next, overrides)?;
        let prev = self.find(Some(anchor), Traversal::Previous, overrides)?;
        Ok((next, prev))
    }
}
