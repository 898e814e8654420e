//! In-memory lookup over a slice of records.
//!
//! [`MemoryTable`] executes a [`QueryRequest`] the way a storage engine
//! would: filter by the predicate, sort by the requested order, cut at the
//! limit. It serves as the reference [`Lookup`] and as a test double.

use thiserror::Error;

use crate::error::SeekError;
use crate::finder::Lookup;
use crate::predicate::Predicate;
use crate::record::Record;
use crate::request::QueryRequest;

/// Errors raised by [`MemoryTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The request could not be built.
    #[error(transparent)]
    Seek(#[from] SeekError),

    /// The predicate contains a raw clause, which cannot be evaluated here.
    #[error("raw clause cannot be evaluated in memory: {sql}")]
    UnsupportedClause { sql: String },
}

/// A borrowed slice of records queried in memory.
#[derive(Debug)]
pub struct MemoryTable<'a, T> {
    rows: &'a [T],
}

impl<T> Clone for MemoryTable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MemoryTable<'_, T> {}

impl<'a, T: Record> MemoryTable<'a, T> {
    /// Wraps a slice of records.
    pub fn new(rows: &'a [T]) -> Self {
        MemoryTable { rows }
    }

    /// Returns the wrapped rows.
    pub fn rows(&self) -> &'a [T] {
        self.rows
    }

    /// Returns up to `request.limit` matching rows in `request.order`.
    pub fn select(&self, request: &QueryRequest) -> Result<Vec<&'a T>, MemoryError> {
        if let Some(raw) = request.predicate.as_ref().and_then(Predicate::first_raw) {
            return Err(MemoryError::UnsupportedClause {
                sql: raw.sql.clone(),
            });
        }

        let mut results: Vec<&'a T> = self
            .rows
            .iter()
            .filter(|row| match &request.predicate {
                Some(predicate) => predicate.matches(*row) == Some(true),
                None => true,
            })
            .collect();

        results.sort_by(|a, b| request.order.compare(*a, *b));
        results.truncate(request.limit);
        Ok(results)
    }
}

impl<'a, T: Record> Lookup for MemoryTable<'a, T> {
    type Row = &'a T;
    type Error = MemoryError;

    fn lookup(&self, request: &QueryRequest) -> Result<Option<&'a T>, MemoryError> {
        Ok(self.select(request)?.into_iter().next())
    }
}
