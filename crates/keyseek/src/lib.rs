//! Keyseek - find the record next to (or before) an anchor in a sorted,
//! filtered result set with a single one-row lookup.
//!
//! Given the order and filter that produced a result set, keyseek builds a
//! seek predicate selecting only rows strictly beyond the anchor, and asks
//! the storage engine for the first such row. No offsets, no scans through
//! intermediate rows.
//!
//! - Any number of order columns, each ascending or descending
//! - A unique tie-breaker (default `id`) appended so the order is total
//! - Equality-map or raw-clause filters conjoined with the seek
//! - Any storage engine behind the [`Lookup`] trait; [`MemoryTable`] is the
//!   in-memory reference and [`SqlQuery`] renders requests as SQL
//!
//! # Quick Start
//!
//! ```rust
//! use keyseek::{Finder, FindOptions, MemoryTable, Number, Record, Value};
//!
//! struct Article {
//!     id: u64,
//!     author_id: u64,
//! }
//!
//! impl Record for Article {
//!     fn field_value(&self, column: &str) -> Value<'_> {
//!         match column {
//!             "id" => Value::Number(Number::U64(self.id)),
//!             "author_id" => Value::Number(Number::U64(self.author_id)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let articles: Vec<Article> = (1..=9)
//!     .map(|id| Article { id, author_id: (id - 1) % 3 })
//!     .collect();
//!
//! // The result set being navigated is ordered by author_id: 1 4 7 2 5 8 3 6 9
//! let finder = Finder::new(MemoryTable::new(&articles))
//!     .with_context(FindOptions::new().order("author_id"));
//!
//! let anchor = &articles[3]; // id 4
//! let (next, prev) = finder.find_next_and_prev(anchor).unwrap();
//! assert_eq!(next.map(|a| a.id), Some(7));
//! assert_eq!(prev.map(|a| a.id), Some(1));
//! ```
//!
//! # Seek Semantics
//!
//! For an order `c1 d1, .., cn dn` and traversal `t`, each column gets the
//! strict operator `>` when `(d, t)` is `(ASC, next)` or `(DESC, previous)`
//! and `<` otherwise. The predicate is the lexicographic expansion
//!
//! ```text
//! c1 op1 v1 OR (c1 = v1 AND (c2 op2 v2 OR (c2 = v2 AND ...)))
//! ```
//!
//! and the lookup is asked for rows in the order itself (`next`) or in the
//! fully reversed order (`previous`), limit 1.

mod config;
mod direction;
mod error;
mod filter;
mod finder;
mod memory;
mod op;
mod order;
mod predicate;
mod record;
mod request;
mod seek;
mod sql;
mod value;

// Re-export public API
pub use config::SeekConfig;
pub use direction::{resolve, ParseTraversalError, Resolved, Traversal};
pub use error::{Result, SeekError};
pub use filter::{merge, Filter};
pub use finder::{FindOptions, Finder, Lookup};
pub use memory::{MemoryError, MemoryTable};
pub use op::Op;
pub use order::{Dir, OrderBy, OrderSpec, RawOrder};
pub use predicate::{Comparison, Predicate, RawClause};
pub use record::{FieldEnum, FieldTimestamp, Record};
pub use request::{build_request, QueryRequest};
pub use seek::{anchor_terms, build_seek, seek_predicate, SeekTerm};
pub use sql::{validate_identifier, SqlQuery};
pub use value::{compare_values, Number, Scalar, Timestamp, Value};

#[cfg(feature = "macros")]
pub use keyseek_macros::Record;
