//! Traversal direction and per-column operator resolution.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::op::Op;
use crate::order::{Dir, OrderSpec};

/// Which neighbor of the anchor to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// The row logically following the anchor.
    Next,
    /// The row logically preceding the anchor.
    Previous,
}

impl Traversal {
    /// Returns the strict operator a column with direction `dir` is sought
    /// with.
    ///
    /// | column | traversal | operator |
    /// |--------|-----------|----------|
    /// | Asc    | Next      | `>`      |
    /// | Asc    | Previous  | `<`      |
    /// | Desc   | Next      | `<`      |
    /// | Desc   | Previous  | `>`      |
    pub fn operator(self, dir: Dir) -> Op {
        match (dir, self) {
            (Dir::Asc, Traversal::Next) | (Dir::Desc, Traversal::Previous) => Op::Gt,
            (Dir::Asc, Traversal::Previous) | (Dir::Desc, Traversal::Next) => Op::Lt,
        }
    }

    /// Returns the lowercase name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Traversal::Next => "next",
            Traversal::Previous => "previous",
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a traversal name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown traversal '{0}', expected next, prev or previous")]
pub struct ParseTraversalError(String);

impl FromStr for Traversal {
    type Err = ParseTraversalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(Traversal::Next),
            "prev" | "previous" => Ok(Traversal::Previous),
            _ => Err(ParseTraversalError(s.to_string())),
        }
    }
}

/// An order resolved against a traversal direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// `(column, operator)` in declaration order.
    pub columns: Vec<(String, Op)>,
    /// The row order the lookup must return rows in, so that its first row
    /// is the nearest neighbor.
    pub effective: OrderSpec,
}

/// Resolves every entry of `order` to its seek operator.
///
/// The effective order equals `order` for [`Traversal::Next`] and is fully
/// reversed for [`Traversal::Previous`].
pub fn resolve(order: &OrderSpec, traversal: Traversal) -> Resolved {
    let columns = order
        .columns()
        .iter()
        .map(|entry| (entry.column.clone(), traversal.operator(entry.dir)))
        .collect();

    let effective = match traversal {
        Traversal::Next => order.clone(),
        Traversal::Previous => order.reversed(),
    };

    Resolved { columns, effective }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeekConfig;

    #[test]
    fn operator_table() {
        assert_eq!(Traversal::Next.operator(Dir::Asc), Op::Gt);
        assert_eq!(Traversal::Previous.operator(Dir::Asc), Op::Lt);
        assert_eq!(Traversal::Next.operator(Dir::Desc), Op::Lt);
        assert_eq!(Traversal::Previous.operator(Dir::Desc), Op::Gt);
    }

    #[test]
    fn next_keeps_the_order() {
        let order = OrderSpec::parse("author_id DESC", &SeekConfig::default()).unwrap();
        let resolved = resolve(&order, Traversal::Next);

        assert_eq!(
            resolved.columns,
            vec![("author_id".to_string(), Op::Lt), ("id".to_string(), Op::Gt)]
        );
        assert_eq!(resolved.effective, order);
    }

    #[test]
    fn previous_reverses_the_order() {
        let order = OrderSpec::parse("author_id DESC", &SeekConfig::default()).unwrap();
        let resolved = resolve(&order, Traversal::Previous);

        assert_eq!(
            resolved.columns,
            vec![("author_id".to_string(), Op::Gt), ("id".to_string(), Op::Lt)]
        );
        assert_eq!(resolved.effective.to_string(), "author_id ASC, id DESC");
    }

    #[test]
    fn parse_traversal_names() {
        assert_eq!("next".parse(), Ok(Traversal::Next));
        assert_eq!("Prev".parse(), Ok(Traversal::Previous));
        assert_eq!(" previous ".parse(), Ok(Traversal::Previous));
        assert!("first".parse::<Traversal>().is_err());
    }

    #[test]
    fn names_parse_back() {
        for traversal in [Traversal::Next, Traversal::Previous] {
            assert_eq!(traversal.as_str().parse(), Ok(traversal));
        }
    }
}
