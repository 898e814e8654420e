//! Comparison operators used in seek predicates.

use std::cmp::Ordering;
use std::fmt;

/// Comparison operator of a single-column predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl Op {
    /// Evaluates the operator given `field.cmp(operand)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }

    /// Returns the SQL spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_eval_ordering() {
        assert!(Op::Eq.eval_ordering(Ordering::Equal));
        assert!(!Op::Eq.eval_ordering(Ordering::Less));

        assert!(Op::Gt.eval_ordering(Ordering::Greater));
        assert!(!Op::Gt.eval_ordering(Ordering::Equal));

        assert!(Op::Gte.eval_ordering(Ordering::Equal));
        assert!(!Op::Gte.eval_ordering(Ordering::Less));

        assert!(Op::Lt.eval_ordering(Ordering::Less));
        assert!(!Op::Lt.eval_ordering(Ordering::Equal));

        assert!(Op::Lte.eval_ordering(Ordering::Equal));
        assert!(!Op::Lte.eval_ordering(Ordering::Greater));
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::Eq.to_string(), "=");
        assert_eq!(Op::Gte.to_string(), ">=");
        assert_eq!(Op::Lt.to_string(), "<");
    }
}
