//! Error types for the keyseek crate.

use thiserror::Error;

/// Errors raised while turning an anchor, order and filter into a seek query.
///
/// Every variant is produced before the lookup is called, so a failed
/// construction never reaches the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekError {
    /// The order description is empty or malformed.
    #[error("invalid order spec: {reason}")]
    InvalidOrderSpec { reason: String },

    /// No anchor record was supplied.
    #[error("no anchor record given for neighbor lookup")]
    MissingAnchor,

    /// The anchor exposes no value for a column named by the order.
    #[error("anchor has no value for order column '{column}'")]
    MissingAnchorValue { column: String },

    /// A column name cannot be rendered safely as an SQL identifier.
    #[error("invalid column name: '{name}'")]
    InvalidColumnName { name: String },
}

impl SeekError {
    pub(crate) fn invalid_order(reason: impl Into<String>) -> Self {
        SeekError::InvalidOrderSpec {
            reason: reason.into(),
        }
    }
}

/// Result type for seek construction.
pub type Result<T> = std::result::Result<T, SeekError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_part() {
        let err = SeekError::MissingAnchorValue {
            column: "author_id".into(),
        };
        assert_eq!(err.to_string(), "anchor has no value for order column 'author_id'");

        let err = SeekError::invalid_order("empty order description");
        assert_eq!(err.to_string(), "invalid order spec: empty order description");
    }
}
