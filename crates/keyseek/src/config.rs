//! Seek configuration.

use serde::Deserialize;

/// Settings shared by every neighbor lookup of a [`Finder`](crate::Finder).
///
/// Deserializes with missing keys falling back to [`SeekConfig::default`],
/// so it can sit inside a larger application config:
///
/// ```
/// use keyseek::SeekConfig;
///
/// let config: SeekConfig = serde_json::from_str(r#"{ "tie_breaker": "uuid" }"#).unwrap();
/// assert_eq!(config.tie_breaker, "uuid");
/// assert_eq!(config.delimiter, ',');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeekConfig {
    /// Column with unique values appended to every order so it is total.
    pub tie_breaker: String,
    /// Separator between segments of a textual order description.
    pub delimiter: char,
}

impl Default for SeekConfig {
    fn default() -> Self {
        SeekConfig {
            tie_breaker: "id".to_string(),
            delimiter: ',',
        }
    }
}

impl SeekConfig {
    /// Creates the default configuration (`id` tie-breaker, `,` delimiter).
    pub fn new() -> Self {
        SeekConfig::default()
    }

    /// Sets the tie-breaker column.
    pub fn tie_breaker(mut self, column: impl Into<String>) -> Self {
        self.tie_breaker = column.into();
        self
    }

    /// Sets the order segment delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}
