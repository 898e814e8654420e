//! Derive macro for `keyseek`.
//!
//! - [`Record`] - Generate `keyseek::Record` and column-name constants from
//!   struct field annotations
//!
//! Use it through the re-export in `keyseek` (feature `macros`, on by
//! default) rather than depending on this crate directly.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `keyseek::Record` for a struct with named fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Read as `Value::String` via `AsRef<str>` |
/// | `Number` | Read as `Value::Number` via `Number::from` (field must be `Copy`) |
/// | `Timestamp` | Read via `FieldTimestamp` |
/// | `Enum` | Read via `FieldEnum` |
/// | `Bool` | Read as `Value::Bool` |
/// | `kind = "..."` | Same as the bare kinds, by name |
/// | `skip` | Not a column |
/// | `rename = "..."` | Column name used in orders and filters |
///
/// Without an attribute, `String`, primitive number, `bool` and `Timestamp`
/// fields are columns of the matching kind and every other field is ignored.
/// An `Option<T>` field reads as `Value::None` when empty.
///
/// # Generated Code
///
/// 1. Column constants (e.g. `Article::AUTHOR_ID`)
/// 2. `Record::field_value()` matching each column name
///
/// # Example
///
/// ```ignore
/// use keyseek::Record;
///
/// #[derive(Record)]
/// struct Article {
///     id: u64,
///     #[column(rename = "author_id")]
///     author: u64,
///     #[column(String)]
///     title: Box<str>,
///     #[column(skip)]
///     body: String,
/// }
///
/// assert_eq!(Article::AUTHOR_ID, "author_id");
/// ```
#[proc_macro_derive(Record, attributes(column))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
