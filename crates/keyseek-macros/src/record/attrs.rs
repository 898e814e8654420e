//! Parsing of `#[column(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Ident, Lit, Meta, Result, Token,
};

/// How a field's value is exposed to the seek builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// `#[column(String)]`: anything that derefs to `str`.
    String,
    /// `#[column(Number)]`: any primitive number `keyseek::Number` converts from.
    Number,
    /// `#[column(Timestamp)]`: requires `keyseek::FieldTimestamp`.
    Timestamp,
    /// `#[column(Enum)]`: requires `keyseek::FieldEnum`.
    Enum,
    /// `#[column(Bool)]`.
    Bool,
}

impl ColumnKind {
    fn parse(name: &str, span: Span) -> Result<Self> {
        match name {
            "String" | "string" => Ok(ColumnKind::String),
            "Number" | "number" => Ok(ColumnKind::Number),
            "Timestamp" | "timestamp" => Ok(ColumnKind::Timestamp),
            "Enum" | "enum" | "enumeration" => Ok(ColumnKind::Enum),
            "Bool" | "bool" | "boolean" => Ok(ColumnKind::Bool),
            other => Err(Error::new(
                span,
                format!(
                    "unknown column kind: '{}'. Expected one of: String, Number, Timestamp, Enum, Bool",
                    other
                ),
            )),
        }
    }
}

/// Field-level attributes from `#[column(...)]`.
#[derive(Debug, Clone, Default)]
pub struct ColumnAttr {
    pub kind: Option<ColumnKind>,
    pub skip: bool,
    /// Column name used in orders and filters (default: field name).
    pub rename: Option<String>,
}

fn string_lit(expr: &Expr, what: &str) -> Result<(String, Span)> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok((s.value(), s.span())),
        other => Err(Error::new(
            other.span(),
            format!("{what} must be a string literal"),
        )),
    }
}

impl Parse for ColumnAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ColumnAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) => {
                    let ident: &Ident = p.get_ident().ok_or_else(|| {
                        Error::new(
                            p.span(),
                            "expected column kind: String, Number, Timestamp, Enum, Bool, or skip",
                        )
                    })?;
                    attr.kind = Some(ColumnKind::parse(&ident.to_string(), ident.span())?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(string_lit(&nv.value, "rename")?.0);
                }
                // kind = "enum" for kinds that collide with keywords
                Meta::NameValue(nv) if nv.path.is_ident("kind") => {
                    let (name, span) = string_lit(&nv.value, "kind")?;
                    attr.kind = Some(ColumnKind::parse(&name, span)?);
                }
                Meta::NameValue(nv) => {
                    return Err(Error::new(
                        nv.path.span(),
                        "unknown attribute. Expected: rename or kind",
                    ));
                }
                Meta::List(_) => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown column attribute. Expected: String, Number, Timestamp, Enum, Bool, skip, rename = \"...\", or kind = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extracts `#[column(...)]` from a field's attributes.
pub fn parse_column_attrs(attrs: &[Attribute]) -> Result<ColumnAttr> {
    for attr in attrs {
        if attr.path().is_ident("column") {
            return attr.parse_args::<ColumnAttr>();
        }
    }
    Ok(ColumnAttr::default())
}
