//! Code generation for `#[derive(Record)]`.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, Ident, PathArguments,
    Result, Type,
};

use super::attrs::{parse_column_attrs, ColumnKind};

pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut arms: Vec<TokenStream> = Vec::new();
    let mut constants: Vec<TokenStream> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_column_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let (inner_ty, optional) = match option_inner(&field.ty) {
            Some(inner) => (inner, true),
            None => (&field.ty, false),
        };

        // Unannotated fields are columns only when their type says what they are.
        let kind = match attrs.kind.or_else(|| infer_kind(inner_ty)) {
            Some(kind) => kind,
            None => continue,
        };

        let column = attrs.rename.unwrap_or_else(|| field_name.to_string());
        if !seen.insert(column.clone()) {
            return Err(Error::new(
                field.span(),
                format!("duplicate column name '{column}'"),
            ));
        }

        let const_name = const_ident(&column).ok_or_else(|| {
            Error::new(
                field.span(),
                format!("column name '{column}' does not give a valid constant name"),
            )
        })?;
        constants.push(quote! {
            /// Column name for orders and filters.
            pub const #const_name: &'static str = #column;
        });

        let value_expr = if optional {
            let read = read_expr(kind, quote! { v });
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(v) => #read,
                    ::core::option::Option::None => ::keyseek::Value::None,
                }
            }
        } else {
            read_expr(kind, quote! { &self.#field_name })
        };

        arms.push(quote! {
            #column => #value_expr,
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*
        }

        impl #impl_generics ::keyseek::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, column: &str) -> ::keyseek::Value<'_> {
                match column {
                    #(#arms)*
                    _ => ::keyseek::Value::None,
                }
            }
        }
    })
}

/// Builds the `Value` for a field, given an expression borrowing it.
fn read_expr(kind: ColumnKind, field: TokenStream) -> TokenStream {
    match kind {
        ColumnKind::String => quote! {
            ::keyseek::Value::String(::core::convert::AsRef::<str>::as_ref(#field))
        },
        ColumnKind::Number => quote! {
            ::keyseek::Value::Number(::keyseek::Number::from(*#field))
        },
        ColumnKind::Timestamp => quote! {
            ::keyseek::Value::Timestamp(::keyseek::FieldTimestamp::timestamp(#field))
        },
        ColumnKind::Enum => quote! {
            ::keyseek::Value::Enum(::keyseek::FieldEnum::discriminant(#field))
        },
        ColumnKind::Bool => quote! {
            ::keyseek::Value::Bool(*#field)
        },
    }
}

/// Returns `T` for a field typed `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first()? {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn infer_kind(ty: &Type) -> Option<ColumnKind> {
    let Type::Path(path) = ty else {
        return None;
    };
    let ident = path.path.segments.last()?.ident.to_string();
    match ident.as_str() {
        "String" => Some(ColumnKind::String),
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize"
        | "f32" | "f64" => Some(ColumnKind::Number),
        "bool" => Some(ColumnKind::Bool),
        "Timestamp" => Some(ColumnKind::Timestamp),
        _ => None,
    }
}

/// The `SCREAMING_SNAKE` constant for `column`, if it is an identifier.
fn const_ident(column: &str) -> Option<Ident> {
    syn::parse_str::<Ident>(&to_screaming_snake_case(column)).ok()
}

fn to_screaming_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c);
            prev_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            out.push('_');
            prev_lower = false;
        } else {
            out.push(c.to_ascii_uppercase());
            prev_lower = c.is_alphanumeric();
        }
    }

    out
}
