//! Shared helper functions for procedural macro code generation.

use heck::ToShoutySnakeCase;
use syn::{Data, DeriveInput, Error, Field, Fields, Ident, Result, punctuated::Punctuated, token::Comma};

/// Extract the named fields of a struct.
///
/// # Errors
///
/// Returns an error for tuple structs, unit structs, enums and unions.
pub(crate) fn extract_named_fields(input: &DeriveInput) -> Result<&Punctuated<Field, Comma>> {
    let struct_name = &input.ident;
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => Ok(&fields.named),
            Fields::Unnamed(_) => Err(Error::new_spanned(
                struct_name,
                "Entity cannot be derived for tuple structs; fields need names to become columns",
            )),
            Fields::Unit => Err(Error::new_spanned(
                struct_name,
                "Entity cannot be derived for unit structs",
            )),
        },
        _ => Err(Error::new_spanned(
            struct_name,
            "Entity can only be derived for structs",
        )),
    }
}

/// The descriptor is a process-wide static, so it cannot vary by type parameter.
pub(crate) fn reject_generics(input: &DeriveInput) -> Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(Error::new_spanned(
            &input.generics,
            "Entity cannot be derived for generic structs",
        ))
    }
}

/// `created_at` -> `CREATED_AT`, keeping the field's span.
pub(crate) fn make_const_ident(field: &Ident) -> Ident {
    let name = field.to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name);
    Ident::new(&name.to_shouty_snake_case(), field.span())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn const_idents() {
        let field: Ident = parse_quote!(created_at);
        assert_eq!(make_const_ident(&field).to_string(), "CREATED_AT");
        let raw: Ident = parse_quote!(r#type);
        assert_eq!(make_const_ident(&raw).to_string(), "TYPE");
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = parse_quote!(
            struct Pair(i32, i32);
        );
        assert!(extract_named_fields(&input).is_err());
    }

    #[test]
    fn rejects_generics() {
        let input: DeriveInput = parse_quote!(
            struct Wrapper<T> {
                inner: T,
            }
        );
        assert!(reject_generics(&input).is_err());
    }
}
