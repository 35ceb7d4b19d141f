//! Shared helpers for inspecting `syn::Type`.

use quote::ToTokens;
use syn::{GenericArgument, Path, PathArguments, Type};

fn type_path(ty: &Type) -> Option<&Path> {
    if let Type::Path(type_path) = ty {
        Some(&type_path.path)
    } else {
        None
    }
}

pub(crate) fn is_option_type(ty: &Type) -> bool {
    option_inner_type(ty).is_some()
}

pub(crate) fn option_inner_type(ty: &Type) -> Option<&Type> {
    let path = type_path(ty)?;
    let segment = path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| {
        if let GenericArgument::Type(inner) = arg {
            Some(inner)
        } else {
            None
        }
    })
}

pub(crate) fn unwrap_option(ty: &Type) -> &Type {
    option_inner_type(ty).unwrap_or(ty)
}

/// The type's tokens with all whitespace removed, e.g. `chrono::NaiveDate`.
pub(crate) fn compact_type_string(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
