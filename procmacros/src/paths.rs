//! Centralized path definitions for generated code.
//!
//! Every path is absolute through `::tabula`, which the facade crate makes
//! resolvable from inside itself with `extern crate self as tabula`.

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) mod std {
    use super::*;

    pub(crate) fn option() -> TokenStream {
        quote!(::std::option::Option)
    }

    pub(crate) fn string() -> TokenStream {
        quote!(::std::string::String)
    }

    pub(crate) fn vec() -> TokenStream {
        quote!(::std::vec::Vec)
    }

    pub(crate) fn boxed() -> TokenStream {
        quote!(::std::boxed::Box)
    }

    pub(crate) fn any() -> TokenStream {
        quote!(::core::any::Any)
    }
}

pub(crate) mod core {
    use super::*;

    pub(crate) fn entity() -> TokenStream {
        quote!(::tabula::Entity)
    }

    pub(crate) fn entity_cell() -> TokenStream {
        quote!(::tabula::EntityCell)
    }

    pub(crate) fn entity_descriptor() -> TokenStream {
        quote!(::tabula::EntityDescriptor)
    }

    pub(crate) fn converter() -> TokenStream {
        quote!(::tabula::Converter)
    }

    pub(crate) fn identity() -> TokenStream {
        quote!(::tabula::Identity)
    }

    pub(crate) fn column() -> TokenStream {
        quote!(::tabula::Column)
    }

    pub(crate) fn result() -> TokenStream {
        quote!(::tabula::Result)
    }
}

pub(crate) mod schema {
    use super::*;

    pub(crate) fn record_description() -> TokenStream {
        quote!(::tabula::RecordDescription)
    }

    pub(crate) fn field_description() -> TokenStream {
        quote!(::tabula::FieldDescription)
    }

    pub(crate) fn field_type() -> TokenStream {
        quote!(::tabula::FieldType)
    }

    pub(crate) fn field_values() -> TokenStream {
        quote!(::tabula::FieldValues)
    }

    pub(crate) fn column_config() -> TokenStream {
        quote!(::tabula::ColumnConfig)
    }

    pub(crate) fn converter_ref() -> TokenStream {
        quote!(::tabula::ConverterRef)
    }
}
