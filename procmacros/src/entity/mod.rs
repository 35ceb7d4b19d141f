//! `#[derive(Entity)]` code generation.
//!
//! For a struct `Person` this emits:
//! - `impl Entity for Person`, describing every field and memoizing the
//!   derived descriptor in a process-wide static
//! - one typed column constant per field, e.g. `Person::CREATED_AT`
//! - a compile-time check that each converter's domain type matches its field

mod attrs;

use crate::common::{
    compact_type_string, extract_named_fields, is_option_type, make_const_ident, reject_generics,
    unwrap_option,
};
use crate::paths::{core as core_paths, schema as schema_paths, std as std_paths};
use attrs::{ColumnAttrs, EntityAttrs};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashMap;
use syn::{DeriveInput, Error, Field, Ident, Result, Type};
use tabula_types::SqlKind;

/// One field after attribute parsing and type inspection.
struct EntityField<'a> {
    ident: &'a Ident,
    /// Field name without a raw-identifier prefix.
    name: String,
    column_name: String,
    inner_ty: &'a Type,
    optional: bool,
    attrs: ColumnAttrs,
}

impl<'a> EntityField<'a> {
    fn from_field(field: &'a Field) -> Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Entity fields must be named"))?;
        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
        let attrs = ColumnAttrs::parse(&field.attrs)?;
        let optional = is_option_type(&field.ty);
        let inner_ty = unwrap_option(&field.ty);

        if attrs.nullable && !optional {
            return Err(Error::new_spanned(
                &field.ty,
                format!("field '{name}' is marked nullable but its type is not an Option"),
            ));
        }

        if attrs.converter.is_none()
            && SqlKind::from_type_string(&compact_type_string(inner_ty)).is_none()
        {
            return Err(Error::new_spanned(
                &field.ty,
                format!(
                    "Cannot infer SQL kind for Rust type '{}'. Supported types are bool, i16, \
                     i32, i64, f32, f64, String, Vec<u8>, NaiveDate, NaiveTime and DateTime<Utc>; \
                     use #[column(converter = ...)] for anything else",
                    compact_type_string(&field.ty)
                ),
            ));
        }

        let column_name = attrs
            .name
            .as_ref()
            .map(|lit| lit.value())
            .unwrap_or_else(|| name.clone());

        Ok(Self {
            ident,
            name,
            column_name,
            inner_ty,
            optional,
            attrs,
        })
    }

    /// The converter type used by the typed column constant.
    fn converter_type(&self) -> TokenStream {
        let identity = core_paths::identity();
        let inner_ty = self.inner_ty;
        match &self.attrs.converter {
            Some(converter) => quote!(#converter),
            None => quote!(#identity<#inner_ty>),
        }
    }

    fn accessor_ident(&self) -> Ident {
        format_ident!("__tabula_field_{}", self.name)
    }

    fn accessor(&self, struct_ident: &Ident) -> TokenStream {
        let any = std_paths::any();
        let option = std_paths::option();
        let fn_ident = self.accessor_ident();
        let field = self.ident;
        let body = if self.optional {
            quote!(record.#field.as_ref().map(|value| value as &dyn #any))
        } else {
            quote!(#option::Some(&record.#field as &dyn #any))
        };
        quote! {
            fn #fn_ident(record: &#struct_ident) -> #option<&dyn #any> {
                #body
            }
        }
    }

    fn description(&self) -> TokenStream {
        let field_description = schema_paths::field_description();
        let field_type = schema_paths::field_type();
        let column_config = schema_paths::column_config();
        let converter_ref = schema_paths::converter_ref();
        let option = std_paths::option();
        let string = std_paths::string();

        let name = &self.name;
        let type_name = compact_type_string(self.inner_ty);
        let optional = self.optional;
        let accessor = self.accessor_ident();

        let column_name = match &self.attrs.name {
            Some(lit) => quote!(#option::Some(#string::from(#lit))),
            None => quote!(#option::None),
        };
        let primary_key = self.attrs.primary_key;
        let unique = self.attrs.unique;
        let nullable = self.attrs.nullable;
        let default_value = match &self.attrs.default_value {
            Some(value) => quote!(#option::Some(#string::from(#value))),
            None => quote!(#option::None),
        };
        let converter = match &self.attrs.converter {
            Some(path) => quote!(#option::Some(#converter_ref::of::<#path>())),
            None => quote!(#option::None),
        };

        quote! {
            #field_description::new(#name, #field_type::new(#type_name, #optional), #accessor)
                .with_config(#column_config {
                    column_name: #column_name,
                    primary_key: #primary_key,
                    unique: #unique,
                    nullable: #nullable,
                    default_value: #default_value,
                    converter: #converter,
                })
        }
    }

    fn reconstruct(&self) -> TokenStream {
        let field = self.ident;
        let name = &self.name;
        let inner_ty = self.inner_ty;
        if self.optional {
            quote!(#field: values.take_optional::<#inner_ty>(#name)?)
        } else {
            quote!(#field: values.take::<#inner_ty>(#name)?)
        }
    }

    fn column_const(&self, struct_ident: &Ident) -> TokenStream {
        let column = core_paths::column();
        let const_ident = make_const_ident(self.ident);
        let converter = self.converter_type();
        let column_name = &self.column_name;
        let doc = format!("The `{column_name}` column.");
        quote! {
            #[doc = #doc]
            pub const #const_ident: #column<#struct_ident, #converter> = #column::new(#column_name);
        }
    }

    fn domain_assertion(&self) -> Option<TokenStream> {
        let converter_trait = core_paths::converter();
        let converter = self.attrs.converter.as_ref()?;
        let inner_ty = self.inner_ty;
        Some(quote! {
            const _: fn() = || {
                fn assert_domain<C: #converter_trait<Domain = #inner_ty>>() {}
                assert_domain::<#converter>();
            };
        })
    }
}

pub(crate) fn generate_entity(input: DeriveInput) -> Result<TokenStream> {
    reject_generics(&input)?;
    let entity_attrs = EntityAttrs::parse(&input.attrs)?;
    let fields = extract_named_fields(&input)?
        .iter()
        .map(EntityField::from_field)
        .collect::<Result<Vec<_>>>()?;

    let mut seen: HashMap<&str, &EntityField<'_>> = HashMap::with_capacity(fields.len());
    for field in &fields {
        if let Some(first) = seen.insert(field.column_name.as_str(), field) {
            return Err(Error::new_spanned(
                field.ident,
                format!(
                    "duplicate column name '{}' (also used by field '{}')",
                    field.column_name, first.name
                ),
            ));
        }
    }

    let struct_ident = &input.ident;
    let struct_name = struct_ident.to_string();

    let entity = core_paths::entity();
    let entity_cell = core_paths::entity_cell();
    let entity_descriptor = core_paths::entity_descriptor();
    let result = core_paths::result();
    let record_description = schema_paths::record_description();
    let field_values = schema_paths::field_values();
    let option = std_paths::option();
    let string = std_paths::string();
    let vec = std_paths::vec();
    let boxed = std_paths::boxed();
    let any = std_paths::any();

    let table_name = match &entity_attrs.table {
        Some(lit) => quote!(#option::Some(#string::from(#lit))),
        None => quote!(#option::None),
    };

    let accessors = fields.iter().map(|field| field.accessor(struct_ident));
    let descriptions = fields.iter().map(EntityField::description);
    let reconstructed = fields.iter().map(EntityField::reconstruct);
    let column_consts = fields.iter().map(|field| field.column_const(struct_ident));
    let assertions = fields.iter().filter_map(EntityField::domain_assertion);

    Ok(quote! {
        impl #entity for #struct_ident {
            fn description() -> #record_description<Self> {
                #(#accessors)*

                fn __tabula_reconstruct(
                    values: #vec<#option<#boxed<dyn #any + ::core::marker::Send>>>,
                ) -> #result<#struct_ident> {
                    let mut values = #field_values::new(values);
                    ::core::result::Result::Ok(#struct_ident {
                        #(#reconstructed,)*
                    })
                }

                #record_description {
                    type_name: #string::from(#struct_name),
                    table_name: #table_name,
                    fields: ::std::vec![#(#descriptions),*],
                    reconstruct: __tabula_reconstruct,
                }
            }

            fn entity() -> #result<&'static #entity_descriptor<Self>> {
                static ENTITY: #entity_cell<#struct_ident> = #entity_cell::new();
                ENTITY.get_or_derive(<#struct_ident as #entity>::description)
            }
        }

        impl #struct_ident {
            #(#column_consts)*
        }

        #(#assertions)*
    })
}
