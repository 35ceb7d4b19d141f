#![recursion_limit = "128"]

extern crate proc_macro;

mod common;
mod entity;
mod paths;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `tabula::Entity` for a struct with named fields.
///
/// Each field becomes one column, in declaration order. Field types map to
/// SQL kinds directly (`bool`, `i16`, `i32`, `i64`, `f32`, `f64`, `String`,
/// `Vec<u8>`, `NaiveDate`, `NaiveTime`, `DateTime<Utc>`); any other type
/// needs a converter. `Option<T>` fields are nullable.
///
/// # Attributes
///
/// On the struct:
/// - `#[entity(table = "people")]` overrides the table name, which otherwise
///   is the lowercased struct name followed by `table`
///
/// On fields, inside `#[column(...)]`:
/// - `name = "..."` overrides the column name
/// - `primary_key` (or `primary`) and `unique`
/// - `nullable`, only valid on `Option` fields
/// - `default = <literal>` for `create table`
/// - `converter = path::To::Converter` maps a domain type through a `Converter`
///
/// # Example
///
/// ```ignore
/// #[derive(Entity)]
/// #[entity(table = "people")]
/// struct Person {
///     #[column(primary_key)]
///     id: i32,
///     name: String,
///     #[column(converter = MoodConverter)]
///     mood: Option<Mood>,
/// }
///
/// let query = select(Person::entity()?).r#where(Person::ID.eq(5));
/// ```
///
/// Besides the trait impl the derive adds one typed column constant per
/// field, named after the field in upper case (`Person::ID`, `Person::MOOD`).
#[proc_macro_derive(Entity, attributes(entity, column))]
pub fn entity_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match entity::generate_entity(input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
