//! Utilities shared by the derive implementations.

mod helpers;
mod type_utils;

pub(crate) use helpers::{extract_named_fields, make_const_ident, reject_generics};
pub(crate) use type_utils::{compact_type_string, is_option_type, unwrap_option};
