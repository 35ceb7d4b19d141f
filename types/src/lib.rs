//! Shared type definitions for tabula
//!
//! This crate holds the pieces both the derive macro and the runtime deriver
//! need to agree on:
//!
//! - [`SqlKind`] - the closed set of SQL kinds a column can have
//! - [`SqlKind::keyword`] - the DDL keyword table
//! - [`SqlKind::from_type_string`] - the static Rust type → kind table

mod kind;

pub use kind::{SqlKind, option_inner};
