//! Core of tabula: derived entity schemas and a composable statement algebra.
//!
//! - [`schema`] turns a record description into an [`EntityDescriptor`]
//! - [`expression`] and [`operation`] build statements that render to SQL text
//! - [`executor`] runs rendered statements against a [`Connection`]
//! - [`session`] scopes connection use to one operation
//!
//! Most users reach this through the `tabula` crate and `#[derive(Entity)]`.

pub mod column;
pub mod converter;
pub mod ddl;
pub mod entity;
pub mod error;
pub mod executor;
pub mod expression;
pub mod operation;
pub mod schema;
pub mod session;
pub mod tracing;
pub mod value;

pub use column::{Column, ColumnDescriptor, EntityColumn};
pub use converter::{Converter, DynConverter, Identity, identity_for};
pub use ddl::TableSchema;
pub use entity::{Accessor, Entity, EntityCell, EntityDescriptor, PrimaryKey, Reconstruct};
pub use error::{Error, Result, SchemaError};
pub use executor::{Connection, CountExecutor, Executor, MutateExecutor, Row, SelectExecutor};
pub use expression::{Direction, EqExpression, Expression, NullsOrder, OrderByTerm};
pub use operation::{MutateOperation, Operation, SelectOperation, Statement};
pub use schema::{
    ColumnConfig, ConverterRef, FieldDescription, FieldType, FieldValues, RecordDescription,
    derive_entity,
};
pub use session::{Session, create_tables};
pub use tabula_types::SqlKind;
pub use value::{SqlType, Value};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::column::{Column, ColumnDescriptor};
    pub use crate::converter::{Converter, Identity};
    pub use crate::ddl::TableSchema;
    pub use crate::entity::{Entity, EntityDescriptor};
    pub use crate::error::{Error, Result};
    pub use crate::executor::Connection;
    pub use crate::expression::{EqExpression, Expression};
    pub use crate::operation::{
        MutateOperation, Operation, SelectOperation, Statement, conflicting_update, delete,
        insert, select, update,
    };
    pub use crate::session::{Session, create_tables};
    pub use crate::value::Value;
}
