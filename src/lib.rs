//! # tabula
//!
//! A small typed ORM: entity schemas derived from plain structs, and a
//! statement algebra whose compositions are checked by the type system.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! #[derive(Entity, Debug, Clone, PartialEq)]
//! struct Person {
//!     #[column(primary_key)]
//!     id: i32,
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! # fn main() -> tabula::Result<()> {
//! let entity = Person::entity()?;
//! assert_eq!(entity.table_name(), "persontable");
//!
//! let query = select(entity).r#where(Person::ID.eq(5)).limit(10);
//! assert_eq!(
//!     query.render()?,
//!     "select * from persontable where id = 5 limit 10"
//! );
//!
//! let person = Person { id: 1, name: "Ann".into(), age: None };
//! assert_eq!(
//!     insert(entity).values(&person)?.render()?,
//!     "insert into persontable(id, name, age) values(1, 'Ann', NULL)"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Operations run through a [`Connection`] or a [`Session`]. With the
//! `postgres-sync` feature, [`postgres::PostgresSession`] provides one
//! backed by the `postgres` crate.
//!
//! ## Feature flags
//!
//! | Feature         | Default | Enables                                 |
//! |-----------------|---------|-----------------------------------------|
//! | `tracing`       | yes     | `tracing` events for statements/sessions |
//! | `postgres-sync` | no      | the PostgreSQL driver in [`postgres`]    |

extern crate self as tabula;

pub use tabula_core::{
    column, converter, ddl, entity, error, executor, expression, operation, schema, session,
    value,
};

pub use tabula_core::{
    Accessor, Column, ColumnConfig, ColumnDescriptor, Connection, Converter, ConverterRef,
    CountExecutor, Direction, DynConverter, Entity, EntityCell, EntityColumn, EntityDescriptor,
    EqExpression, Error, Executor, Expression, FieldDescription, FieldType, FieldValues, Identity,
    MutateExecutor, MutateOperation, NullsOrder, Operation, OrderByTerm, PrimaryKey, Reconstruct,
    RecordDescription, Result, Row, SchemaError, SelectExecutor, SelectOperation, Session, SqlKind,
    SqlType, Statement, TableSchema, Value, create_tables, derive_entity, identity_for,
};

/// Derives [`Entity`](trait@Entity) for a struct; see the macro crate docs.
pub use tabula_macros::Entity;

/// PostgreSQL driver on the synchronous `postgres` client.
#[cfg(feature = "postgres-sync")]
pub use tabula_postgres as postgres;

/// Everything needed to declare entities and build statements.
pub mod prelude {
    pub use tabula_core::prelude::*;
    pub use tabula_macros::Entity;
}
