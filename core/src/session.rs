//! Scoped connection use.
//!
//! A session hands out one connection per call and releases it when the
//! call returns, on success or failure. There is no multi-statement
//! transaction: [`Session::transaction`] binds exactly one operation to one
//! connection.

use crate::ddl::TableSchema;
use crate::error::Result;
use crate::executor::{Connection, statement_error};
use crate::operation::{Operation, Output};

pub trait Session {
    type Connection: Connection;

    /// Acquire a connection, run `f` on it, then release it.
    fn connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self::Connection) -> Result<T>;

    /// Run one operation on its own connection.
    fn transaction<O: Operation>(&self, operation: &O) -> Result<Output<O>> {
        self.connection(|connection| operation.execute(connection))
    }
}

/// Create every table that does not exist yet, on one connection.
pub fn create_tables<S: Session>(session: &S, tables: &[&dyn TableSchema]) -> Result<()> {
    session.connection(|connection| {
        for table in tables {
            let statement = table.create_table_sql();
            crate::tabula_trace_query!(&statement, "ddl");
            connection
                .execute(&statement)
                .map_err(|err| statement_error(&statement, err))?;
        }
        Ok(())
    })
}
