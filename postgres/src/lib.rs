//! PostgreSQL driver for tabula, on the synchronous [`postgres`] client.
//!
//! Enable the `postgres-sync` feature. The driver wraps [`postgres::Client`]
//! in [`PostgresConnection`] and its transactions in [`PostgresTransaction`],
//! both usable as a [`tabula_core::Connection`], and provides
//! [`PostgresSession`], which opens one client per call.
//!
//! ```no_run
//! # #[cfg(feature = "postgres-sync")]
//! # fn run() -> tabula_core::Result<()> {
//! use tabula_core::{Session, create_tables};
//! use tabula_postgres::PostgresSession;
//!
//! let session: PostgresSession = "host=localhost user=postgres".parse()?;
//! create_tables(&session, &[])?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "postgres-sync")]
mod connection;
#[cfg(feature = "postgres-sync")]
mod session;

#[cfg(feature = "postgres-sync")]
pub use connection::{
    PostgresConnection, PostgresError, PostgresTransaction, decode_value, sql_kind,
};
#[cfg(feature = "postgres-sync")]
pub use session::PostgresSession;

#[cfg(feature = "postgres-sync")]
pub use postgres::{Client, Config, NoTls};
