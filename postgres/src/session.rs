use core::str::FromStr;
use crate::connection::PostgresConnection;
use postgres::{Config, NoTls};
use tabula_core::{Error, Operation, Result, Session};
use tabula_core::operation::Output;

/// A session that opens a fresh client for every call.
///
/// The client is dropped when the call returns, so nothing is pooled.
#[derive(Debug, Clone)]
pub struct PostgresSession {
    config: Config,
}

impl PostgresSession {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn connect(&self) -> Result<PostgresConnection> {
        self.config
            .connect(NoTls)
            .map(PostgresConnection::new)
            .map_err(|err| Error::Connection(Box::new(err)))
    }
}

impl From<Config> for PostgresSession {
    fn from(config: Config) -> Self {
        Self::from_config(config)
    }
}

/// Parses a libpq-style string (`host=localhost user=postgres`) or a
/// `postgresql://` URL.
impl FromStr for PostgresSession {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config = s
            .parse::<Config>()
            .map_err(|err| Error::Connection(Box::new(err)))?;
        Ok(Self::from_config(config))
    }
}

impl Session for PostgresSession {
    type Connection = PostgresConnection;

    fn connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PostgresConnection) -> Result<T>,
    {
        let mut connection = self.connect()?;
        tabula_core::tabula_trace_session!("acquire", "postgres.sync");
        let result = f(&mut connection);
        drop(connection);
        tabula_core::tabula_trace_session!("release", "postgres.sync");
        result
    }

    /// Runs the operation inside a database transaction, which rolls back
    /// if the operation fails.
    fn transaction<O: Operation>(&self, operation: &O) -> Result<Output<O>> {
        self.connection(|connection| {
            let mut transaction = connection
                .transaction()
                .map_err(|err| Error::StatementExecution {
                    statement: "begin".to_string(),
                    source: Box::new(err),
                })?;
            let output = operation.execute(&mut transaction)?;
            transaction
                .commit()
                .map_err(|err| Error::StatementExecution {
                    statement: "commit".to_string(),
                    source: Box::new(err),
                })?;
            Ok(output)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_hand_out_wrapped_clients() {
        fn assert_session<S: Session<Connection = PostgresConnection>>() {}
        assert_session::<PostgresSession>();
    }

    #[test]
    fn parses_key_value_strings() {
        let session: PostgresSession = "host=localhost user=postgres dbname=app".parse().unwrap();
        assert_eq!(session.config().get_user(), Some("postgres"));
        assert_eq!(session.config().get_dbname(), Some("app"));
    }

    #[test]
    fn parses_urls() {
        let session: PostgresSession = "postgresql://ann@db.internal:5433/app".parse().unwrap();
        assert_eq!(session.config().get_ports(), &[5433]);
    }

    #[test]
    fn malformed_strings_are_connection_errors() {
        let err = "host=localhost port=notaport"
            .parse::<PostgresSession>()
            .unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }
}
