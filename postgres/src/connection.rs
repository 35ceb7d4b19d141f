//! [`Connection`] wrappers for the synchronous client and its transactions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres::types::{FromSql, Type};
use postgres::{Client, Row as PgRow, Transaction};
use tabula_core::{Connection, Row, SqlKind, Value};

/// Failures of the PostgreSQL driver.
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    #[error(transparent)]
    Postgres(#[from] postgres::Error),

    #[error("column '{column}' has unsupported type '{ty}'")]
    UnsupportedType { column: String, ty: String },
}

/// The SQL kind a wire type decodes to, if it is supported.
///
/// `varchar`, `bpchar` and `name` read as text. `timestamp` without a zone
/// reads as a UTC timestamp.
pub fn sql_kind(ty: &Type) -> Option<SqlKind> {
    let kind = match *ty {
        Type::BOOL => SqlKind::Bool,
        Type::INT2 => SqlKind::Short,
        Type::INT4 => SqlKind::Int,
        Type::INT8 => SqlKind::Long,
        Type::FLOAT4 => SqlKind::Float,
        Type::FLOAT8 => SqlKind::Double,
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => SqlKind::Text,
        Type::BYTEA => SqlKind::Binary,
        Type::DATE => SqlKind::Date,
        Type::TIME => SqlKind::Time,
        Type::TIMESTAMPTZ | Type::TIMESTAMP => SqlKind::Timestamp,
        _ => return None,
    };
    Some(kind)
}

fn get<'a, T>(row: &'a PgRow, idx: usize) -> Result<Option<T>, PostgresError>
where
    T: FromSql<'a>,
{
    Ok(row.try_get::<_, Option<T>>(idx)?)
}

/// Decode column `idx` of a row. SQL NULL decodes to [`Value::Null`].
pub fn decode_value(row: &PgRow, idx: usize) -> Result<Value, PostgresError> {
    let column = &row.columns()[idx];
    let ty = column.type_();
    let kind = sql_kind(ty).ok_or_else(|| PostgresError::UnsupportedType {
        column: column.name().to_string(),
        ty: ty.name().to_string(),
    })?;

    let value = match kind {
        SqlKind::Bool => get::<bool>(row, idx)?.map(Value::Bool),
        SqlKind::Short => get::<i16>(row, idx)?.map(Value::Short),
        SqlKind::Int => get::<i32>(row, idx)?.map(Value::Int),
        SqlKind::Long => get::<i64>(row, idx)?.map(Value::Long),
        SqlKind::Float => get::<f32>(row, idx)?.map(Value::Float),
        SqlKind::Double => get::<f64>(row, idx)?.map(Value::Double),
        SqlKind::Text => get::<String>(row, idx)?.map(Value::Text),
        SqlKind::Binary => get::<Vec<u8>>(row, idx)?.map(Value::Binary),
        SqlKind::Date => get::<NaiveDate>(row, idx)?.map(Value::Date),
        SqlKind::Time => get::<NaiveTime>(row, idx)?.map(Value::Time),
        SqlKind::Timestamp if *ty == Type::TIMESTAMP => {
            get::<NaiveDateTime>(row, idx)?.map(|naive| Value::Timestamp(naive.and_utc()))
        }
        SqlKind::Timestamp => get::<DateTime<Utc>>(row, idx)?.map(Value::Timestamp),
    };
    Ok(value.unwrap_or(Value::Null))
}

fn decode_row(row: &PgRow) -> Result<Row, PostgresError> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| Ok((column.name().to_string(), decode_value(row, idx)?)))
        .collect()
}

fn decode_rows(rows: &[PgRow]) -> Result<Vec<Row>, PostgresError> {
    rows.iter().map(decode_row).collect()
}

/// An owned [`postgres::Client`] that runs tabula statements.
pub struct PostgresConnection {
    client: Client,
}

impl PostgresConnection {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The underlying client, for statements tabula does not build.
    #[inline]
    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }

    pub fn into_inner(self) -> Client {
        self.client
    }

    /// Begin a transaction. It rolls back when dropped uncommitted.
    pub fn transaction(&mut self) -> Result<PostgresTransaction<'_>, PostgresError> {
        Ok(PostgresTransaction {
            inner: self.client.transaction()?,
        })
    }
}

impl From<Client> for PostgresConnection {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

impl Connection for PostgresConnection {
    type Error = PostgresError;

    fn query(&mut self, statement: &str) -> Result<Vec<Row>, PostgresError> {
        let rows = self.client.query(statement, &[])?;
        decode_rows(&rows)
    }

    fn execute(&mut self, statement: &str) -> Result<u64, PostgresError> {
        Ok(self.client.execute(statement, &[])?)
    }
}

/// An open transaction on a [`PostgresConnection`].
pub struct PostgresTransaction<'a> {
    inner: Transaction<'a>,
}

impl PostgresTransaction<'_> {
    pub fn commit(self) -> Result<(), PostgresError> {
        Ok(self.inner.commit()?)
    }

    pub fn rollback(self) -> Result<(), PostgresError> {
        Ok(self.inner.rollback()?)
    }
}

impl Connection for PostgresTransaction<'_> {
    type Error = PostgresError;

    fn query(&mut self, statement: &str) -> Result<Vec<Row>, PostgresError> {
        let rows = self.inner.query(statement, &[])?;
        decode_rows(&rows)
    }

    fn execute(&mut self, statement: &str) -> Result<u64, PostgresError> {
        Ok(self.inner.execute(statement, &[])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_like_types_read_as_text() {
        for ty in [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME] {
            assert_eq!(sql_kind(&ty), Some(SqlKind::Text), "{ty}");
        }
    }

    #[test]
    fn both_timestamp_types_read_as_timestamp() {
        assert_eq!(sql_kind(&Type::TIMESTAMP), Some(SqlKind::Timestamp));
        assert_eq!(sql_kind(&Type::TIMESTAMPTZ), Some(SqlKind::Timestamp));
    }

    #[test]
    fn numeric_widths() {
        assert_eq!(sql_kind(&Type::INT2), Some(SqlKind::Short));
        assert_eq!(sql_kind(&Type::INT4), Some(SqlKind::Int));
        assert_eq!(sql_kind(&Type::INT8), Some(SqlKind::Long));
        assert_eq!(sql_kind(&Type::FLOAT4), Some(SqlKind::Float));
        assert_eq!(sql_kind(&Type::FLOAT8), Some(SqlKind::Double));
    }

    fn assert_connection<C: Connection<Error = PostgresError>>() {}

    #[test]
    fn wrappers_are_connections() {
        assert_connection::<PostgresConnection>();
        assert_connection::<PostgresTransaction<'static>>();
    }

    #[test]
    fn unsupported_types() {
        assert_eq!(sql_kind(&Type::JSONB), None);
        assert_eq!(sql_kind(&Type::UUID), None);
        assert_eq!(sql_kind(&Type::NUMERIC), None);
    }
}
