//! Executors and the connection seam they run against.

use crate::entity::EntityDescriptor;
use crate::error::{Error, Result};
use crate::value::Value;
use core::any::Any;

/// One result row: column names paired with decoded values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn first(&self) -> Option<&Value> {
        self.columns.first().map(|(_, value)| value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// A live connection that runs plain statement text.
pub trait Connection {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a statement that returns rows.
    fn query(&mut self, statement: &str) -> std::result::Result<Vec<Row>, Self::Error>;

    /// Run a statement and return the number of affected rows.
    fn execute(&mut self, statement: &str) -> std::result::Result<u64, Self::Error>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    type Error = C::Error;

    fn query(&mut self, statement: &str) -> std::result::Result<Vec<Row>, Self::Error> {
        (**self).query(statement)
    }

    fn execute(&mut self, statement: &str) -> std::result::Result<u64, Self::Error> {
        (**self).execute(statement)
    }
}

pub(crate) fn statement_error<E>(statement: &str, source: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::StatementExecution {
        statement: statement.to_string(),
        source: Box::new(source),
    }
}

/// Runs a rendered statement and shapes its result.
pub trait Executor {
    type Output<D>;

    /// Short name used in logs.
    const NAME: &'static str;

    fn execute<D, C>(
        entity: &EntityDescriptor<D>,
        statement: &str,
        connection: &mut C,
    ) -> Result<Self::Output<D>>
    where
        C: Connection + ?Sized;
}

/// Reads the first column of the first row as an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountExecutor;

impl Executor for CountExecutor {
    type Output<D> = i64;

    const NAME: &'static str = "count";

    fn execute<D, C>(_entity: &EntityDescriptor<D>, statement: &str, connection: &mut C) -> Result<i64>
    where
        C: Connection + ?Sized,
    {
        let rows = connection
            .query(statement)
            .map_err(|err| statement_error(statement, err))?;
        let row = rows.first().ok_or_else(|| Error::NoRowReturned {
            statement: statement.to_string(),
        })?;
        match row.first() {
            Some(Value::Long(count)) => Ok(*count),
            Some(Value::Int(count)) => Ok(i64::from(*count)),
            Some(Value::Short(count)) => Ok(i64::from(*count)),
            Some(other) => Err(Error::Mapping(format!(
                "expected an integer count, got {other:?}"
            ))),
            None => Err(Error::Mapping("count row has no columns".to_string())),
        }
    }
}

/// Maps every row to a record through the entity's converters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectExecutor;

impl Executor for SelectExecutor {
    type Output<D> = Vec<D>;

    const NAME: &'static str = "select";

    fn execute<D, C>(
        entity: &EntityDescriptor<D>,
        statement: &str,
        connection: &mut C,
    ) -> Result<Vec<D>>
    where
        C: Connection + ?Sized,
    {
        let rows = connection
            .query(statement)
            .map_err(|err| statement_error(statement, err))?;

        rows.into_iter()
            .map(|row| {
                let values = entity
                    .columns()
                    .iter()
                    .map(|column| {
                        let value = row.get(column.name()).ok_or_else(|| {
                            Error::Mapping(format!(
                                "column '{}' missing from result row",
                                column.name()
                            ))
                        })?;
                        if value.is_null() {
                            if !column.is_nullable() {
                                return Err(Error::NullabilityViolation {
                                    column: column.name().to_string(),
                                });
                            }
                            return Ok(None);
                        }
                        column.converter().decode(value.clone()).map(Some)
                    })
                    .collect::<Result<Vec<Option<Box<dyn Any + Send>>>>>()?;
                entity.reconstruct(values)
            })
            .collect()
    }
}

/// Returns the affected-row count of an insert, update or delete.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutateExecutor;

impl Executor for MutateExecutor {
    type Output<D> = u64;

    const NAME: &'static str = "mutate";

    fn execute<D, C>(_entity: &EntityDescriptor<D>, statement: &str, connection: &mut C) -> Result<u64>
    where
        C: Connection + ?Sized,
    {
        connection
            .execute(statement)
            .map_err(|err| statement_error(statement, err))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::schema::derive_entity;
    use crate::schema::tests::{Person, person_description};
    use std::collections::VecDeque;

    #[derive(Debug, thiserror::Error)]
    #[error("scripted failure: {0}")]
    pub(crate) struct ScriptError(pub(crate) String);

    /// Replays queued results and records every statement it is given.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedConnection {
        pub(crate) statements: Vec<String>,
        pub(crate) results: VecDeque<std::result::Result<Vec<Row>, ScriptError>>,
        pub(crate) affected: u64,
    }

    impl Connection for ScriptedConnection {
        type Error = ScriptError;

        fn query(&mut self, statement: &str) -> std::result::Result<Vec<Row>, ScriptError> {
            self.statements.push(statement.to_string());
            self.results.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }

        fn execute(&mut self, statement: &str) -> std::result::Result<u64, ScriptError> {
            self.statements.push(statement.to_string());
            match self.results.pop_front() {
                Some(Err(err)) => Err(err),
                _ => Ok(self.affected),
            }
        }
    }

    fn person_row(id: i32, name: &str, age: Option<i32>) -> Row {
        Row::new()
            .with("id", id)
            .with("name", name.to_string())
            .with("age", age)
    }

    #[test]
    fn count_reads_the_first_column() {
        let entity = derive_entity(person_description()).unwrap();
        let mut conn = ScriptedConnection::default();
        conn.results
            .push_back(Ok(vec![Row::new().with("count", 3_i64)]));
        let count = CountExecutor::execute(&entity, "select count(*) from persontable", &mut conn)
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn count_without_rows_fails() {
        let entity = derive_entity(person_description()).unwrap();
        let mut conn = ScriptedConnection::default();
        conn.results.push_back(Ok(Vec::new()));
        let err = CountExecutor::execute(&entity, "select count(*) from persontable", &mut conn)
            .unwrap_err();
        assert!(matches!(err, Error::NoRowReturned { statement } if statement == "select count(*) from persontable"));
    }

    #[test]
    fn select_maps_rows() {
        let entity = derive_entity(person_description()).unwrap();
        let mut conn = ScriptedConnection::default();
        conn.results.push_back(Ok(vec![
            person_row(1, "Ann", None),
            person_row(2, "Bob", Some(40)),
        ]));
        let people = SelectExecutor::execute(&entity, "select * from persontable", &mut conn)
            .unwrap();
        assert_eq!(
            people,
            vec![
                Person {
                    id: 1,
                    name: "Ann".to_string(),
                    age: None
                },
                Person {
                    id: 2,
                    name: "Bob".to_string(),
                    age: Some(40)
                },
            ]
        );
    }

    #[test]
    fn select_reads_columns_by_name() {
        let entity = derive_entity(person_description()).unwrap();
        let mut conn = ScriptedConnection::default();
        conn.results.push_back(Ok(vec![Row::new()
            .with("age", 30)
            .with("name", "Cy".to_string())
            .with("id", 9)]));
        let people = SelectExecutor::execute(&entity, "select * from persontable", &mut conn)
            .unwrap();
        assert_eq!(people[0].id, 9);
        assert_eq!(people[0].age, Some(30));
    }

    #[test]
    fn select_rejects_null_in_non_nullable_columns() {
        let entity = derive_entity(person_description()).unwrap();
        let mut conn = ScriptedConnection::default();
        conn.results.push_back(Ok(vec![Row::new()
            .with("id", 1)
            .with("name", Value::Null)
            .with("age", Value::Null)]));
        let err = SelectExecutor::execute(&entity, "select * from persontable", &mut conn)
            .unwrap_err();
        assert!(matches!(err, Error::NullabilityViolation { column } if column == "name"));
    }

    #[test]
    fn select_reports_missing_columns() {
        let entity = derive_entity(person_description()).unwrap();
        let mut conn = ScriptedConnection::default();
        conn.results
            .push_back(Ok(vec![Row::new().with("id", 1)]));
        let err = SelectExecutor::execute(&entity, "select * from persontable", &mut conn)
            .unwrap_err();
        assert!(matches!(err, Error::Mapping(_)));
    }

    #[test]
    fn mutate_returns_the_affected_count() {
        let entity = derive_entity(person_description()).unwrap();
        let mut conn = ScriptedConnection {
            affected: 2,
            ..ScriptedConnection::default()
        };
        let affected = MutateExecutor::execute(&entity, "delete from persontable", &mut conn)
            .unwrap();
        assert_eq!(affected, 2);
        assert_eq!(conn.statements, ["delete from persontable"]);
    }

    #[test]
    fn connection_failures_carry_the_statement() {
        let entity = derive_entity(person_description()).unwrap();
        let mut conn = ScriptedConnection::default();
        conn.results
            .push_back(Err(ScriptError("syntax error".to_string())));
        let err = MutateExecutor::execute(&entity, "delete form persontable", &mut conn)
            .unwrap_err();
        match err {
            Error::StatementExecution { statement, source } => {
                assert_eq!(statement, "delete form persontable");
                assert_eq!(source.to_string(), "scripted failure: syntax error");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
