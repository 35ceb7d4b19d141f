#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use tabula::{Connection, Converter, Entity, Row, Session};

#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Person {
    #[column(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: Option<i32>,
}

impl Person {
    pub fn new(id: i32, name: &str, age: Option<i32>) -> Self {
        Self {
            id,
            name: name.to_string(),
            age,
        }
    }

    pub fn row(&self) -> Row {
        Row::new()
            .with("id", self.id)
            .with("name", self.name.clone())
            .with("age", self.age)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Calm,
    Cheerful,
    Grumpy,
}

/// Stores a mood by name.
#[derive(Default)]
pub struct MoodConverter;

impl Converter for MoodConverter {
    type Domain = Mood;
    type Sql = String;

    fn to_sql(&self, mood: &Mood) -> String {
        match mood {
            Mood::Calm => "calm",
            Mood::Cheerful => "cheerful",
            Mood::Grumpy => "grumpy",
        }
        .to_string()
    }

    fn to_domain(&self, name: String) -> Mood {
        match name.as_str() {
            "cheerful" => Mood::Cheerful,
            "grumpy" => Mood::Grumpy,
            _ => Mood::Calm,
        }
    }
}

/// Answers queries from a script and records every statement it sees.
#[derive(Default)]
pub struct ScriptedConnection {
    pub statements: Vec<String>,
    pub results: VecDeque<Result<Vec<Row>, io::Error>>,
    pub affected: u64,
}

impl ScriptedConnection {
    pub fn returning(rows: Vec<Row>) -> Self {
        Self {
            results: VecDeque::from([Ok(rows)]),
            ..Self::default()
        }
    }

    pub fn affecting(affected: u64) -> Self {
        Self {
            affected,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            results: VecDeque::from([Err(io::Error::other(message.to_string()))]),
            ..Self::default()
        }
    }
}

impl Connection for ScriptedConnection {
    type Error = io::Error;

    fn query(&mut self, statement: &str) -> Result<Vec<Row>, io::Error> {
        self.statements.push(statement.to_string());
        self.results.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn execute(&mut self, statement: &str) -> Result<u64, io::Error> {
        self.statements.push(statement.to_string());
        match self.results.pop_front() {
            Some(Err(err)) => Err(err),
            _ => Ok(self.affected),
        }
    }
}

/// A session over one scripted connection that counts acquire and release.
#[derive(Default)]
pub struct ScriptedSession {
    pub connection: RefCell<ScriptedConnection>,
    pub acquired: Cell<usize>,
    pub released: Cell<usize>,
}

impl Session for ScriptedSession {
    type Connection = ScriptedConnection;

    fn connection<T, F>(&self, f: F) -> tabula::Result<T>
    where
        F: FnOnce(&mut ScriptedConnection) -> tabula::Result<T>,
    {
        self.acquired.set(self.acquired.get() + 1);
        let result = f(&mut self.connection.borrow_mut());
        self.released.set(self.released.get() + 1);
        result
    }
}
