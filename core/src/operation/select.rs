use super::{Operation, SelectOperation, Statement};
use crate::column::EntityColumn;
use crate::entity::EntityDescriptor;
use crate::error::Result;
use crate::executor::{CountExecutor, SelectExecutor};

/// `select * from {table}`
#[derive(Debug)]
pub struct Select<'e, D> {
    entity: &'e EntityDescriptor<D>,
}

pub fn select<D>(entity: &EntityDescriptor<D>) -> Select<'_, D> {
    Select { entity }
}

impl<'e, D> Select<'e, D> {
    /// `select count(*) from {table}`
    pub fn count(self) -> SelectCount<'e, D> {
        SelectCount {
            entity: self.entity,
            column: None,
        }
    }

    /// `select count({column}) from {table}`, which skips NULLs.
    pub fn count_column(self, column: &dyn EntityColumn<D>) -> SelectCount<'e, D> {
        SelectCount {
            entity: self.entity,
            column: Some(column.column_name().to_string()),
        }
    }
}

impl<D> Statement for Select<'_, D> {
    fn render(&self) -> Result<String> {
        Ok(format!("select * from {}", self.entity.table_name()))
    }
}

impl<D> Operation for Select<'_, D> {
    type Record = D;
    type Executor = SelectExecutor;

    fn entity(&self) -> &EntityDescriptor<D> {
        self.entity
    }
}

impl<D> SelectOperation for Select<'_, D> {}

#[derive(Debug)]
pub struct SelectCount<'e, D> {
    entity: &'e EntityDescriptor<D>,
    column: Option<String>,
}

impl<D> Statement for SelectCount<'_, D> {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "select count({}) from {}",
            self.column.as_deref().unwrap_or("*"),
            self.entity.table_name()
        ))
    }
}

impl<D> Operation for SelectCount<'_, D> {
    type Record = D;
    type Executor = CountExecutor;

    fn entity(&self) -> &EntityDescriptor<D> {
        self.entity
    }
}

impl<D> SelectOperation for SelectCount<'_, D> {}
