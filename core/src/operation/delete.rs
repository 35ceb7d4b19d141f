use super::{MutateOperation, Operation, Statement, Where};
use crate::entity::EntityDescriptor;
use crate::error::Result;
use crate::executor::MutateExecutor;
use crate::expression::Expression;

/// `delete from {table}`
#[derive(Debug)]
pub struct Delete<'e, D> {
    entity: &'e EntityDescriptor<D>,
}

pub fn delete<D>(entity: &EntityDescriptor<D>) -> Delete<'_, D> {
    Delete { entity }
}

impl<D> Delete<'_, D> {
    pub fn r#where(self, condition: impl Into<Expression>) -> Where<Self> {
        Where::new(self, condition.into())
    }

    /// Delete the rows equal to `record` in every column.
    pub fn where_matches(self, record: &D) -> Result<Where<Self>> {
        let condition = self.entity.to_expression(record)?;
        Ok(Where::new(self, condition))
    }
}

impl<D> Statement for Delete<'_, D> {
    fn render(&self) -> Result<String> {
        Ok(format!("delete from {}", self.entity.table_name()))
    }
}

impl<D> Operation for Delete<'_, D> {
    type Record = D;
    type Executor = MutateExecutor;

    fn entity(&self) -> &EntityDescriptor<D> {
        self.entity
    }
}

impl<D> MutateOperation for Delete<'_, D> {}
