use super::{MutateOperation, Operation, Statement, Where, render_assignments};
use crate::entity::EntityDescriptor;
use crate::error::Result;
use crate::executor::MutateExecutor;
use crate::expression::{EqExpression, Expression};

/// `update {table}`
///
/// Not executable on its own; add [`set`](Update::set).
#[derive(Debug)]
pub struct Update<'e, D> {
    entity: &'e EntityDescriptor<D>,
}

pub fn update<D>(entity: &EntityDescriptor<D>) -> Update<'_, D> {
    Update { entity }
}

impl<'e, D> Update<'e, D> {
    /// Set every column to the fields of `record`.
    pub fn set(self, record: &D) -> Result<UpdateSet<'e, D>> {
        let assignments = self.entity.to_eq_expressions(record)?;
        Ok(self.set_values(assignments))
    }

    pub fn set_values(self, assignments: impl IntoIterator<Item = EqExpression>) -> UpdateSet<'e, D> {
        UpdateSet {
            update: self,
            assignments: assignments.into_iter().collect(),
        }
    }
}

impl<D> Statement for Update<'_, D> {
    fn render(&self) -> Result<String> {
        Ok(format!("update {}", self.entity.table_name()))
    }
}

/// `update {table} set {assignments}`
#[derive(Debug)]
pub struct UpdateSet<'e, D> {
    update: Update<'e, D>,
    assignments: Vec<EqExpression>,
}

impl<'e, D> UpdateSet<'e, D> {
    pub fn r#where(self, condition: impl Into<Expression>) -> Where<Self> {
        Where::new(self, condition.into())
    }
}

impl<D> Statement for UpdateSet<'_, D> {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "{} set {}",
            self.update.render()?,
            render_assignments(&self.assignments)?
        ))
    }
}

impl<D> Operation for UpdateSet<'_, D> {
    type Record = D;
    type Executor = MutateExecutor;

    fn entity(&self) -> &EntityDescriptor<D> {
        self.update.entity
    }
}

impl<D> MutateOperation for UpdateSet<'_, D> {}
