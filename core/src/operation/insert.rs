use super::{MutateOperation, Operation, Statement, render_assignments};
use crate::column::EntityColumn;
use crate::entity::EntityDescriptor;
use crate::error::Result;
use crate::executor::MutateExecutor;
use crate::expression::EqExpression;
use crate::value::Value;

/// `insert into {table}({columns})`
///
/// Not executable on its own; add [`values`](Insert::values).
#[derive(Debug)]
pub struct Insert<'e, D> {
    entity: &'e EntityDescriptor<D>,
}

pub fn insert<D>(entity: &EntityDescriptor<D>) -> Insert<'_, D> {
    Insert { entity }
}

impl<'e, D> Insert<'e, D> {
    /// Insert every field of `record`.
    pub fn values(self, record: &D) -> Result<InsertValues<'e, D>> {
        let assignments = self.entity.to_eq_expressions(record)?;
        Ok(self.values_from(assignments))
    }

    /// Insert explicit column values. Columns without one are written as
    /// `NULL`; assignments naming no column of the entity are not rendered.
    pub fn values_from(self, assignments: impl IntoIterator<Item = EqExpression>) -> InsertValues<'e, D> {
        InsertValues {
            insert: self,
            assignments: assignments.into_iter().collect(),
        }
    }
}

impl<D> Statement for Insert<'_, D> {
    fn render(&self) -> Result<String> {
        let columns = self
            .entity
            .columns()
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("insert into {}({columns})", self.entity.table_name()))
    }
}

/// `... values({one literal per column})`
#[derive(Debug)]
pub struct InsertValues<'e, D> {
    insert: Insert<'e, D>,
    assignments: Vec<EqExpression>,
}

impl<'e, D> InsertValues<'e, D> {
    /// `... on conflict ({targets}) do update set ...`
    pub fn on_conflict(
        self,
        targets: &[&dyn EntityColumn<D>],
        action: ConflictingUpdateSet<'e, D>,
    ) -> OnConflict<'e, D> {
        OnConflict {
            values: self,
            targets: targets.iter().map(|c| c.column_name().to_string()).collect(),
            action: Some(action),
        }
    }

    /// `... on conflict ({targets}) do nothing`
    pub fn on_conflict_do_nothing(self, targets: &[&dyn EntityColumn<D>]) -> OnConflict<'e, D> {
        OnConflict {
            values: self,
            targets: targets.iter().map(|c| c.column_name().to_string()).collect(),
            action: None,
        }
    }
}

impl<D> Statement for InsertValues<'_, D> {
    fn render(&self) -> Result<String> {
        let literals = self
            .insert
            .entity
            .columns()
            .iter()
            .map(|column| {
                match self.assignments.iter().find(|eq| eq.column() == column.name()) {
                    Some(eq) => eq.value().to_literal(),
                    None => Value::Null.to_literal(),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(
            "{} values({})",
            self.insert.render()?,
            literals.join(", ")
        ))
    }
}

impl<D> Operation for InsertValues<'_, D> {
    type Record = D;
    type Executor = MutateExecutor;

    fn entity(&self) -> &EntityDescriptor<D> {
        self.insert.entity
    }
}

impl<D> MutateOperation for InsertValues<'_, D> {}

/// `... on conflict ({targets}) do {update set ... | nothing}`
#[derive(Debug)]
pub struct OnConflict<'e, D> {
    values: InsertValues<'e, D>,
    targets: Vec<String>,
    action: Option<ConflictingUpdateSet<'e, D>>,
}

impl<D> Statement for OnConflict<'_, D> {
    fn render(&self) -> Result<String> {
        let action = match &self.action {
            Some(action) => action.render()?,
            None => "nothing".to_string(),
        };
        Ok(format!(
            "{} on conflict ({}) do {action}",
            self.values.render()?,
            self.targets.join(", ")
        ))
    }
}

impl<D> Operation for OnConflict<'_, D> {
    type Record = D;
    type Executor = MutateExecutor;

    fn entity(&self) -> &EntityDescriptor<D> {
        self.values.insert.entity
    }
}

impl<D> MutateOperation for OnConflict<'_, D> {}

/// `update`, the start of an on-conflict action.
#[derive(Debug)]
pub struct ConflictingUpdate<'e, D> {
    entity: &'e EntityDescriptor<D>,
}

pub fn conflicting_update<D>(entity: &EntityDescriptor<D>) -> ConflictingUpdate<'_, D> {
    ConflictingUpdate { entity }
}

impl<'e, D> ConflictingUpdate<'e, D> {
    /// Overwrite every column with the fields of `record`.
    pub fn set(self, record: &D) -> Result<ConflictingUpdateSet<'e, D>> {
        let assignments = self.entity.to_eq_expressions(record)?;
        Ok(self.set_values(assignments))
    }

    pub fn set_values(
        self,
        assignments: impl IntoIterator<Item = EqExpression>,
    ) -> ConflictingUpdateSet<'e, D> {
        ConflictingUpdateSet {
            update: self,
            assignments: assignments.into_iter().collect(),
        }
    }
}

impl<D> Statement for ConflictingUpdate<'_, D> {
    fn render(&self) -> Result<String> {
        Ok("update".to_string())
    }
}

/// `update set {assignments}`
#[derive(Debug)]
pub struct ConflictingUpdateSet<'e, D> {
    update: ConflictingUpdate<'e, D>,
    assignments: Vec<EqExpression>,
}

impl<D> Statement for ConflictingUpdateSet<'_, D> {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "{} set {}",
            self.update.render()?,
            render_assignments(&self.assignments)?
        ))
    }
}
