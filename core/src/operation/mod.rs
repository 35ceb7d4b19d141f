//! The statement algebra.
//!
//! A statement is a root node (`select`, `insert`, `update`, `delete`)
//! wrapped by decorators that each append one clause. Rendering is always
//! `inner.render() + " " + own clause`, so the nesting order the caller
//! chooses is the clause order of the statement. Nothing is reordered or
//! validated: `limit` before `where` renders exactly that way.
//!
//! Decorators are only available on compatible roots. Select-category
//! decorators come from [`SelectOperation`]; mutate statements expose their
//! own builder methods. Mixing them does not compile:
//!
//! ```compile_fail
//! use tabula_core::EntityDescriptor;
//! use tabula_core::operation::{SelectOperation, delete};
//!
//! fn limit_a_delete<D>(entity: &EntityDescriptor<D>) {
//!     let _ = delete(entity).limit(1);
//! }
//! ```
//!
//! ```compile_fail
//! use tabula_core::EntityDescriptor;
//! use tabula_core::operation::select;
//!
//! fn set_on_select<D>(entity: &EntityDescriptor<D>) {
//!     let _ = select(entity).set_values(Vec::new());
//! }
//! ```

mod delete;
mod insert;
mod select;
mod update;

pub use delete::{Delete, delete};
pub use insert::{
    ConflictingUpdate, ConflictingUpdateSet, Insert, InsertValues, OnConflict, conflicting_update,
    insert,
};
pub use select::{Select, SelectCount, select};
pub use update::{Update, UpdateSet, update};

use crate::entity::EntityDescriptor;
use crate::error::Result;
use crate::executor::{Connection, Executor, MutateExecutor};
use crate::expression::{EqExpression, Expression, render_list};
use smallvec::SmallVec;

/// Anything that renders to SQL text.
pub trait Statement {
    fn render(&self) -> Result<String>;
}

/// What executing `O` returns.
pub type Output<O> = <<O as Operation>::Executor as Executor>::Output<<O as Operation>::Record>;

/// An executable statement bound to an entity and an executor.
pub trait Operation: Statement {
    type Record;
    type Executor: Executor;

    fn entity(&self) -> &EntityDescriptor<Self::Record>;

    /// Render the statement and run it on `connection`.
    fn execute<C>(&self, connection: &mut C) -> Result<Output<Self>>
    where
        C: Connection + ?Sized,
        Self: Sized,
    {
        let statement = self.render()?;
        crate::tabula_trace_query!(&statement, <Self::Executor as Executor>::NAME);
        <Self::Executor as Executor>::execute(self.entity(), &statement, connection)
    }
}

/// Statements in the select category: `select` and `select count`.
pub trait SelectOperation: Operation + Sized {
    fn r#where(self, condition: impl Into<Expression>) -> Where<Self> {
        Where {
            inner: self,
            condition: condition.into(),
        }
    }

    fn limit(self, limit: u64) -> Limit<Self> {
        Limit { inner: self, limit }
    }

    fn offset(self, offset: u64) -> Offset<Self> {
        Offset {
            inner: self,
            offset,
        }
    }

    /// `order by t1, t2, ...`.
    fn order_by<I>(self, terms: I) -> OrderBy<Self>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        OrderBy {
            inner: self,
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }
}

/// Statements in the mutate category: insert, update and delete.
pub trait MutateOperation: Operation<Executor = MutateExecutor> {}

/// `... where {condition}`
#[derive(Debug)]
pub struct Where<O> {
    inner: O,
    condition: Expression,
}

impl<O> Where<O> {
    pub(crate) fn new(inner: O, condition: Expression) -> Self {
        Self { inner, condition }
    }
}

impl<O: Statement> Statement for Where<O> {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "{} where {}",
            self.inner.render()?,
            self.condition.render()?
        ))
    }
}

/// `... limit {n}`
#[derive(Debug)]
pub struct Limit<O> {
    inner: O,
    limit: u64,
}

impl<O: Statement> Statement for Limit<O> {
    fn render(&self) -> Result<String> {
        Ok(format!("{} limit {}", self.inner.render()?, self.limit))
    }
}

/// `... offset {n}`
#[derive(Debug)]
pub struct Offset<O> {
    inner: O,
    offset: u64,
}

impl<O: Statement> Statement for Offset<O> {
    fn render(&self) -> Result<String> {
        Ok(format!("{} offset {}", self.inner.render()?, self.offset))
    }
}

/// `... order by {terms}`
#[derive(Debug)]
pub struct OrderBy<O> {
    inner: O,
    terms: Vec<Expression>,
}

impl<O: Statement> Statement for OrderBy<O> {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "{} order by {}",
            self.inner.render()?,
            render_list(&self.terms)?
        ))
    }
}

macro_rules! impl_decorator {
    ($($decorator:ident),*) => {
        $(
            impl<O: Operation> Operation for $decorator<O> {
                type Record = O::Record;
                type Executor = O::Executor;

                fn entity(&self) -> &EntityDescriptor<Self::Record> {
                    self.inner.entity()
                }
            }

            impl<O: SelectOperation> SelectOperation for $decorator<O> {}
        )*
    };
}

impl_decorator!(Where, Limit, Offset, OrderBy);

impl<O: MutateOperation> MutateOperation for Where<O> {}

/// `a = 1, b = 'x'`
pub(crate) fn render_assignments(assignments: &[EqExpression]) -> Result<String> {
    let parts = assignments
        .iter()
        .map(EqExpression::render)
        .collect::<Result<SmallVec<[String; 8]>>>()?;
    Ok(parts.join(", "))
}
