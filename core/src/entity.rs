//! Entity descriptors: the derived schema of one record type.

use crate::column::ColumnDescriptor;
use crate::error::{Error, Result, SchemaError};
use crate::expression::{EqExpression, Expression};
use crate::schema::{RecordDescription, derive_entity};
use core::any::Any;
use core::fmt;
use std::sync::OnceLock;

/// Reads one field of `D`. `None` stands for an absent optional value.
pub type Accessor<D> = fn(&D) -> Option<&dyn Any>;

/// Builds a `D` from one domain value per column, in column order.
pub type Reconstruct<D> = fn(Vec<Option<Box<dyn Any + Send>>>) -> Result<D>;

/// The immutable schema and reconstruction contract for record type `D`.
///
/// Built once by [`derive_entity`] and shared read-only afterwards.
pub struct EntityDescriptor<D> {
    table_name: String,
    columns: Vec<ColumnDescriptor>,
    accessors: Vec<Accessor<D>>,
    primary_key: OnceLock<PrimaryKey>,
    reconstruct: Reconstruct<D>,
}

impl<D> EntityDescriptor<D> {
    pub(crate) fn new(
        table_name: String,
        columns: Vec<(ColumnDescriptor, Accessor<D>)>,
        reconstruct: Reconstruct<D>,
    ) -> Self {
        let (columns, accessors) = columns.into_iter().unzip();
        Self {
            table_name,
            columns,
            accessors,
            primary_key: OnceLock::new(),
            reconstruct,
        }
    }

    #[inline]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Columns in field declaration order.
    #[inline]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Each column paired with the accessor for its field.
    pub fn column_to_field(&self) -> impl Iterator<Item = (&ColumnDescriptor, Accessor<D>)> + '_ {
        self.columns.iter().zip(self.accessors.iter().copied())
    }

    /// The columns marked primary, computed on first access.
    pub fn primary_key(&self) -> &PrimaryKey {
        self.primary_key.get_or_init(|| PrimaryKey {
            columns: self
                .columns
                .iter()
                .filter(|c| c.is_primary())
                .cloned()
                .collect(),
        })
    }

    /// Build a `D` from one value per column, in column order.
    pub fn reconstruct(&self, values: Vec<Option<Box<dyn Any + Send>>>) -> Result<D> {
        if values.len() != self.columns.len() {
            return Err(Error::Mapping(format!(
                "{} expects {} values, got {}",
                self.table_name,
                self.columns.len(),
                values.len()
            )));
        }
        (self.reconstruct)(values)
    }

    /// `column = value` for every column, in column order.
    pub fn to_eq_expressions(&self, instance: &D) -> Result<Vec<EqExpression>> {
        self.column_to_field()
            .map(|(column, accessor)| {
                let value = column.encode(accessor(instance))?;
                Ok(EqExpression::new(column.name().to_string(), value))
            })
            .collect()
    }

    /// All of [`to_eq_expressions`](Self::to_eq_expressions) joined by `and`.
    ///
    /// Fails with [`Error::EmptyConjunction`] when the entity has no columns.
    pub fn to_expression(&self, instance: &D) -> Result<Expression> {
        Expression::all(self.to_eq_expressions(instance)?)
    }
}

impl<D> fmt::Debug for EntityDescriptor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("table_name", &self.table_name)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// The ordered subset of an entity's columns marked primary.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    columns: Vec<ColumnDescriptor>,
}

impl PrimaryKey {
    #[inline]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for PrimaryKey {
    /// `primary key(a, b)`, or nothing when no column is primary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return Ok(());
        }
        f.write_str("primary key(")?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(column.name())?;
        }
        f.write_str(")")
    }
}

/// A record type with a derived entity descriptor.
///
/// Usually implemented with `#[derive(Entity)]`.
pub trait Entity: Sized + 'static {
    /// The structural description the descriptor is derived from.
    fn description() -> RecordDescription<Self>;

    /// The memoized descriptor for this type.
    fn entity() -> Result<&'static EntityDescriptor<Self>>;
}

/// Memoizes the derivation of one entity, successful or not.
///
/// ```ignore
/// static ENTITY: EntityCell<Person> = EntityCell::new();
/// ENTITY.get_or_derive(Person::description)
/// ```
pub struct EntityCell<D>(OnceLock<std::result::Result<EntityDescriptor<D>, SchemaError>>);

impl<D> EntityCell<D> {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    pub fn get_or_derive(
        &'static self,
        describe: fn() -> RecordDescription<D>,
    ) -> Result<&'static EntityDescriptor<D>> {
        self.0
            .get_or_init(|| derive_entity(describe()))
            .as_ref()
            .map_err(|err| Error::Schema(err.clone()))
    }
}

impl<D> Default for EntityCell<D> {
    fn default() -> Self {
        Self::new()
    }
}
