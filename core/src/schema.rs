//! Schema derivation: from a structural record description to an
//! [`EntityDescriptor`].
//!
//! The description is usually emitted by `#[derive(Entity)]`, but it is a
//! plain value and can be written by hand. Either way the same checks run
//! here: unsupported field types, malformed converter references and
//! duplicate column names are all rejected.

use crate::column::ColumnDescriptor;
use crate::converter::{Converter, DynConverter, identity_for};
use crate::entity::{Accessor, EntityDescriptor, Reconstruct};
use crate::error::{Error, Result, SchemaError};
use core::any::{Any, type_name};
use core::fmt;
use hashbrown::HashMap;
use std::sync::Arc;
use tabula_types::{SqlKind, option_inner};

/// Per-field configuration. Every field defaults to off.
#[derive(Debug, Clone, Default)]
pub struct ColumnConfig {
    /// Column name override. Empty counts as absent.
    pub column_name: Option<String>,
    pub primary_key: bool,
    pub unique: bool,
    pub nullable: bool,
    /// Default literal for `create table`.
    pub default_value: Option<String>,
    pub converter: Option<ConverterRef>,
}

/// A reference to the converter a field maps through.
///
/// It must declare exactly two type arguments, the domain type and the SQL
/// type, and carry a stateless converter instance.
#[derive(Debug, Clone)]
pub struct ConverterRef {
    name: String,
    type_arguments: Vec<String>,
    instance: Option<Arc<dyn DynConverter>>,
}

impl ConverterRef {
    /// A resolved reference to converter `C`.
    pub fn of<C: Converter>() -> Self {
        Self {
            name: type_name::<C>().to_string(),
            type_arguments: vec![
                type_name::<C::Domain>().to_string(),
                type_name::<C::Sql>().to_string(),
            ],
            instance: Some(Arc::new(C::default())),
        }
    }

    /// An unresolved reference, as read from an external description.
    ///
    /// Deriving an entity with it fails unless it is
    /// [resolved](Self::with_instance) first.
    pub fn named<I, S>(name: impl Into<String>, type_arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            type_arguments: type_arguments.into_iter().map(Into::into).collect(),
            instance: None,
        }
    }

    #[must_use]
    pub fn with_instance(self, instance: Arc<dyn DynConverter>) -> Self {
        Self {
            instance: Some(instance),
            ..self
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_arguments(&self) -> &[String] {
        &self.type_arguments
    }

    fn resolve(&self, field: &str) -> std::result::Result<Arc<dyn DynConverter>, SchemaError> {
        let shape_error = |reason: String| SchemaError::ConverterShape {
            field: field.to_string(),
            converter: self.name.clone(),
            reason,
        };

        let [_, sql_type] = self.type_arguments.as_slice() else {
            return Err(shape_error(format!(
                "expected exactly two type arguments (domain, sql), found {}",
                self.type_arguments.len()
            )));
        };
        let instance = self
            .instance
            .clone()
            .ok_or_else(|| shape_error("not a stateless converter value".to_string()))?;
        match SqlKind::from_type_string(sql_type) {
            Some(kind) if kind == instance.sql_kind() => Ok(instance),
            Some(kind) => Err(shape_error(format!(
                "declares SQL type {kind} but converts to {}",
                instance.sql_kind()
            ))),
            None => Err(shape_error(format!(
                "'{sql_type}' is not a SQL-representable type"
            ))),
        }
    }
}

/// A field's declared type, split from its `Option` wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub name: String,
    pub optional: bool,
}

impl FieldType {
    pub fn new(name: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            optional,
        }
    }

    /// Split a declared type such as `Option<i32>`.
    pub fn parse(declared: &str) -> Self {
        let compact: String = declared.chars().filter(|c| !c.is_whitespace()).collect();
        match option_inner(&compact) {
            Some(inner) => Self::new(inner, true),
            None => Self::new(compact, false),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "Option<{}>", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

pub struct FieldDescription<D> {
    pub name: String,
    pub ty: FieldType,
    pub config: ColumnConfig,
    pub accessor: Accessor<D>,
}

impl<D> FieldDescription<D> {
    pub fn new(name: impl Into<String>, ty: FieldType, accessor: Accessor<D>) -> Self {
        Self {
            name: name.into(),
            ty,
            config: ColumnConfig::default(),
            accessor,
        }
    }

    #[must_use]
    pub fn with_config(self, config: ColumnConfig) -> Self {
        Self { config, ..self }
    }
}

/// The structural description of one record type.
pub struct RecordDescription<D> {
    pub type_name: String,
    /// Table name override. Empty counts as absent.
    pub table_name: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescription<D>>,
    pub reconstruct: Reconstruct<D>,
}

/// Derive the entity descriptor for a record description.
///
/// Column order follows field order. The table name is the override if
/// present, else the lowercased type name followed by `table`.
pub fn derive_entity<D>(
    description: RecordDescription<D>,
) -> std::result::Result<EntityDescriptor<D>, SchemaError> {
    let mut owners: HashMap<String, String> = HashMap::with_capacity(description.fields.len());
    let mut columns = Vec::with_capacity(description.fields.len());

    for field in description.fields {
        let column = derive_column(&field)?;
        if let Some(first) = owners.insert(column.name().to_string(), field.name.clone()) {
            return Err(SchemaError::DuplicateColumnName {
                column: column.name().to_string(),
                first,
                second: field.name,
            });
        }
        columns.push((column, field.accessor));
    }

    let table_name = description
        .table_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| default_table_name(&description.type_name));

    crate::tabula_trace_schema!(description.type_name.as_str(), &table_name, columns.len());

    Ok(EntityDescriptor::new(
        table_name,
        columns,
        description.reconstruct,
    ))
}

fn derive_column<D>(
    field: &FieldDescription<D>,
) -> std::result::Result<ColumnDescriptor, SchemaError> {
    let config = &field.config;
    let name = config
        .column_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(&field.name);

    let converter = match &config.converter {
        Some(reference) => reference.resolve(&field.name)?,
        None => SqlKind::from_type_string(&field.ty.name)
            .map(identity_for)
            .ok_or_else(|| SchemaError::UnsupportedColumnType {
                field: field.name.clone(),
                ty: field.ty.to_string(),
            })?,
    };

    let mut column = ColumnDescriptor::new(name, converter);
    if config.unique {
        column = column.unique();
    }
    if config.primary_key {
        column = column.primary();
    }
    if config.nullable || field.ty.optional {
        column = column.nullable();
    }
    if let Some(default) = &config.default_value {
        column = column.default_value(default.clone());
    }
    Ok(column)
}

fn default_table_name(type_name: &str) -> String {
    let base = type_name.rsplit("::").next().unwrap_or(type_name);
    format!("{}table", base.to_lowercase())
}

/// Hands out reconstructed field values in column order.
///
/// ```ignore
/// let mut values = FieldValues::new(values);
/// Ok(Person { id: values.take("id")?, age: values.take_optional("age")? })
/// ```
pub struct FieldValues {
    values: std::vec::IntoIter<Option<Box<dyn Any + Send>>>,
}

impl FieldValues {
    pub fn new(values: Vec<Option<Box<dyn Any + Send>>>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// The next value, which must be present.
    pub fn take<T: 'static>(&mut self, field: &str) -> Result<T> {
        self.take_optional(field)?
            .ok_or_else(|| Error::Mapping(format!("field '{field}' has no value")))
    }

    /// The next value, which may be absent.
    pub fn take_optional<T: 'static>(&mut self, field: &str) -> Result<Option<T>> {
        let slot = self
            .values
            .next()
            .ok_or_else(|| Error::Mapping(format!("no value left for field '{field}'")))?;
        slot.map(|boxed| {
            boxed.downcast::<T>().map(|value| *value).map_err(|_| {
                Error::Mapping(format!(
                    "field '{field}' expects a value of type '{}'",
                    type_name::<T>()
                ))
            })
        })
        .transpose()
    }
}
