//! Column descriptors and typed column handles.

use crate::converter::{Converter, DynConverter, identity_for};
use crate::error::{Error, Result};
use crate::expression::{Direction, EqExpression, Expression, OrderByTerm};
use crate::value::{SqlType, Value};
use core::any::Any;
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;
use tabula_types::SqlKind;

/// Schema metadata for one column.
///
/// Descriptors are immutable values: the modifier methods consume the
/// descriptor and return an updated copy.
///
/// ```
/// use tabula_core::ColumnDescriptor;
/// use tabula_core::SqlKind;
///
/// let id = ColumnDescriptor::of_kind("id", SqlKind::Int).primary().unique();
/// assert!(id.is_primary() && id.is_unique());
/// assert!(!id.has_default());
/// ```
#[derive(Clone, Debug)]
pub struct ColumnDescriptor {
    name: String,
    kind: SqlKind,
    primary: bool,
    unique: bool,
    nullable: bool,
    default: Option<String>,
    converter: Arc<dyn DynConverter>,
}

impl ColumnDescriptor {
    /// A column whose kind is the converter's SQL kind.
    pub fn new(name: impl Into<String>, converter: Arc<dyn DynConverter>) -> Self {
        Self {
            name: name.into(),
            kind: converter.sql_kind(),
            primary: false,
            unique: false,
            nullable: false,
            default: None,
            converter,
        }
    }

    /// A column of `kind` using the identity converter.
    pub fn of_kind(name: impl Into<String>, kind: SqlKind) -> Self {
        Self::new(name, identity_for(kind))
    }

    /// A column backed by the Rust type `T`.
    pub fn of<T: SqlType>(name: impl Into<String>) -> Self {
        Self::of_kind(name, T::KIND)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> SqlKind {
        self.kind
    }

    #[inline]
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    #[inline]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The default literal, present exactly when [`has_default`](Self::has_default) is true.
    #[inline]
    pub fn default_literal(&self) -> Option<&str> {
        self.default.as_deref()
    }

    #[inline]
    pub fn converter(&self) -> &Arc<dyn DynConverter> {
        &self.converter
    }

    #[must_use]
    pub fn primary(self) -> Self {
        Self {
            primary: true,
            ..self
        }
    }

    #[must_use]
    pub fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    #[must_use]
    pub fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    #[must_use]
    pub fn default_value(self, literal: impl Into<String>) -> Self {
        Self {
            default: Some(literal.into()),
            ..self
        }
    }

    /// Replace the converter. The column takes on the converter's SQL kind.
    #[must_use]
    pub fn with_converter(self, converter: Arc<dyn DynConverter>) -> Self {
        Self {
            kind: converter.sql_kind(),
            converter,
            ..self
        }
    }

    /// Convert a domain value (or its absence) to a SQL value.
    ///
    /// `None` becomes NULL without consulting the converter. A value of the
    /// wrong domain type is a [`Error::LiteralConversion`].
    pub fn encode(&self, value: Option<&dyn Any>) -> Result<Value> {
        match value {
            None => Ok(Value::Null),
            Some(value) => {
                self.converter
                    .encode(value)
                    .ok_or_else(|| Error::LiteralConversion {
                        column: self.name.clone(),
                        expected: self.converter.domain_type().to_string(),
                    })
            }
        }
    }
}

impl PartialEq for ColumnDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.primary == other.primary
            && self.unique == other.unique
            && self.nullable == other.nullable
            && self.default == other.default
            && self.converter.domain_type() == other.converter.domain_type()
    }
}

/// A typed handle on one column of entity `D`, converting through `C`.
///
/// The derive macro emits one of these per field as an associated constant,
/// e.g. `Person::ID`.
pub struct Column<D, C> {
    name: &'static str,
    _marker: PhantomData<fn() -> (D, C)>,
}

impl<D, C> Clone for Column<D, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, C> Copy for Column<D, C> {}

impl<D, C> fmt::Debug for Column<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.name).finish()
    }
}

impl<D, C> Column<D, C> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn asc(self) -> OrderByTerm {
        OrderByTerm::new(self.name, Direction::Asc)
    }

    pub fn desc(self) -> OrderByTerm {
        OrderByTerm::new(self.name, Direction::Desc)
    }
}

impl<D, C: Converter> Column<D, C> {
    fn encode(value: Option<C::Domain>) -> Value {
        value.map_or(Value::Null, |v| C::default().to_sql(&v).into_value())
    }

    /// `column = value`. `None` renders as `NULL`.
    pub fn eq(self, value: impl Into<Option<C::Domain>>) -> EqExpression {
        EqExpression::new(self.name, Self::encode(value.into()))
    }

    /// `column != value`. `None` renders as `NULL`.
    pub fn neq(self, value: impl Into<Option<C::Domain>>) -> Expression {
        Expression::Neq(EqExpression::new(self.name, Self::encode(value.into())))
    }

    /// `column in (v1, v2, ...)`.
    ///
    /// An empty list renders `in ()`, which matches no rows.
    pub fn is_in(self, values: impl IntoIterator<Item = C::Domain>) -> Expression {
        let converter = C::default();
        Expression::ValueIn {
            column: self.name.into(),
            values: values
                .into_iter()
                .map(|v| converter.to_sql(&v).into_value())
                .collect(),
        }
    }
}

/// A column of entity `D`, with its converter erased.
///
/// Used where heterogeneous columns are listed together, such as conflict
/// targets: `&[&Person::ID, &Person::NAME]`.
pub trait EntityColumn<D> {
    fn column_name(&self) -> &str;
}

impl<D, C> EntityColumn<D> for Column<D, C> {
    fn column_name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::Identity;

    struct Person;

    const ID: Column<Person, Identity<i32>> = Column::new("id");
    const NAME: Column<Person, Identity<String>> = Column::new("name");

    #[test]
    fn modifiers_return_updated_copies() {
        let base = ColumnDescriptor::of::<String>("name");
        let changed = base.clone().nullable().default_value("anon");
        assert!(!base.is_nullable());
        assert!(!base.has_default());
        assert!(changed.is_nullable());
        assert_eq!(changed.default_literal(), Some("anon"));
        assert_eq!(changed.kind(), SqlKind::Text);
    }

    #[test]
    fn modifiers_commute() {
        let a = ColumnDescriptor::of::<i32>("id").unique().primary().nullable();
        let b = ColumnDescriptor::of::<i32>("id").nullable().primary().unique();
        assert_eq!(a, b);
    }

    #[test]
    fn with_converter_adopts_the_converter_kind() {
        let column = ColumnDescriptor::of::<i32>("id").with_converter(identity_for(SqlKind::Long));
        assert_eq!(column.kind(), SqlKind::Long);
    }

    #[test]
    fn encode_checks_the_domain_type() {
        let column = ColumnDescriptor::of::<i32>("id");
        assert_eq!(column.encode(Some(&5_i32)).unwrap(), Value::Int(5));
        assert_eq!(column.encode(None).unwrap(), Value::Null);
        match column.encode(Some(&"five")) {
            Err(Error::LiteralConversion { column, expected }) => {
                assert_eq!(column, "id");
                assert_eq!(expected, "i32");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn typed_column_builders() {
        assert_eq!(ID.eq(5).render().unwrap(), "id = 5");
        assert_eq!(ID.eq(None::<i32>).render().unwrap(), "id = NULL");
        assert_eq!(
            NAME.neq(String::from("Ann")).render().unwrap(),
            "name != 'Ann'"
        );
        assert_eq!(ID.is_in([1, 2, 3]).render().unwrap(), "id in (1, 2, 3)");
        assert_eq!(ID.desc().render(), "id desc");
        assert_eq!(ID.column_name(), "id");
    }
}
