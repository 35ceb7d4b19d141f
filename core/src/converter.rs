//! Bidirectional domain ↔ SQL value converters.

use crate::error::Result;
use crate::value::{SqlType, Value};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use core::any::Any;
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;
use tabula_types::SqlKind;

/// Maps a domain value to a SQL-representable value and back.
///
/// Converters are stateless: `Default` builds the one instance a column
/// needs. Both directions must be total, and `to_domain(to_sql(v)) == v`.
///
/// ```
/// use tabula_core::Converter;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Mood { Happy, Grumpy }
///
/// #[derive(Default)]
/// struct MoodConverter;
///
/// impl Converter for MoodConverter {
///     type Domain = Mood;
///     type Sql = String;
///
///     fn to_sql(&self, value: &Mood) -> String {
///         match value {
///             Mood::Happy => "happy".into(),
///             Mood::Grumpy => "grumpy".into(),
///         }
///     }
///
///     fn to_domain(&self, value: String) -> Mood {
///         if value == "happy" { Mood::Happy } else { Mood::Grumpy }
///     }
/// }
///
/// let c = MoodConverter;
/// assert_eq!(c.to_domain(c.to_sql(&Mood::Grumpy)), Mood::Grumpy);
/// ```
pub trait Converter: Default + Send + Sync + 'static {
    type Domain: Send + Sync + 'static;
    type Sql: SqlType;

    fn to_sql(&self, value: &Self::Domain) -> Self::Sql;

    fn to_domain(&self, value: Self::Sql) -> Self::Domain;
}

/// The converter used when a field declares none.
pub struct Identity<T>(PhantomData<fn() -> T>);

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Identity(PhantomData)
    }
}

impl<T> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity<{}>", core::any::type_name::<T>())
    }
}

impl<T: SqlType> Converter for Identity<T> {
    type Domain = T;
    type Sql = T;

    fn to_sql(&self, value: &T) -> T {
        value.clone()
    }

    fn to_domain(&self, value: T) -> T {
        value
    }
}

/// Type-erased view of a [`Converter`], as stored on a column descriptor.
pub trait DynConverter: Send + Sync {
    fn sql_kind(&self) -> SqlKind;

    /// Name of the domain type, for diagnostics.
    fn domain_type(&self) -> &'static str;

    /// Convert a domain value to a SQL value.
    ///
    /// Returns `None` when `value` is not of the domain type.
    fn encode(&self, value: &dyn Any) -> Option<Value>;

    /// Convert a non-NULL SQL value to a boxed domain value.
    fn decode(&self, value: Value) -> Result<Box<dyn Any + Send>>;
}

impl<C: Converter> DynConverter for C {
    fn sql_kind(&self) -> SqlKind {
        <C::Sql as SqlType>::KIND
    }

    fn domain_type(&self) -> &'static str {
        core::any::type_name::<C::Domain>()
    }

    fn encode(&self, value: &dyn Any) -> Option<Value> {
        value
            .downcast_ref::<C::Domain>()
            .map(|domain| self.to_sql(domain).into_value())
    }

    fn decode(&self, value: Value) -> Result<Box<dyn Any + Send>> {
        let sql = <C::Sql as SqlType>::from_value(value)?;
        Ok(Box::new(self.to_domain(sql)))
    }
}

impl fmt::Debug for dyn DynConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Converter<{}, {}>", self.domain_type(), self.sql_kind())
    }
}

/// The identity converter for `kind`.
#[must_use]
pub fn identity_for(kind: SqlKind) -> Arc<dyn DynConverter> {
    match kind {
        SqlKind::Bool => Arc::new(Identity::<bool>::default()),
        SqlKind::Int => Arc::new(Identity::<i32>::default()),
        SqlKind::Long => Arc::new(Identity::<i64>::default()),
        SqlKind::Short => Arc::new(Identity::<i16>::default()),
        SqlKind::Float => Arc::new(Identity::<f32>::default()),
        SqlKind::Double => Arc::new(Identity::<f64>::default()),
        SqlKind::Text => Arc::new(Identity::<String>::default()),
        SqlKind::Binary => Arc::new(Identity::<Vec<u8>>::default()),
        SqlKind::Date => Arc::new(Identity::<NaiveDate>::default()),
        SqlKind::Time => Arc::new(Identity::<NaiveTime>::default()),
        SqlKind::Timestamp => Arc::new(Identity::<DateTime<Utc>>::default()),
    }
}
