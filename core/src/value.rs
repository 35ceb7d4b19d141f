//! Kind-tagged SQL values and their literal rendering.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tabula_types::SqlKind;

/// A SQL-representable value, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// SQL NULL
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Short(i16),
    Float(f32),
    Double(f64),
    Text(String),
    Binary(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// The kind of this value, or `None` for NULL.
    #[must_use]
    pub const fn kind(&self) -> Option<SqlKind> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => SqlKind::Bool,
            Value::Int(_) => SqlKind::Int,
            Value::Long(_) => SqlKind::Long,
            Value::Short(_) => SqlKind::Short,
            Value::Float(_) => SqlKind::Float,
            Value::Double(_) => SqlKind::Double,
            Value::Text(_) => SqlKind::Text,
            Value::Binary(_) => SqlKind::Binary,
            Value::Date(_) => SqlKind::Date,
            Value::Time(_) => SqlKind::Time,
            Value::Timestamp(_) => SqlKind::Timestamp,
        })
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render this value as SQL literal text.
    ///
    /// Text and temporal values are single-quoted with embedded quotes
    /// doubled. Numbers and booleans are bare, NULL is `NULL`, and binary
    /// data uses the bytea hex form `'\x...'`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabula_core::Value;
    ///
    /// assert_eq!(Value::Int(5).to_literal().unwrap(), "5");
    /// assert_eq!(Value::Text("O'Hara".into()).to_literal().unwrap(), "'O''Hara'");
    /// assert_eq!(Value::Null.to_literal().unwrap(), "NULL");
    /// ```
    pub fn to_literal(&self) -> Result<String> {
        Ok(match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Long(v) => v.to_string(),
            Value::Short(v) => v.to_string(),
            Value::Float(v) => {
                ensure_finite(f64::from(*v))?;
                v.to_string()
            }
            Value::Double(v) => {
                ensure_finite(*v)?;
                v.to_string()
            }
            Value::Text(v) => quote(v),
            Value::Binary(bytes) => {
                let mut hex = String::with_capacity(bytes.len() * 2 + 4);
                hex.push_str("'\\x");
                for byte in bytes {
                    hex.push_str(&format!("{byte:02x}"));
                }
                hex.push('\'');
                hex
            }
            Value::Date(v) => quote(&v.format("%Y-%m-%d").to_string()),
            Value::Time(v) => quote(&v.format("%H:%M:%S%.f").to_string()),
            Value::Timestamp(v) => quote(&v.format("%Y-%m-%d %H:%M:%S%.f%:z").to_string()),
        })
    }
}

fn ensure_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFiniteFloat(value))
    }
}

/// Wrap `text` in single quotes, doubling any embedded quote.
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// A Rust type that backs exactly one [`SqlKind`].
pub trait SqlType: Clone + Send + Sync + 'static {
    const KIND: SqlKind;

    fn into_value(self) -> Value;

    /// Extract `Self` from a non-NULL value of the matching kind.
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_sql_type {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl SqlType for $ty {
                const KIND: SqlKind = SqlKind::$kind;

                fn into_value(self) -> Value {
                    Value::$kind(self)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$kind(v) => Ok(v),
                        other => Err(Error::Mapping(format!(
                            "expected a {} value, got {:?}",
                            SqlKind::$kind,
                            other
                        ))),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$kind(value)
                }
            }
        )*
    };
}

impl_sql_type! {
    bool => Bool,
    i32 => Int,
    i64 => Long,
    i16 => Short,
    f32 => Float,
    f64 => Double,
    String => Text,
    Vec<u8> => Binary,
    NaiveDate => Date,
    NaiveTime => Time,
    DateTime<Utc> => Timestamp,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bare_literals() {
        assert_eq!(Value::Bool(true).to_literal().unwrap(), "true");
        assert_eq!(Value::Int(-7).to_literal().unwrap(), "-7");
        assert_eq!(Value::Long(9_000_000_000).to_literal().unwrap(), "9000000000");
        assert_eq!(Value::Short(3).to_literal().unwrap(), "3");
        assert_eq!(Value::Double(1.5).to_literal().unwrap(), "1.5");
        assert_eq!(Value::Float(0.25).to_literal().unwrap(), "0.25");
    }

    #[test]
    fn quoted_literals() {
        assert_eq!(Value::Text("Ann".into()).to_literal().unwrap(), "'Ann'");
        assert_eq!(
            Value::Text("it's".into()).to_literal().unwrap(),
            "'it''s'"
        );
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Value::Date(date).to_literal().unwrap(), "'2024-02-29'");
        let time = NaiveTime::from_hms_opt(13, 5, 0).unwrap();
        assert_eq!(Value::Time(time).to_literal().unwrap(), "'13:05:00'");
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            Value::Timestamp(ts).to_literal().unwrap(),
            "'2024-01-02 03:04:05+00:00'"
        );
        assert_eq!(
            Value::Binary(vec![0xde, 0xad, 0x01]).to_literal().unwrap(),
            "'\\xdead01'"
        );
    }

    #[test]
    fn binary_literal_pads_each_byte() {
        assert_eq!(
            Value::Binary(vec![0x00, 0x0f, 0xa0]).to_literal().unwrap(),
            "'\\x000fa0'"
        );
        assert_eq!(Value::Binary(Vec::new()).to_literal().unwrap(), "'\\x'");
    }

    #[test]
    fn null_literal() {
        assert_eq!(Value::Null.to_literal().unwrap(), "NULL");
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert!(matches!(
            Value::Double(f64::NAN).to_literal(),
            Err(Error::NonFiniteFloat(_))
        ));
        assert!(matches!(
            Value::Float(f32::INFINITY).to_literal(),
            Err(Error::NonFiniteFloat(_))
        ));
    }

    #[test]
    fn from_value_checks_the_kind() {
        assert_eq!(i32::from_value(Value::Int(4)).unwrap(), 4);
        assert!(matches!(
            i32::from_value(Value::Long(4)),
            Err(Error::Mapping(_))
        ));
        assert!(matches!(
            String::from_value(Value::Null),
            Err(Error::Mapping(_))
        ));
    }

    #[test]
    fn kinds() {
        assert_eq!(Value::Null.kind(), None);
        assert_eq!(Value::Text(String::new()).kind(), Some(SqlKind::Text));
        assert_eq!(<DateTime<Utc> as SqlType>::KIND, SqlKind::Timestamp);
    }
}
