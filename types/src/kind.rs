//! SQL kind definitions and the Rust type → kind table.

use core::fmt;

/// Every SQL kind a column can be declared with.
///
/// Adding a kind is a closed-set change: the keyword table, the type table,
/// the value model and the driver decoding all match on this exhaustively.
///
/// # Examples
///
/// ```
/// use tabula_types::SqlKind;
///
/// assert_eq!(SqlKind::Int.keyword(), "integer");
/// assert_eq!(SqlKind::from_type_string("i64"), Some(SqlKind::Long));
/// assert_eq!(SqlKind::from_type_string("Option<String>"), Some(SqlKind::Text));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlKind {
    /// `bool` -> BOOLEAN
    Bool,
    /// `i32` -> INTEGER
    Int,
    /// `i64` -> BIGINT
    Long,
    /// `i16` -> SMALLINT
    Short,
    /// `f32` -> REAL
    Float,
    /// `f64` -> FLOAT (double precision)
    Double,
    /// `String` -> TEXT
    Text,
    /// `Vec<u8>` -> BYTEA
    Binary,
    /// `chrono::NaiveDate` -> DATE
    Date,
    /// `chrono::NaiveTime` -> TIME
    Time,
    /// `chrono::DateTime<Utc>` -> TIMESTAMPTZ
    Timestamp,
}

impl SqlKind {
    /// All kinds, in declaration order.
    pub const ALL: [SqlKind; 11] = [
        SqlKind::Bool,
        SqlKind::Int,
        SqlKind::Long,
        SqlKind::Short,
        SqlKind::Float,
        SqlKind::Double,
        SqlKind::Text,
        SqlKind::Binary,
        SqlKind::Date,
        SqlKind::Time,
        SqlKind::Timestamp,
    ];

    /// The keyword used for this kind in `create table` statements.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            SqlKind::Bool => "boolean",
            SqlKind::Int => "integer",
            SqlKind::Long => "bigint",
            SqlKind::Short => "smallint",
            SqlKind::Float => "real",
            SqlKind::Double => "float",
            SqlKind::Text => "text",
            SqlKind::Binary => "bytea",
            SqlKind::Date => "date",
            SqlKind::Time => "time",
            SqlKind::Timestamp => "timestamptz",
        }
    }

    /// The canonical Rust type backing this kind.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            SqlKind::Bool => "bool",
            SqlKind::Int => "i32",
            SqlKind::Long => "i64",
            SqlKind::Short => "i16",
            SqlKind::Float => "f32",
            SqlKind::Double => "f64",
            SqlKind::Text => "String",
            SqlKind::Binary => "Vec<u8>",
            SqlKind::Date => "NaiveDate",
            SqlKind::Time => "NaiveTime",
            SqlKind::Timestamp => "DateTime<Utc>",
        }
    }

    /// Detect the kind from a type string representation.
    ///
    /// Whitespace is ignored, an `Option<...>` wrapper is looked through and
    /// only the last path segment counts, so `std::string::String`,
    /// `chrono::NaiveDate` and `Option<i32>` all resolve. Returns `None` for
    /// anything outside the table.
    #[must_use]
    pub fn from_type_string(type_str: &str) -> Option<Self> {
        let type_str: String = type_str.chars().filter(|c| !c.is_whitespace()).collect();

        if let Some(inner) = option_inner(&type_str) {
            return Self::from_type_string(inner);
        }

        // Vec<u8> and DateTime<Utc> carry generics, so match them before
        // stripping the path down to its last segment.
        let base = match type_str.find('<') {
            Some(open) => last_segment(&type_str[..open]),
            None => last_segment(&type_str),
        };
        let generics = type_str.find('<').map(|open| &type_str[open..]);

        match (base, generics) {
            ("bool", None) => Some(SqlKind::Bool),
            ("i32", None) => Some(SqlKind::Int),
            ("i64", None) => Some(SqlKind::Long),
            ("i16", None) => Some(SqlKind::Short),
            ("f32", None) => Some(SqlKind::Float),
            ("f64", None) => Some(SqlKind::Double),
            ("String", None) => Some(SqlKind::Text),
            ("Vec", Some("<u8>")) => Some(SqlKind::Binary),
            ("NaiveDate", None) => Some(SqlKind::Date),
            ("NaiveTime", None) => Some(SqlKind::Time),
            ("DateTime", Some(tz)) if last_segment(tz.trim_matches(['<', '>'])) == "Utc" => {
                Some(SqlKind::Timestamp)
            }
            _ => None,
        }
    }
}

/// The inner type of an `Option<...>` type string, written bare or through
/// `std::option` / `core::option`. Expects a string without whitespace.
///
/// ```
/// use tabula_types::option_inner;
///
/// assert_eq!(option_inner("Option<i32>"), Some("i32"));
/// assert_eq!(option_inner("::std::option::Option<Vec<u8>>"), Some("Vec<u8>"));
/// assert_eq!(option_inner("Vec<u8>"), None);
/// ```
pub fn option_inner(type_str: &str) -> Option<&str> {
    const PREFIXES: [&str; 5] = [
        "Option<",
        "std::option::Option<",
        "::std::option::Option<",
        "core::option::Option<",
        "::core::option::Option<",
    ];
    PREFIXES
        .iter()
        .find_map(|prefix| type_str.strip_prefix(prefix))
        .and_then(|rest| rest.strip_suffix('>'))
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl fmt::Display for SqlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
