use thiserror::Error;

/// Errors raised while deriving an entity from a record description.
///
/// These are fatal to the record type: a failed derivation is memoized and
/// handed out again on every later access, which is why the type is `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field has no converter and its type is not in the type table
    #[error("Field '{field}' has unsupported column type '{ty}'")]
    UnsupportedColumnType { field: String, ty: String },

    /// A converter reference that cannot be resolved to a stateless converter
    #[error("Converter '{converter}' on field '{field}' is invalid: {reason}")]
    ConverterShape {
        field: String,
        converter: String,
        reason: String,
    },

    /// Two fields resolve to the same column name
    #[error("Fields '{first}' and '{second}' both map to column '{column}'")]
    DuplicateColumnName {
        column: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    /// Entity derivation failed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A domain value could not be turned into a SQL literal
    #[error("Cannot render a literal for column '{column}': expected a value of type '{expected}'")]
    LiteralConversion { column: String, expected: String },

    /// NaN and infinite floats have no literal form
    #[error("Cannot render non-finite float '{0}' as a SQL literal")]
    NonFiniteFloat(f64),

    /// An `and` chain was folded from zero expressions
    #[error("Cannot build a conjunction from zero expressions")]
    EmptyConjunction,

    /// A result row held NULL for a column that is not nullable
    #[error("Column '{column}' is not nullable but the row holds NULL")]
    NullabilityViolation { column: String },

    /// A query expected to return a row returned none
    #[error("No rows returned by: {statement}")]
    NoRowReturned { statement: String },

    /// The connection rejected or failed a statement
    #[error("Failed to execute '{statement}': {source}")]
    StatementExecution {
        statement: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A connection could not be acquired
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error mapping data
    #[error("Mapping error: {0}")]
    Mapping(String),
}

/// Result type for tabula operations
pub type Result<T> = std::result::Result<T, Error>;
