//! Tracing utilities for statement and session observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site. The feature is checked in the crate that expands the
//! macro, so driver crates carry their own `tracing` feature.

/// Emit a debug-level tracing event with the SQL text and the executor kind.
///
/// ```ignore
/// tabula_trace_query!(&sql, "select");
/// ```
#[macro_export]
macro_rules! tabula_trace_query {
    ($sql:expr, $executor:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(sql = %$sql, executor = $executor, "tabula.query");
    };
}

/// Emit a debug-level tracing event for a derived entity.
///
/// ```ignore
/// tabula_trace_schema!(description.type_name, &table_name, columns.len());
/// ```
#[macro_export]
macro_rules! tabula_trace_schema {
    ($type_name:expr, $table:expr, $columns:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(record = $type_name, table = %$table, columns = $columns, "tabula.schema");
    };
}

/// Emit an info-level tracing event for connection lifecycle (acquire, release).
///
/// ```ignore
/// tabula_trace_session!("acquire", "postgres.sync");
/// ```
#[macro_export]
macro_rules! tabula_trace_session {
    ($event:literal, $driver:literal) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!(event = $event, driver = $driver, "tabula.session");
    };
}
