//! Error types for schema loading, ordering and query building.
//!
//! Malformed DDL is never an error: the parser degrades unparseable items
//! to placeholder columns. Errors are reserved for I/O, serialization,
//! strict dependency ordering and incomplete query intents.

/// Errors raised by `ddlseed-core`.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Tables whose foreign keys form a cycle, under strict ordering.
    #[error("Circular dependency detected between tables: {}", .tables.join(", "))]
    CircularDependency {
        /// Tables that never became free of unresolved references.
        tables: Vec<String>,
    },

    /// A query intent needs a table and has none.
    #[error("{action} intent requires a table")]
    MissingTable {
        /// The intent's action.
        action: String,
    },

    /// An aggregate intent has no metric.
    #[error("aggregate intent requires a metric")]
    MissingMetric,

    /// The intent's action has no SQL rendering.
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// IO error (reading DDL, reading/writing schema files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for `ddlseed-core` operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
