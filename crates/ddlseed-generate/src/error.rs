//! Error types for data generation and overrides.

use ddlseed_core::SchemaError;

/// Errors raised by `ddlseed-generate`.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// An override or preview named a table the schema does not have.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// An override named a column its table does not have.
    #[error("unknown column: {table}.{column}")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A faker override named a provider that does not exist.
    #[error("unknown faker provider: {0}")]
    UnknownProvider(String),

    /// Schema error (e.g. circular foreign keys).
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for `ddlseed-generate` operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
