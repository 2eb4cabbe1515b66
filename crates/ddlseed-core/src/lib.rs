//! Schema extraction from SQL `CREATE TABLE` scripts.
//!
//! `ddlseed-core` reads DDL without a full SQL grammar and turns it into
//! structured tables that downstream tools can reason about:
//! - Nested parentheses, quoted literals and `--` comments inside table
//!   bodies are handled by one small scanner
//! - Unparseable items are kept as placeholder columns, never dropped
//! - Tables can be ordered by their foreign keys, tolerating or rejecting
//!   cycles
//!
//! # Architecture
//!
//! - **Lexer** - Quote- and parenthesis-aware scanning of DDL segments
//! - **Parser** - Statement discovery, item classification, column and
//!   constraint detection
//! - **Normalize** - Canonical, JSON-serializable schema
//! - **Order** - Foreign-key dependency ordering
//! - **Query** - SQL for structured query intents
//!
//! # Example
//!
//! ```rust
//! use ddlseed_core::prelude::*;
//!
//! let tables = parse_ddl(
//!     "CREATE TABLE Departments (id INT PRIMARY KEY, name VARCHAR(100));
//!      CREATE TABLE Employees (
//!          id INT AUTO_INCREMENT PRIMARY KEY,
//!          dept_id INT,
//!          FOREIGN KEY (dept_id) REFERENCES Departments(id)
//!      );",
//! );
//!
//! let order = tables_dependency_order(&tables);
//! assert_eq!(order, vec!["Departments", "Employees"]);
//!
//! let schema = schema_from_tables(&tables);
//! assert!(schema.table("Employees").unwrap().column("id").unwrap().primary_key);
//! ```

pub mod error;
pub mod lexer;
pub mod normalize;
pub mod order;
pub mod parser;
pub mod query;
pub mod schema;

pub use error::{Result, SchemaError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, SchemaError};
    pub use crate::normalize::{
        load_schema_json, normalize_type, save_schema_json, schema_from_tables, CanonicalColumn,
        CanonicalForeignKey, CanonicalSchema, CanonicalTable, SchemaMeta, TableOutline,
    };
    pub use crate::order::{dependency_order, tables_dependency_order, DependencyNode, OrderPolicy};
    pub use crate::parser::{parse_ddl, parse_ddl_file, DdlParser, ParseOptions};
    pub use crate::query::{AggregateMetric, QueryAction, QueryBuilder, QueryIntent};
    pub use crate::schema::{summarize, Column, ForeignKey, Table};
}
