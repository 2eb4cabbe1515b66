//! Fake data for schemas parsed by `ddlseed-core`.
//!
//! Rows are generated table by table in foreign-key order, so referencing
//! columns always point at rows that exist. Column values are picked from
//! the column's type, CHECK bounds, ENUM options and name.
//!
//! # Example
//!
//! ```rust
//! use ddlseed_core::prelude::*;
//! use ddlseed_generate::prelude::*;
//!
//! let schema = schema_from_tables(&parse_ddl(
//!     "CREATE TABLE Companies (company_id INT PRIMARY KEY, industry VARCHAR(50));",
//! ));
//!
//! let mut engine = InstructionEngine::with_options(schema, GenerateOptions::new().seed(7));
//! engine.apply_instruction("set Companies.industry from list Tech,Finance").unwrap();
//! engine.apply_instruction("generate 3 rows").unwrap();
//!
//! let rows = engine.preview("Companies", 10).unwrap();
//! assert_eq!(rows.len(), 3);
//! assert_eq!(rows[0].get("company_id"), Some(&Value::Integer(1)));
//! ```

pub mod engine;
pub mod error;
pub mod generator;
pub mod infer;
pub mod instruction;
pub mod overrides;
pub mod value;
pub mod words;

pub use error::{GenerateError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::engine::{GenerationRecord, InstructionEngine, InstructionOutcome, OverrideSet};
    pub use crate::error::{GenerateError, Result};
    pub use crate::generator::{DataGenerator, GenerateOptions, DEFAULT_ROWS_PER_TABLE};
    pub use crate::infer::{infer_kind, TextKind, ValueKind};
    pub use crate::instruction::Instruction;
    pub use crate::overrides::{Override, Provider};
    pub use crate::value::{GeneratedData, Row, Value};
}
