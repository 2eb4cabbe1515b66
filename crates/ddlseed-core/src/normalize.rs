//! Canonical schema built from parsed tables.
//!
//! The canonical form is what every downstream consumer reads: the data
//! generator, the intent layer and the JSON files written by the CLI. Tables
//! and columns are keyed by name in declaration order, and types keep their
//! source vocabulary (upper-cased, whitespace collapsed).

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::schema::{ForeignKey, Table};

/// Format version written into [`SchemaMeta`].
pub const SCHEMA_VERSION: u32 = 1;

/// Producer name written into [`SchemaMeta`].
pub const SCHEMA_GENERATOR: &str = "ddl_parser";

/// Upper-cases a raw type and collapses whitespace runs to one space.
#[must_use]
pub fn normalize_type(raw_type: &str) -> String {
    raw_type
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// A column in the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalColumn {
    /// Normalized type, e.g. `DECIMAL(10,2)`.
    #[serde(rename = "type")]
    pub sql_type: String,
    /// NOT NULL marker.
    pub not_null: bool,
    /// Default expression, verbatim.
    #[serde(default)]
    pub default: Option<String>,
    /// Inline PRIMARY marker or membership in the table's primary keys.
    pub primary_key: bool,
    /// UNIQUE marker.
    pub unique: bool,
    /// `AUTO_INCREMENT` marker.
    #[serde(default)]
    pub auto_increment: bool,
    /// CHECK expression.
    #[serde(default)]
    pub check: Option<String>,
}

/// A foreign key in the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalForeignKey {
    /// Referencing columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub ref_table: String,
    /// Referenced columns.
    pub ref_columns: Vec<String>,
}

impl From<&ForeignKey> for CanonicalForeignKey {
    fn from(fk: &ForeignKey) -> Self {
        Self {
            columns: fk.cols.clone(),
            ref_table: fk.ref_table.clone(),
            ref_columns: fk.ref_cols.clone(),
        }
    }
}

/// A table in the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTable {
    /// Table name.
    pub name: String,
    /// Columns keyed by name, in declaration order.
    pub columns: IndexMap<String, CanonicalColumn>,
    /// Primary key column names.
    #[serde(default)]
    pub primary_keys: Vec<String>,
    /// Foreign keys.
    #[serde(default)]
    pub foreign_keys: Vec<CanonicalForeignKey>,
}

impl CanonicalTable {
    /// Gets a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&CanonicalColumn> {
        self.columns.get(name)
    }

    /// The first foreign key whose referencing columns include `column`.
    #[must_use]
    pub fn foreign_key_for(&self, column: &str) -> Option<&CanonicalForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.columns.iter().any(|c| c == column))
    }
}

impl From<&Table> for CanonicalTable {
    fn from(table: &Table) -> Self {
        let columns = table
            .columns
            .iter()
            .map(|col| {
                let column = CanonicalColumn {
                    sql_type: normalize_type(&col.raw_type),
                    not_null: col.not_null,
                    default: col.default.clone(),
                    primary_key: col.is_primary || table.is_primary_key(&col.name),
                    unique: col.is_unique,
                    auto_increment: col.auto_increment,
                    check: col.check.clone(),
                };
                (col.name.clone(), column)
            })
            .collect();

        Self {
            name: table.name.clone(),
            columns,
            primary_keys: table.primary_keys.clone(),
            foreign_keys: table.foreign_keys.iter().map(Into::into).collect(),
        }
    }
}

/// Provenance of a canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMeta {
    /// Format version.
    pub version: u32,
    /// Producer name.
    pub generator: String,
}

impl Default for SchemaMeta {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            generator: SCHEMA_GENERATOR.to_string(),
        }
    }
}

/// Name-only view of a table, as consumed by the intent layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOutline {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnOutline>,
}

/// Name-only view of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOutline {
    /// Column name.
    pub name: String,
}

/// The canonical schema: tables keyed by name plus provenance metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSchema {
    /// Tables keyed by name, in declaration order.
    pub tables: IndexMap<String, CanonicalTable>,
    /// Provenance.
    #[serde(default)]
    pub meta: SchemaMeta,
}

impl CanonicalSchema {
    /// Builds the canonical schema from parsed tables. A later table with the
    /// same name replaces an earlier one.
    #[must_use]
    pub fn from_tables(tables: &[Table]) -> Self {
        Self {
            tables: tables
                .iter()
                .map(|t| (t.name.clone(), CanonicalTable::from(t)))
                .collect(),
            meta: SchemaMeta::default(),
        }
    }

    /// Gets a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&CanonicalTable> {
        self.tables.get(name)
    }

    /// Name-only view of every table and its columns.
    #[must_use]
    pub fn outline(&self) -> Vec<TableOutline> {
        self.tables
            .values()
            .map(|t| TableOutline {
                name: t.name.clone(),
                columns: t
                    .columns
                    .keys()
                    .map(|name| ColumnOutline { name: name.clone() })
                    .collect(),
            })
            .collect()
    }

    /// Serializes to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a schema from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a canonical schema.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builds the canonical schema from parsed tables.
#[must_use]
pub fn schema_from_tables(tables: &[Table]) -> CanonicalSchema {
    CanonicalSchema::from_tables(tables)
}

/// Writes the canonical schema of `tables` to `path` as indented JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_schema_json(tables: &[Table], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = schema_from_tables(tables).to_json_pretty()?;
    fs::write(path, json)?;
    info!("Schema saved to {}", path.display());
    Ok(())
}

/// Reads a canonical schema from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_schema_json(path: impl AsRef<Path>) -> Result<CanonicalSchema> {
    let json = fs::read_to_string(path.as_ref())?;
    CanonicalSchema::from_json(&json)
}
