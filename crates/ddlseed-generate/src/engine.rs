//! Stateful generation session driven by overrides and free-text instructions.

use ddlseed_core::normalize::{CanonicalSchema, CanonicalTable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GenerateError, Result};
use crate::generator::{DataGenerator, GenerateOptions};
use crate::instruction::Instruction;
use crate::overrides::Override;
use crate::value::{GeneratedData, Row};

const INSTRUCTION_HINT: &str =
    "Try: 'generate 100 rows' or 'set Companies.industry from list Tech,Finance'";

/// Overrides keyed by table, then column.
pub type OverrideSet = IndexMap<String, IndexMap<String, Override>>;

/// One entry of the generation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Rows requested per table.
    pub rows: usize,
    /// Overrides in effect for this run.
    pub overrides: OverrideSet,
    /// Rows actually produced per table.
    pub row_counts: IndexMap<String, usize>,
}

/// Result of applying an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionOutcome {
    /// Whether the instruction was understood and applied.
    pub ok: bool,
    /// Human-readable summary.
    pub message: String,
}

impl InstructionOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Generates data for a schema and keeps overrides, the latest data and a
/// history of runs between calls.
pub struct InstructionEngine {
    generator: DataGenerator,
    rows_per_table: usize,
    overrides: OverrideSet,
    data: GeneratedData,
    history: Vec<GenerationRecord>,
}

impl InstructionEngine {
    /// Creates an engine with default generation options.
    #[must_use]
    pub fn new(schema: CanonicalSchema) -> Self {
        Self::with_options(schema, GenerateOptions::default())
    }

    /// Creates an engine with the given generation options.
    #[must_use]
    pub fn with_options(schema: CanonicalSchema, options: GenerateOptions) -> Self {
        Self {
            rows_per_table: options.rows_per_table,
            generator: DataGenerator::with_options(schema, options),
            overrides: OverrideSet::new(),
            data: GeneratedData::new(),
            history: Vec::new(),
        }
    }

    /// Returns the underlying generator.
    #[must_use]
    pub const fn generator(&self) -> &DataGenerator {
        &self.generator
    }

    /// Rows generated per table on the next run.
    #[must_use]
    pub const fn rows_per_table(&self) -> usize {
        self.rows_per_table
    }

    /// Overrides currently installed.
    #[must_use]
    pub const fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    /// Data from the latest run; empty before the first one.
    #[must_use]
    pub const fn data(&self) -> &GeneratedData {
        &self.data
    }

    /// Every run so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Installs an override, replacing any previous one on the same column.
    ///
    /// Table and column names are matched exactly first, then ignoring
    /// ASCII case; the override is stored under the schema's spelling.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnknownTable`] or
    /// [`GenerateError::UnknownColumn`] if the names are not in the schema.
    pub fn add_override(&mut self, table: &str, column: &str, rule: Override) -> Result<()> {
        let (table, column) = self.resolve(table, column)?;
        info!(table = %table, column = %column, rule = %rule, "Override set");

        self.overrides
            .entry(table)
            .or_default()
            .insert(column, rule);
        Ok(())
    }

    /// Removes an override, returning it if one was installed.
    pub fn remove_override(&mut self, table: &str, column: &str) -> Option<Override> {
        let (table, column) = self.resolve(table, column).ok()?;
        let columns = self.overrides.get_mut(&table)?;
        let removed = columns.shift_remove(&column);
        if columns.is_empty() {
            self.overrides.shift_remove(&table);
        }
        removed
    }

    /// Removes every override.
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Generates [`rows_per_table`](Self::rows_per_table) rows per table.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema's foreign keys form a cycle.
    pub fn generate(&mut self) -> Result<&GeneratedData> {
        self.generate_rows(self.rows_per_table)
    }

    /// Generates `rows` rows per table, applies the overrides and records
    /// the run in the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema's foreign keys form a cycle.
    pub fn generate_rows(&mut self, rows: usize) -> Result<&GeneratedData> {
        let mut data = self.generator.generate_rows(rows)?;

        for (table, columns) in &self.overrides {
            let Some(table_rows) = data.get_mut(table) else {
                continue;
            };
            for (index, row) in table_rows.iter_mut().enumerate() {
                for (column, rule) in columns {
                    row.insert(column.clone(), rule.value(self.generator.rng(), index));
                }
            }
        }

        self.history.push(GenerationRecord {
            rows,
            overrides: self.overrides.clone(),
            row_counts: data
                .iter()
                .map(|(name, table_rows)| (name.clone(), table_rows.len()))
                .collect(),
        });
        self.data = data;
        Ok(&self.data)
    }

    /// The first `n` rows of a table from the latest run.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnknownTable`] if the table is not in the
    /// schema.
    pub fn preview(&self, table: &str, n: usize) -> Result<&[Row]> {
        let name = &self.table(table)?.name;
        let rows = self.data.get(name).map_or(&[][..], Vec::as_slice);
        Ok(&rows[..n.min(rows.len())])
    }

    /// Parses and applies a free-text instruction.
    ///
    /// Text that is not understood, names that are not in the schema and
    /// unknown faker providers produce an outcome with `ok == false`.
    ///
    /// # Errors
    ///
    /// Returns an error only if a requested generation fails.
    pub fn apply_instruction(&mut self, text: &str) -> Result<InstructionOutcome> {
        let instruction = match Instruction::parse(text) {
            Ok(Some(instruction)) => instruction,
            Ok(None) => {
                debug!(text, "instruction not understood");
                return Ok(InstructionOutcome::rejected(format!(
                    "Instruction not understood. {INSTRUCTION_HINT}"
                )));
            }
            Err(err) => return Ok(InstructionOutcome::rejected(err.to_string())),
        };

        match instruction {
            Instruction::Generate(rows) => {
                self.rows_per_table = rows;
                let tables = self.generate()?.len();
                Ok(InstructionOutcome::ok(format!(
                    "Generated {rows} rows for each of {tables} tables"
                )))
            }
            Instruction::SetOverride {
                table,
                column,
                rule,
            } => {
                let message = format!("{table}.{column} set to {rule}");
                match self.add_override(&table, &column, rule) {
                    Ok(()) => Ok(InstructionOutcome::ok(message)),
                    Err(
                        err @ (GenerateError::UnknownTable(_)
                        | GenerateError::UnknownColumn { .. }),
                    ) => Ok(InstructionOutcome::rejected(err.to_string())),
                    Err(err) => Err(err),
                }
            }
            Instruction::ClearOverrides => {
                self.clear_overrides();
                Ok(InstructionOutcome::ok("Overrides cleared"))
            }
        }
    }

    fn table(&self, name: &str) -> Result<&CanonicalTable> {
        let schema = self.generator.schema();
        schema
            .table(name)
            .or_else(|| {
                schema
                    .tables
                    .values()
                    .find(|t| t.name.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| GenerateError::UnknownTable(name.to_string()))
    }

    fn resolve(&self, table: &str, column: &str) -> Result<(String, String)> {
        let found = self.table(table)?;
        let column = found
            .columns
            .keys()
            .find(|c| *c == column)
            .or_else(|| found.columns.keys().find(|c| c.eq_ignore_ascii_case(column)))
            .ok_or_else(|| GenerateError::UnknownColumn {
                table: found.name.clone(),
                column: column.to_string(),
            })?;
        Ok((found.name.clone(), column.to_string()))
    }
}
