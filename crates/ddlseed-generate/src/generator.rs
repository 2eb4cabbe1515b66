//! Fake row generation over a canonical schema.
//!
//! Tables are filled in strict foreign-key order so that referencing columns
//! can reuse values from rows already generated for the referenced table.

use std::collections::HashMap;

use chrono::{Days, Local, NaiveDate};
use ddlseed_core::normalize::{CanonicalSchema, CanonicalTable};
use ddlseed_core::order::OrderPolicy;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use tracing::{debug, info};

use crate::error::Result;
use crate::infer::{infer_kind, TextKind, ValueKind};
use crate::value::{GeneratedData, Row, Value};
use crate::words;

/// Default number of rows generated per table.
pub const DEFAULT_ROWS_PER_TABLE: usize = 5;

/// How far back generated dates reach.
const DATE_SPAN_DAYS: u64 = 730;

/// Generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Rows generated per table.
    pub rows_per_table: usize,
    /// Seed for the random generator. Output is reproducible when set.
    pub seed: Option<u64>,
    /// Date that generated dates count back from. Defaults to today.
    pub reference_date: Option<NaiveDate>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            rows_per_table: DEFAULT_ROWS_PER_TABLE,
            seed: None,
            reference_date: None,
        }
    }
}

impl GenerateOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rows generated per table.
    #[must_use]
    pub const fn rows_per_table(mut self, rows: usize) -> Self {
        self.rows_per_table = rows;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the date generated dates count back from.
    #[must_use]
    pub const fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}

/// Produces fake rows for every table of a schema.
pub struct DataGenerator {
    schema: CanonicalSchema,
    options: GenerateOptions,
    seed: u64,
    rng: StdRng,
    counters: HashMap<(String, String), i64>,
}

impl DataGenerator {
    /// Creates a generator with default options.
    #[must_use]
    pub fn new(schema: CanonicalSchema) -> Self {
        Self::with_options(schema, GenerateOptions::default())
    }

    /// Creates a generator with the given options.
    #[must_use]
    pub fn with_options(schema: CanonicalSchema, options: GenerateOptions) -> Self {
        let seed = options.seed.unwrap_or_else(rand::random);
        debug!(seed, "seeding data generator");
        Self {
            schema,
            options,
            seed,
            rng: StdRng::seed_from_u64(seed),
            counters: HashMap::new(),
        }
    }

    /// Returns the schema.
    #[must_use]
    pub const fn schema(&self) -> &CanonicalSchema {
        &self.schema
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Returns the seed in use, whether given or drawn.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Generates the configured number of rows per table.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema's foreign keys form a cycle.
    pub fn generate(&mut self) -> Result<GeneratedData> {
        self.generate_rows(self.options.rows_per_table)
    }

    /// Generates `rows` rows per table. Counters restart at 1 on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema's foreign keys form a cycle.
    pub fn generate_rows(&mut self, rows: usize) -> Result<GeneratedData> {
        let order = self.schema.dependency_order(OrderPolicy::Strict)?;
        let today = self
            .options
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());

        let Self {
            schema,
            rng,
            counters,
            ..
        } = self;
        counters.clear();

        let mut data = GeneratedData::new();
        for name in order {
            let Some(table) = schema.table(&name) else {
                continue;
            };
            let mut ctx = TableContext {
                table,
                data: &data,
                rng: &mut *rng,
                counters: &mut *counters,
                today,
            };
            let table_rows = ctx.rows(rows);
            debug!(table = %name, rows = table_rows.len(), "generated table");
            data.insert(name, table_rows);
        }

        info!(tables = data.len(), rows_per_table = rows, "Generated data");
        Ok(data)
    }
}

struct TableContext<'a> {
    table: &'a CanonicalTable,
    data: &'a GeneratedData,
    rng: &'a mut StdRng,
    counters: &'a mut HashMap<(String, String), i64>,
    today: NaiveDate,
}

impl TableContext<'_> {
    fn rows(&mut self, count: usize) -> Vec<Row> {
        let table = self.table;
        let kinds: Vec<(&str, ValueKind)> = table
            .columns
            .iter()
            .map(|(name, column)| (name.as_str(), infer_kind(name, column)))
            .collect();

        (0..count)
            .map(|index| {
                kinds
                    .iter()
                    .map(|(name, kind)| {
                        let value = self
                            .foreign_value(name)
                            .unwrap_or_else(|| self.value(name, kind, index));
                        ((*name).to_string(), value)
                    })
                    .collect::<Row>()
            })
            .collect()
    }

    /// A value of the referenced column from a random row of the referenced
    /// table, if that table already has rows.
    fn foreign_value(&mut self, column: &str) -> Option<Value> {
        let fk = self.table.foreign_key_for(column)?;
        let ref_column = fk.ref_columns.first()?;
        let rows = self.data.get(&fk.ref_table).filter(|rows| !rows.is_empty())?;
        rows[self.rng.random_range(0..rows.len())]
            .get(ref_column)
            .cloned()
    }

    fn value(&mut self, column: &str, kind: &ValueKind, index: usize) -> Value {
        let rng = &mut *self.rng;
        match kind {
            ValueKind::Counter => {
                let counter = self
                    .counters
                    .entry((self.table.name.clone(), column.to_string()))
                    .or_insert(0);
                *counter += 1;
                Value::Integer(*counter)
            }
            ValueKind::Text(text) => Value::Text(fake_text(*text, rng, index)),
            ValueKind::Sentence => Value::Text(words::sentence(rng)),
            ValueKind::Integer { min, max } => Value::Integer(rng.random_range(*min..=*max)),
            ValueKind::Decimal => {
                let amount: f64 = rng.random_range(1000.0..50000.0);
                Value::Float((amount * 100.0).round() / 100.0)
            }
            ValueKind::Date => Value::Text(
                past_date(rng, self.today)
                    .format("%Y-%m-%d")
                    .to_string(),
            ),
            ValueKind::Timestamp => {
                let date = past_date(rng, self.today);
                let time = date.and_hms_opt(
                    rng.random_range(0..24),
                    rng.random_range(0..60),
                    rng.random_range(0..60),
                );
                time.map_or(Value::Null, |t| {
                    Value::Text(t.format("%Y-%m-%d %H:%M:%S").to_string())
                })
            }
            ValueKind::Enum(options) => {
                Value::Text(options[rng.random_range(0..options.len())].clone())
            }
            ValueKind::Boolean => Value::Integer(rng.random_range(0..=1)),
            ValueKind::Null => Value::Null,
        }
    }
}

fn past_date(rng: &mut StdRng, today: NaiveDate) -> NaiveDate {
    let back = rng.random_range(0..=DATE_SPAN_DAYS);
    today.checked_sub_days(Days::new(back)).unwrap_or(today)
}

fn fake_text(kind: TextKind, rng: &mut StdRng, index: usize) -> String {
    match kind {
        TextKind::Company => words::company(rng),
        TextKind::Email => words::email(rng, index),
        TextKind::Phone => words::phone(rng),
        TextKind::Address => words::address(rng),
        TextKind::City => words::city(rng),
        TextKind::State => words::state(rng),
        TextKind::Zip => words::zip(rng),
        TextKind::Job => words::job(rng),
        TextKind::Website => words::url(rng),
        TextKind::FirstName => words::first_name(rng),
        TextKind::LastName => words::last_name(rng),
        TextKind::MiddleName => words::middle_name(rng),
        TextKind::Role => words::pick(rng, words::ROLES).to_string(),
        TextKind::Benefit => words::pick(rng, words::BENEFITS).to_string(),
        TextKind::Status => words::pick(rng, words::STATUSES).to_string(),
        TextKind::Word => words::word(rng),
    }
}
