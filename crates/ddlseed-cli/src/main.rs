//! ddlseed CLI
//!
//! Command-line tool for inspecting DDL scripts and generating seed data.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ddlseed_core::prelude::{
    parse_ddl_file, save_schema_json, schema_from_tables, summarize, tables_dependency_order,
    OrderPolicy, QueryBuilder, QueryIntent,
};
use ddlseed_generate::prelude::{GenerateOptions, InstructionEngine, DEFAULT_ROWS_PER_TABLE};

/// Parse SQL CREATE TABLE scripts and generate fake rows for them.
#[derive(Parser)]
#[command(name = "ddlseed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a human-readable summary of every table.
    Summary {
        /// DDL script.
        ddl: PathBuf,
    },

    /// Print the canonical schema as JSON.
    Schema {
        /// DDL script.
        ddl: PathBuf,

        /// Write the schema to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print table names in foreign-key dependency order.
    Order {
        /// DDL script.
        ddl: PathBuf,

        /// Fail on circular foreign keys instead of appending the tables.
        #[arg(long)]
        strict: bool,
    },

    /// Generate fake rows and print them as JSON.
    Generate {
        /// DDL script.
        ddl: PathBuf,

        /// Rows per table.
        #[arg(short, long, env = "DDLSEED_ROWS", default_value_t = DEFAULT_ROWS_PER_TABLE)]
        rows: usize,

        /// Random seed for reproducible output.
        #[arg(short, long, env = "DDLSEED_SEED")]
        seed: Option<u64>,

        /// Instruction applied before generating, e.g.
        /// "set Companies.industry from list Tech,Finance". Repeatable.
        #[arg(short, long)]
        instruction: Vec<String>,
    },

    /// Print the SQL for a JSON query intent.
    Query {
        /// DDL script.
        ddl: PathBuf,

        /// Intent, e.g. '{"action":"select","table":"Employees","limit":5}'.
        intent: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Summary { ddl } => {
            let tables = parse_ddl_file(&ddl)?;
            print!("{}", summarize(&tables));
        }

        Commands::Schema { ddl, output } => {
            let tables = parse_ddl_file(&ddl)?;
            if let Some(path) = output {
                save_schema_json(&tables, &path)?;
            } else {
                println!("{}", schema_from_tables(&tables).to_json_pretty()?);
            }
        }

        Commands::Order { ddl, strict } => {
            let tables = parse_ddl_file(&ddl)?;
            let order = if strict {
                schema_from_tables(&tables).dependency_order(OrderPolicy::Strict)?
            } else {
                tables_dependency_order(&tables)
            };
            for name in order {
                println!("{name}");
            }
        }

        Commands::Generate {
            ddl,
            rows,
            seed,
            instruction,
        } => {
            let schema = schema_from_tables(&parse_ddl_file(&ddl)?);
            let mut options = GenerateOptions::new().rows_per_table(rows);
            if let Some(seed) = seed {
                options = options.seed(seed);
            }

            let mut engine = InstructionEngine::with_options(schema, options);
            info!(seed = engine.generator().seed(), "Generating data");

            for text in &instruction {
                let outcome = engine.apply_instruction(text)?;
                if !outcome.ok {
                    bail!("{text}: {}", outcome.message);
                }
                info!("{}", outcome.message);
            }

            // An explicit "generate N rows" instruction already produced data.
            if engine.history().is_empty() {
                engine.generate()?;
            }
            println!("{}", serde_json::to_string_pretty(engine.data())?);
        }

        Commands::Query { ddl, intent } => {
            let schema = schema_from_tables(&parse_ddl_file(&ddl)?);
            let intent: QueryIntent =
                serde_json::from_str(&intent).context("invalid query intent JSON")?;
            if let Some(table) = &intent.table {
                if schema.table(table).is_none() {
                    bail!("unknown table: {table}");
                }
            }
            println!("{}", QueryBuilder::new().build(&intent)?);
        }
    }

    Ok(())
}
