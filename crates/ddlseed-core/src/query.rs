//! Read-only SQL built from structured query intents.
//!
//! An intent is the structured form of a question about the data ("show 5
//! employees", "average per department"). Producing intents from text is the
//! job of an external classifier; this module only turns them into SQL.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// What an intent asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryAction {
    /// Rows of a table.
    Select,
    /// Number of rows in a table.
    Count,
    /// An aggregate over a table, optionally grouped.
    Aggregate,
    /// The classifier could not tell.
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for QueryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Select => "select",
            Self::Count => "count",
            Self::Aggregate => "aggregate",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Aggregate function of an aggregate intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateMetric {
    /// `AVG`
    Avg,
    /// `MAX`
    Max,
    /// `MIN`
    Min,
    /// `SUM`
    Sum,
}

impl AggregateMetric {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
        }
    }
}

/// A structured query request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryIntent {
    /// Requested action.
    pub action: QueryAction,
    /// Target table.
    #[serde(default)]
    pub table: Option<String>,
    /// Row limit for selects. Zero means no limit.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Grouping column for aggregates.
    #[serde(default)]
    pub group_by: Option<String>,
    /// Aggregate function.
    #[serde(default)]
    pub metric: Option<AggregateMetric>,
}

impl QueryIntent {
    /// Creates an intent with the given action and no table.
    #[must_use]
    pub fn new(action: QueryAction) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    /// Sets the target table.
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the grouping column.
    #[must_use]
    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by = Some(column.into());
        self
    }

    /// Sets the aggregate function.
    #[must_use]
    pub const fn metric(mut self, metric: AggregateMetric) -> Self {
        self.metric = Some(metric);
        self
    }
}

/// Renders [`QueryIntent`]s as SQL.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the SQL for an intent.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingTable`] if the intent names no table,
    /// [`SchemaError::MissingMetric`] for an aggregate without a metric, and
    /// [`SchemaError::UnsupportedAction`] for an unknown action.
    pub fn build(&self, intent: &QueryIntent) -> Result<String> {
        match intent.action {
            QueryAction::Select => {
                let table = required_table(intent)?;
                match intent.limit {
                    Some(limit) if limit > 0 => Ok(format!("SELECT * FROM {table} LIMIT {limit};")),
                    _ => Ok(format!("SELECT * FROM {table};")),
                }
            }
            QueryAction::Count => {
                let table = required_table(intent)?;
                Ok(format!("SELECT COUNT(*) FROM {table};"))
            }
            QueryAction::Aggregate => {
                let table = required_table(intent)?;
                let metric = intent.metric.ok_or(SchemaError::MissingMetric)?.as_sql();
                match intent.group_by.as_deref().filter(|g| !g.is_empty()) {
                    Some(group) => Ok(format!(
                        "SELECT {group}, {metric}(*) FROM {table} GROUP BY {group};"
                    )),
                    None => Ok(format!("SELECT {metric}(*) FROM {table};")),
                }
            }
            QueryAction::Unknown => Err(SchemaError::UnsupportedAction(intent.action.to_string())),
        }
    }
}

fn required_table(intent: &QueryIntent) -> Result<&str> {
    intent
        .table
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SchemaError::MissingTable {
            action: intent.action.to_string().to_uppercase(),
        })
}
