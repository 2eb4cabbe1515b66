//! Parsed schema records.
//!
//! These are the value types produced by the DDL parser. They keep the
//! source vocabulary verbatim (`raw_type`, `default`, `check`) and are
//! consumed by the normalizer and the dependency orderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A column parsed from a `CREATE TABLE` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, stripped of surrounding quotes.
    pub name: String,
    /// Type expression as written, e.g. `DECIMAL(10,2)`. Empty for
    /// placeholder columns.
    pub raw_type: String,
    /// Whether a NOT NULL marker was found.
    pub not_null: bool,
    /// Default expression, verbatim (quotes included).
    pub default: Option<String>,
    /// Whether the column was declared PRIMARY inline.
    pub is_primary: bool,
    /// Whether a UNIQUE marker was found.
    pub is_unique: bool,
    /// Whether an `AUTO_INCREMENT` marker was found.
    pub auto_increment: bool,
    /// Expression inside the column's CHECK clause.
    pub check: Option<String>,
    /// The unparsed definition text.
    pub raw: String,
}

impl Column {
    /// Creates a column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            not_null: false,
            default: None,
            is_primary: false,
            is_unique: false,
            auto_increment: false,
            check: None,
            raw: String::new(),
        }
    }

    /// Creates a placeholder for an item that could not be parsed.
    #[must_use]
    pub fn placeholder(position: usize, raw: impl Into<String>) -> Self {
        Self::new(format!("_raw_{position}"), "").raw(raw)
    }

    /// Returns true if this column stands in for an unparseable item.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.raw_type.is_empty()
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Sets the default expression.
    #[must_use]
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Marks the column as an inline primary key.
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Marks the column as unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the CHECK expression.
    #[must_use]
    pub fn check(mut self, expr: impl Into<String>) -> Self {
        self.check = Some(expr.into());
        self
    }

    /// Sets the original definition text.
    #[must_use]
    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }
}

/// A foreign key, either declared at table level or inferred.
///
/// `cols` and `ref_cols` pair up positionally. Their lengths are kept as
/// written; the parser does not check arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Referencing column(s) in declaration order.
    pub cols: Vec<String>,
    /// Referenced table.
    pub ref_table: String,
    /// Referenced column(s) in declaration order.
    pub ref_cols: Vec<String>,
    /// Source text the key was built from.
    pub raw: String,
}

impl ForeignKey {
    /// Creates a foreign key.
    #[must_use]
    pub fn new(cols: Vec<String>, ref_table: impl Into<String>, ref_cols: Vec<String>) -> Self {
        Self {
            cols,
            ref_table: ref_table.into(),
            ref_cols,
            raw: String::new(),
        }
    }

    /// Sets the source text.
    #[must_use]
    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }
}

/// A table parsed from one `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, stripped of surrounding quotes.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
    /// Primary key column names, without duplicates.
    pub primary_keys: Vec<String>,
    /// Foreign keys in declaration order.
    pub foreign_keys: Vec<ForeignKey>,
    /// Text between the statement's outer parentheses.
    pub raw_body: String,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_keys: Vec::new(),
            foreign_keys: Vec::new(),
            raw_body: String::new(),
        }
    }

    /// Adds a column. Inline primary columns join the primary key set.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.push_column(column);
        self
    }

    /// Merges columns into the primary key set.
    #[must_use]
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merge_primary_keys(columns);
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Sets the raw body text.
    #[must_use]
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = body.into();
        self
    }

    /// Appends a column, registering it as a primary key if declared so.
    pub fn push_column(&mut self, column: Column) {
        if column.is_primary {
            self.merge_primary_keys([column.name.clone()]);
        }
        self.columns.push(column);
    }

    /// Adds names to the primary key set, skipping ones already present.
    pub fn merge_primary_keys<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in columns {
            let name = name.into();
            if !self.primary_keys.contains(&name) {
                self.primary_keys.push(name);
            }
        }
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns true if `name` is in the primary key set.
    #[must_use]
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_keys.iter().any(|pk| pk == name)
    }

    /// Names of the tables this table references, in declaration order.
    pub fn referenced_tables(&self) -> impl Iterator<Item = &str> {
        self.foreign_keys.iter().map(|fk| fk.ref_table.as_str())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TABLE: {}", self.name)?;
        writeln!(f, "  Columns:")?;
        for c in &self.columns {
            write!(f, "    - {} : {}", c.name, c.raw_type)?;
            if c.auto_increment {
                f.write_str(" AUTO_INCREMENT")?;
            }
            if c.is_primary {
                f.write_str(" PK")?;
            }
            if c.not_null {
                f.write_str(" NOT NULL")?;
            }
            if c.is_unique {
                f.write_str(" UNIQUE")?;
            }
            if let Some(default) = &c.default {
                write!(f, " DEFAULT {default}")?;
            }
            if let Some(check) = &c.check {
                write!(f, " CHECK ({check})")?;
            }
            writeln!(f)?;
        }
        if !self.primary_keys.is_empty() {
            writeln!(f, "  Primary keys: {:?}", self.primary_keys)?;
        }
        for fk in &self.foreign_keys {
            writeln!(f, "  FK: {:?} -> {}({:?})", fk.cols, fk.ref_table, fk.ref_cols)?;
        }
        Ok(())
    }
}

/// Renders the summary of every table, separated by blank lines.
#[must_use]
pub fn summarize(tables: &[Table]) -> String {
    tables
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
