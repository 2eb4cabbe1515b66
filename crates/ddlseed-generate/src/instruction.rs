//! Free-text instructions understood by the instruction engine.
//!
//! Recognized forms (keywords are case-insensitive, names keep their case):
//!
//! - `generate 100 rows` (also `genera 100 filas`)
//! - `set Table.column from list a,b,c`
//! - `set Table.column to value` (a comma-separated value becomes a list,
//!   a provider name such as `faker:city` becomes a faker override)
//! - `set Table.column faker city`
//! - `clear overrides` (also `borrar` / `limpiar`)

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::overrides::{Override, Provider};
use crate::value::Value;

static GENERATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:generate|genera)\s+(\d+)(?:\s+(?:rows|filas))?")
        .expect("valid generate regex")
});

static SET_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bset\s+([A-Za-z0-9_]+)\.([A-Za-z0-9_]+)\s+from\s+list\s+(.+)$")
        .expect("valid set-list regex")
});

static SET_FAKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bset\s+([A-Za-z0-9_]+)\.([A-Za-z0-9_]+)\s+faker\s+(\S+)\s*$")
        .expect("valid set-faker regex")
});

static SET_TO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bset\s+([A-Za-z0-9_]+)\.([A-Za-z0-9_]+)\s+to\s+(.+)$")
        .expect("valid set-to regex")
});

static PROVIDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:faker[:.])?\w+\s*(?:\(\))?$").expect("valid provider regex")
});

static CLEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:clear|borrar|limpiar)\b.*\boverrides?\b")
        .expect("valid clear regex")
});

/// A parsed instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Regenerate every table with this many rows each.
    Generate(usize),
    /// Install an override on a column.
    SetOverride {
        /// Table name, as written.
        table: String,
        /// Column name, as written.
        column: String,
        /// Override to install.
        rule: Override,
    },
    /// Drop every override.
    ClearOverrides,
}

impl Instruction {
    /// Parses an instruction.
    ///
    /// Returns `Ok(None)` when the text matches no known form.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnknownProvider`](crate::GenerateError::UnknownProvider)
    /// for `set T.c faker name` with an unknown provider name.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        let text = text.trim();

        if let Some(caps) = SET_LIST_RE.captures(text) {
            return Ok(Some(Self::set(&caps[1], &caps[2], Override::List(list_values(&caps[3])))));
        }

        if let Some(caps) = SET_FAKER_RE.captures(text) {
            let provider: Provider = caps[3].parse()?;
            return Ok(Some(Self::set(&caps[1], &caps[2], Override::Faker(provider))));
        }

        if let Some(caps) = SET_TO_RE.captures(text) {
            return Ok(Some(Self::set(&caps[1], &caps[2], value_rule(&caps[3]))));
        }

        if CLEAR_RE.is_match(text) {
            return Ok(Some(Self::ClearOverrides));
        }

        if let Some(caps) = GENERATE_RE.captures(text) {
            if let Ok(rows) = caps[1].parse::<usize>() {
                return Ok(Some(Self::Generate(rows)));
            }
        }

        Ok(None)
    }

    fn set(table: &str, column: &str, rule: Override) -> Self {
        Self::SetOverride {
            table: table.to_string(),
            column: column.to_string(),
            rule,
        }
    }
}

fn list_values(raw: &str) -> Vec<Value> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(Value::parse_literal)
        .collect()
}

/// Reads the right-hand side of `set ... to ...`.
fn value_rule(raw: &str) -> Override {
    let raw = raw.trim();
    if raw.contains(',') {
        return Override::List(list_values(raw));
    }
    if PROVIDER_RE.is_match(raw) {
        if let Ok(provider) = raw.parse::<Provider>() {
            return Override::Faker(provider);
        }
    }
    Override::Fixed(Value::parse_literal(raw))
}
