//! Pick a value generator for a column from its type and name.
//!
//! Foreign keys are resolved by the generator itself; everything here only
//! looks at a single column.

use std::sync::LazyLock;

use ddlseed_core::lexer::{matching_paren, split_top_level};
use ddlseed_core::normalize::CanonicalColumn;
use regex::Regex;

static MIN_BOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">=\s*(-?\d+)").expect("valid lower bound regex"));

static MAX_BOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<=\s*(-?\d+)").expect("valid upper bound regex"));

/// Default lower bound for integer columns.
pub const DEFAULT_INT_MIN: i64 = 1;

/// Default upper bound for integer columns.
pub const DEFAULT_INT_MAX: i64 = 1000;

/// Flavour of short text, chosen from the column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Company name.
    Company,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Street address.
    Address,
    /// City name.
    City,
    /// Two-letter US state code.
    State,
    /// Five-digit postal code.
    Zip,
    /// Job title.
    Job,
    /// Website URL.
    Website,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Middle name.
    MiddleName,
    /// Role within a team.
    Role,
    /// Employee benefit.
    Benefit,
    /// Status label.
    Status,
    /// A single lorem word.
    Word,
}

/// How values for a column are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Per-column counter starting at 1.
    Counter,
    /// Short text.
    Text(TextKind),
    /// A sentence.
    Sentence,
    /// Integer within inclusive bounds.
    Integer { min: i64, max: i64 },
    /// Amount with two decimals.
    Decimal,
    /// `YYYY-MM-DD` within the last two years.
    Date,
    /// `YYYY-MM-DD HH:MM:SS` within the last two years.
    Timestamp,
    /// One of the listed options.
    Enum(Vec<String>),
    /// 0 or 1.
    Boolean,
    /// Always NULL.
    Null,
}

/// Leading identifier of a type, upper-cased: `DECIMAL(10,2)` -> `DECIMAL`.
#[must_use]
pub fn base_type(sql_type: &str) -> String {
    sql_type
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_uppercase()
}

/// Chooses the text flavour for a column name. First match wins.
#[must_use]
pub fn text_kind_for(column: &str) -> TextKind {
    let name = column.to_lowercase();
    let has = |needle: &str| name.contains(needle);

    if has("first_name") {
        TextKind::FirstName
    } else if has("last_name") {
        TextKind::LastName
    } else if has("middle_name") {
        TextKind::MiddleName
    } else if has("name") {
        TextKind::Company
    } else if has("email") {
        TextKind::Email
    } else if has("phone") {
        TextKind::Phone
    } else if has("address") {
        TextKind::Address
    } else if has("city") || has("location") {
        TextKind::City
    } else if has("state") {
        TextKind::State
    } else if has("zip") {
        TextKind::Zip
    } else if has("industry") || has("job") || has("title") {
        TextKind::Job
    } else if has("website") || has("url") {
        TextKind::Website
    } else if has("role") {
        TextKind::Role
    } else if has("benefit") {
        TextKind::Benefit
    } else if has("status") {
        TextKind::Status
    } else {
        TextKind::Word
    }
}

/// Integer bounds from a CHECK expression's `>= N` and `<= M` comparisons.
///
/// Returns `None` when neither comparison is present. A missing side falls
/// back to the defaults, widened so the range is never empty.
#[must_use]
pub fn check_bounds(check: &str) -> Option<(i64, i64)> {
    let parse = |re: &Regex| {
        re.captures(check)
            .and_then(|caps| caps[1].parse::<i64>().ok())
    };
    let (min, max) = (parse(&MIN_BOUND_RE), parse(&MAX_BOUND_RE));

    match (min, max) {
        (None, None) => None,
        (Some(lo), Some(hi)) => Some((lo.min(hi), lo.max(hi))),
        (Some(lo), None) => Some((lo, DEFAULT_INT_MAX.max(lo))),
        (None, Some(hi)) => Some((DEFAULT_INT_MIN.min(hi), hi)),
    }
}

/// Options of an `ENUM('a','b')` type, quotes stripped.
#[must_use]
pub fn enum_options(sql_type: &str) -> Vec<String> {
    let Some(open) = sql_type.find('(') else {
        return Vec::new();
    };
    let Some(close) = matching_paren(sql_type, open) else {
        return Vec::new();
    };

    split_top_level(&sql_type[open + 1..close])
        .into_iter()
        .map(|opt| opt.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|opt| !opt.is_empty())
        .collect()
}

/// Chooses how to generate a column's values.
#[must_use]
pub fn infer_kind(column_name: &str, column: &CanonicalColumn) -> ValueKind {
    if column.auto_increment || column.primary_key {
        return ValueKind::Counter;
    }

    match base_type(&column.sql_type).as_str() {
        "VARCHAR" | "VARCHAR2" | "NVARCHAR" | "CHAR" | "NCHAR" | "CHARACTER" => {
            ValueKind::Text(text_kind_for(column_name))
        }
        "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "CLOB" => ValueKind::Sentence,
        "INT" | "INTEGER" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "BIGINT" => {
            let (min, max) = column
                .check
                .as_deref()
                .and_then(check_bounds)
                .unwrap_or((DEFAULT_INT_MIN, DEFAULT_INT_MAX));
            ValueKind::Integer { min, max }
        }
        "DECIMAL" | "NUMERIC" | "FLOAT" | "DOUBLE" | "REAL" | "MONEY" => ValueKind::Decimal,
        "DATE" => ValueKind::Date,
        "DATETIME" | "TIMESTAMP" | "TIMESTAMPTZ" => ValueKind::Timestamp,
        "ENUM" => {
            let options = enum_options(&column.sql_type);
            if options.is_empty() {
                ValueKind::Null
            } else {
                ValueKind::Enum(options)
            }
        }
        "BOOL" | "BOOLEAN" | "BIT" => ValueKind::Boolean,
        _ => ValueKind::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(sql_type: &str) -> CanonicalColumn {
        CanonicalColumn {
            sql_type: sql_type.to_string(),
            not_null: false,
            default: None,
            primary_key: false,
            unique: false,
            auto_increment: false,
            check: None,
        }
    }

    #[test]
    fn test_base_type() {
        assert_eq!(base_type("DECIMAL(10,2)"), "DECIMAL");
        assert_eq!(base_type("varchar (5)"), "VARCHAR");
        assert_eq!(base_type("DOUBLE PRECISION"), "DOUBLE");
        assert_eq!(base_type(""), "");
    }

    #[test]
    fn test_counter_wins() {
        let mut c = col("VARCHAR(10)");
        c.primary_key = true;
        assert_eq!(infer_kind("code", &c), ValueKind::Counter);

        let mut c = col("INT");
        c.auto_increment = true;
        assert_eq!(infer_kind("id", &c), ValueKind::Counter);
    }

    #[test]
    fn test_text_kinds() {
        assert_eq!(text_kind_for("first_name"), TextKind::FirstName);
        assert_eq!(text_kind_for("company_name"), TextKind::Company);
        assert_eq!(text_kind_for("Email"), TextKind::Email);
        assert_eq!(text_kind_for("phone_number"), TextKind::Phone);
        assert_eq!(text_kind_for("zip_code"), TextKind::Zip);
        assert_eq!(text_kind_for("job_title"), TextKind::Job);
        assert_eq!(text_kind_for("status"), TextKind::Status);
        assert_eq!(text_kind_for("color"), TextKind::Word);
    }

    #[test]
    fn test_type_families() {
        assert_eq!(infer_kind("bio", &col("TEXT")), ValueKind::Sentence);
        assert_eq!(infer_kind("price", &col("DECIMAL(10,2)")), ValueKind::Decimal);
        assert_eq!(infer_kind("born", &col("DATE")), ValueKind::Date);
        assert_eq!(infer_kind("at", &col("TIMESTAMP")), ValueKind::Timestamp);
        assert_eq!(infer_kind("flag", &col("BOOLEAN")), ValueKind::Boolean);
        assert_eq!(infer_kind("blob", &col("BLOB")), ValueKind::Null);
        assert_eq!(infer_kind("odd", &col("")), ValueKind::Null);
        assert_eq!(
            infer_kind("n", &col("BIGINT")),
            ValueKind::Integer { min: 1, max: 1000 }
        );
    }

    #[test]
    fn test_check_bounds() {
        assert_eq!(check_bounds("rating >= 1 AND rating <= 5"), Some((1, 5)));
        assert_eq!(check_bounds("age >= 18"), Some((18, 1000)));
        assert_eq!(check_bounds("qty <= 10"), Some((1, 10)));
        assert_eq!(check_bounds("year >= 2000"), Some((2000, 2000)));
        assert_eq!(check_bounds("x <= -5"), Some((-5, -5)));
        assert_eq!(check_bounds("x <> 3"), None);

        let mut c = col("INT");
        c.check = Some("rating >= 1 AND rating <= 5".into());
        assert_eq!(infer_kind("rating", &c), ValueKind::Integer { min: 1, max: 5 });
    }

    #[test]
    fn test_enum_options() {
        assert_eq!(
            enum_options("ENUM('ACTIVE','ON LEAVE', 'X,Y')"),
            vec!["ACTIVE", "ON LEAVE", "X,Y"]
        );
        assert!(enum_options("ENUM").is_empty());
        assert_eq!(
            infer_kind("s", &col("ENUM('A','B')")),
            ValueKind::Enum(vec!["A".into(), "B".into()])
        );
    }
}
