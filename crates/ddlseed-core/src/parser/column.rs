//! Column definitions and their inline constraints.
//!
//! Constraint detection is a set of independent pattern searches over the
//! text that follows a column's type. Each detector is a pure function, so
//! constraints may appear in any order and all of them are found.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexer::matching_paren;
use crate::schema::{Column, ForeignKey};

static COLUMN_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^\s*("[^"]+"|`[^`]+`|\w+)\s+(.*)$"#).expect("valid column head regex")
});

static TYPE_WITH_ARGS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\s*\(").expect("valid type regex")
});

static CHECK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCHECK\s*\(").expect("valid CHECK regex"));

static NOT_NULL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bNOT\s+NULL\b").expect("valid NOT NULL regex"));

static UNIQUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bUNIQUE\b").expect("valid UNIQUE regex"));

static DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bDEFAULT\s+('[^']*'|"[^"]*"|[^\s,]+)"#).expect("valid DEFAULT regex")
});

// Matches both a bare PRIMARY and the full PRIMARY KEY phrase.
static PRIMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPRIMARY\b").expect("valid PRIMARY regex"));

static AUTO_INCREMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bAUTO_?INCREMENT\b").expect("valid AUTO_INCREMENT regex"));

static REFERENCES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bREFERENCES\s+([^\s(]+)\s*\(([^)]+)\)").expect("valid REFERENCES regex")
});

/// Strips surrounding whitespace and `"` / `` ` `` quote characters.
#[must_use]
pub fn strip_quotes(name: &str) -> &str {
    name.trim().trim_matches(|c| c == '"' || c == '`')
}

/// Splits a parenthesized name list (`a, "b", c`) into unquoted names.
#[must_use]
pub fn split_name_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|name| strip_quotes(name).to_string())
        .collect()
}

/// Splits the text after a column name into its type and constraint tail.
///
/// A type written as `IDENT(...)` runs through the parenthesis that balances
/// its opening one, so `ENUM('a)', 'b')` and `DECIMAL(10, 2)` stay whole.
/// Without arguments, or if the arguments never close, the type is the
/// first whitespace-delimited token.
#[must_use]
pub fn extract_type(rest: &str) -> (&str, &str) {
    let rest = rest.trim();

    if let Some(head) = TYPE_WITH_ARGS_RE.find(rest) {
        if let Some(close) = matching_paren(rest, head.end() - 1) {
            return (rest[..=close].trim(), rest[close + 1..].trim());
        }
    }

    match rest.split_once(char::is_whitespace) {
        Some((ty, tail)) => (ty, tail.trim()),
        None => (rest, ""),
    }
}

/// Expression inside the first CHECK clause, without its parentheses.
#[must_use]
pub fn detect_check(tail: &str) -> Option<String> {
    let keyword = CHECK_RE.find(tail)?;
    let open = keyword.end() - 1;
    let close = matching_paren(tail, open)?;
    Some(tail[open + 1..close].trim().to_string())
}

/// Whether the tail declares NOT NULL.
#[must_use]
pub fn detect_not_null(tail: &str) -> bool {
    NOT_NULL_RE.is_match(tail)
}

/// Whether the tail declares UNIQUE.
#[must_use]
pub fn detect_unique(tail: &str) -> bool {
    UNIQUE_RE.is_match(tail)
}

/// The DEFAULT expression: a quoted string (quotes kept) or a bare token.
#[must_use]
pub fn detect_default(tail: &str) -> Option<String> {
    DEFAULT_RE
        .captures(tail)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Whether the tail declares the column PRIMARY.
#[must_use]
pub fn detect_primary(tail: &str) -> bool {
    PRIMARY_RE.is_match(tail)
}

/// Whether the tail declares `AUTO_INCREMENT` (or `AUTOINCREMENT`).
#[must_use]
pub fn detect_auto_increment(tail: &str) -> bool {
    AUTO_INCREMENT_RE.is_match(tail)
}

/// A column-level `REFERENCES table (cols)` clause.
#[must_use]
pub fn detect_references(tail: &str) -> Option<(String, Vec<String>)> {
    let caps = REFERENCES_RE.captures(tail)?;
    Some((
        strip_quotes(&caps[1]).to_string(),
        split_name_list(&caps[2]),
    ))
}

/// Every inline constraint found in a column's tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    /// NOT NULL marker.
    pub not_null: bool,
    /// UNIQUE marker.
    pub unique: bool,
    /// PRIMARY / PRIMARY KEY marker.
    pub primary: bool,
    /// `AUTO_INCREMENT` marker.
    pub auto_increment: bool,
    /// DEFAULT expression.
    pub default: Option<String>,
    /// CHECK expression.
    pub check: Option<String>,
    /// Inline REFERENCES target.
    pub references: Option<(String, Vec<String>)>,
}

impl Constraints {
    /// Runs every detector over `tail`.
    #[must_use]
    pub fn detect(tail: &str) -> Self {
        Self {
            not_null: detect_not_null(tail),
            unique: detect_unique(tail),
            primary: detect_primary(tail),
            auto_increment: detect_auto_increment(tail),
            default: detect_default(tail),
            check: detect_check(tail),
            references: detect_references(tail),
        }
    }
}

/// A parsed column plus the foreign key its inline REFERENCES declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// The column.
    pub column: Column,
    /// Foreign key from an inline REFERENCES clause.
    pub foreign_key: Option<ForeignKey>,
}

/// Parses `name TYPE constraints...`.
///
/// Returns `None` when the item does not start with an identifier followed
/// by a type.
#[must_use]
pub fn parse_column_definition(item: &str) -> Option<ColumnDefinition> {
    let item = item.trim().trim_end_matches(',');
    let caps = COLUMN_HEAD_RE.captures(item)?;

    let name = strip_quotes(&caps[1]);
    let rest = caps[2].trim();
    if name.is_empty() || rest.is_empty() {
        return None;
    }

    let (raw_type, tail) = extract_type(rest);
    let constraints = Constraints::detect(tail);

    let foreign_key = constraints.references.map(|(ref_table, ref_cols)| {
        ForeignKey::new(vec![name.to_string()], ref_table, ref_cols).raw(item)
    });

    let column = Column {
        name: name.to_string(),
        raw_type: raw_type.to_string(),
        not_null: constraints.not_null,
        default: constraints.default,
        is_primary: constraints.primary,
        is_unique: constraints.unique,
        auto_increment: constraints.auto_increment,
        check: constraints.check,
        raw: item.to_string(),
    };

    Some(ColumnDefinition {
        column,
        foreign_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(item: &str) -> Column {
        parse_column_definition(item)
            .unwrap_or_else(|| panic!("Failed to parse column: {item}"))
            .column
    }

    #[test]
    fn test_extract_simple_type() {
        assert_eq!(extract_type("INT NOT NULL"), ("INT", "NOT NULL"));
        assert_eq!(extract_type("TEXT"), ("TEXT", ""));
    }

    #[test]
    fn test_extract_parenthesized_type() {
        assert_eq!(
            extract_type("DECIMAL(10,2) DEFAULT 0"),
            ("DECIMAL(10,2)", "DEFAULT 0")
        );
        assert_eq!(
            extract_type("ENUM('a)','b,c') NOT NULL"),
            ("ENUM('a)','b,c')", "NOT NULL")
        );
        assert_eq!(extract_type("VARCHAR (20)"), ("VARCHAR (20)", ""));
    }

    #[test]
    fn test_extract_unbalanced_type_falls_back() {
        assert_eq!(extract_type("ENUM('a' NOT NULL"), ("ENUM('a'", "NOT NULL"));
    }

    #[test]
    fn test_detectors_are_order_independent() {
        let a = Constraints::detect("NOT NULL UNIQUE DEFAULT 5");
        let b = Constraints::detect("DEFAULT 5 UNIQUE NOT NULL");
        assert_eq!(a, b);
        assert!(a.not_null);
        assert!(a.unique);
        assert_eq!(a.default.as_deref(), Some("5"));
    }

    #[test]
    fn test_detect_default_variants() {
        assert_eq!(detect_default("DEFAULT 'x,y'").as_deref(), Some("'x,y'"));
        assert_eq!(
            detect_default("default \"on hold\" NOT NULL").as_deref(),
            Some("\"on hold\"")
        );
        assert_eq!(
            detect_default("DEFAULT CURRENT_TIMESTAMP").as_deref(),
            Some("CURRENT_TIMESTAMP")
        );
        assert_eq!(detect_default("NOT NULL"), None);
    }

    #[test]
    fn test_detect_check() {
        assert_eq!(
            detect_check("NOT NULL CHECK (rating >= 1 AND rating <= 5)").as_deref(),
            Some("rating >= 1 AND rating <= 5")
        );
        assert_eq!(
            detect_check("check((a > 0) or (a < -10))").as_deref(),
            Some("(a > 0) or (a < -10)")
        );
        assert_eq!(detect_check("CHECK (a > 0"), None);
    }

    #[test]
    fn test_detect_primary_forms() {
        assert!(detect_primary("PRIMARY KEY"));
        assert!(detect_primary("primary"));
        assert!(!detect_primary("PRIMARYCOLOR"));
    }

    #[test]
    fn test_detect_auto_increment_forms() {
        assert!(detect_auto_increment("AUTO_INCREMENT"));
        assert!(detect_auto_increment("PRIMARY KEY AUTOINCREMENT"));
        assert!(!detect_auto_increment("NOT NULL"));
    }

    #[test]
    fn test_detect_references() {
        assert_eq!(
            detect_references("NOT NULL REFERENCES \"Departments\" (id)"),
            Some(("Departments".to_string(), vec!["id".to_string()]))
        );
        assert_eq!(detect_references("NOT NULL"), None);
    }

    #[test]
    fn test_parse_full_column() {
        let col = parse("id INT AUTO_INCREMENT PRIMARY KEY");
        assert_eq!(col.name, "id");
        assert_eq!(col.raw_type, "INT");
        assert!(col.is_primary);
        assert!(col.auto_increment);
        assert!(!col.not_null);
        assert_eq!(col.raw, "id INT AUTO_INCREMENT PRIMARY KEY");
    }

    #[test]
    fn test_parse_quoted_name() {
        assert_eq!(parse("\"order\" INT").name, "order");
        assert_eq!(parse("`first name` VARCHAR(20)").name, "first name");
    }

    #[test]
    fn test_parse_inline_references() {
        let def = parse_column_definition("dept_id INT REFERENCES Departments(id)").unwrap();
        let fk = def.foreign_key.unwrap();
        assert_eq!(fk.cols, vec!["dept_id"]);
        assert_eq!(fk.ref_table, "Departments");
        assert_eq!(fk.ref_cols, vec!["id"]);
    }

    #[test]
    fn test_parse_rejects_non_columns() {
        assert!(parse_column_definition("lonely").is_none());
        assert!(parse_column_definition("(a, b)").is_none());
        assert!(parse_column_definition("").is_none());
    }

    #[test]
    fn test_split_name_list() {
        assert_eq!(
            split_name_list(" a, \"b\" ,`c`"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
