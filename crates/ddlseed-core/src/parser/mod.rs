//! `CREATE TABLE` parser.
//!
//! The parser is deliberately forgiving: it locates every `CREATE TABLE`
//! statement in a document, splits each body into top-level items and
//! classifies them. Anything it cannot understand is kept as a placeholder
//! column instead of being dropped, and other statements are ignored.
//!
//! # Example
//!
//! ```rust
//! use ddlseed_core::parser::parse_ddl;
//!
//! let tables = parse_ddl(
//!     "CREATE TABLE users (id INT PRIMARY KEY, email VARCHAR(255) NOT NULL);",
//! );
//!
//! assert_eq!(tables.len(), 1);
//! assert_eq!(tables[0].name, "users");
//! assert_eq!(tables[0].primary_keys, vec!["id"]);
//! ```

mod annotate;
mod column;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

pub use annotate::infer_comment_foreign_key;
pub use column::{
    detect_auto_increment, detect_check, detect_default, detect_not_null, detect_primary,
    detect_references, detect_unique, extract_type, parse_column_definition, split_name_list,
    strip_quotes, ColumnDefinition, Constraints,
};

use crate::error::Result;
use crate::lexer::{matching_paren, split_top_level, strip_comments, strip_leading_comments};
use crate::schema::{Column, ForeignKey, Table};

static CREATE_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bCREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?([^\s(]+)\s*\(")
        .expect("valid CREATE TABLE regex")
});

static FOREIGN_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)FOREIGN\s+KEY\s*\(([^)]+)\)\s*REFERENCES\s+([^\s(]+)\s*\(([^)]+)\)")
        .expect("valid FOREIGN KEY regex")
});

static BODY_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\s*;").expect("valid body end regex"));

static PRIMARY_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)PRIMARY\s+KEY\s*\(([^)]+)\)").expect("valid PRIMARY KEY regex")
});

/// Leading keywords of table-level items that carry no column semantics.
const TABLE_CONSTRAINT_KEYWORDS: &[&str] = &["CONSTRAINT", "CHECK", "UNIQUE", "KEY", "INDEX"];

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Infer foreign keys from `-- ... to <table> table` column comments.
    pub infer_comment_foreign_keys: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            infer_comment_foreign_keys: true,
        }
    }
}

impl ParseOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the comment foreign-key heuristic.
    #[must_use]
    pub const fn infer_comment_foreign_keys(mut self, enabled: bool) -> Self {
        self.infer_comment_foreign_keys = enabled;
        self
    }
}

/// What a single top-level body item turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    ForeignKey(ForeignKey),
    PrimaryKey(Vec<String>),
    TableConstraint,
    Column(ColumnDefinition),
    Unparsed,
}

/// `CREATE TABLE` parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct DdlParser {
    options: ParseOptions,
}

impl DdlParser {
    /// Creates a parser with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given options.
    #[must_use]
    pub const fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Returns the parser's options.
    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses every `CREATE TABLE` statement in `ddl`, in document order.
    ///
    /// A body whose opening parenthesis is never balanced ends at the first
    /// `)` followed by `;` before the next statement, so its malformed items
    /// degrade to placeholders. Without such a terminator the statement is
    /// skipped.
    #[must_use]
    pub fn parse(&self, ddl: &str) -> Vec<Table> {
        let text = ddl.replace("\r\n", "\n");
        let mut tables = Vec::new();
        let mut pos = 0;

        while let Some(caps) = CREATE_TABLE_RE.captures_at(&text, pos) {
            let (Some(head), Some(name)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let name = strip_quotes(name.as_str());
            let open = head.end() - 1;

            let Some(close) =
                matching_paren(&text, open).or_else(|| unbalanced_body_end(&text, open, name))
            else {
                warn!(table = %name, "CREATE TABLE body is never closed, skipping");
                pos = head.end();
                continue;
            };

            tables.push(self.parse_table(name, &text[open + 1..close]));
            pos = close + 1;
        }

        debug!(tables = tables.len(), "parsed DDL");
        tables
    }

    /// Reads and parses a DDL file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Table>> {
        let ddl = std::fs::read_to_string(path.as_ref())?;
        Ok(self.parse(&ddl))
    }

    fn parse_table(&self, name: &str, body: &str) -> Table {
        let body = body.trim();
        let mut table = Table::new(name).raw_body(body);

        for piece in split_top_level(body) {
            let item = strip_leading_comments(piece)
                .trim()
                .trim_end_matches(',')
                .trim();
            if item.is_empty() {
                continue;
            }

            let (code, comment) = strip_comments(item);
            let code = code.trim().trim_end_matches(',').trim();
            if code.is_empty() {
                continue;
            }

            match classify(code) {
                Item::ForeignKey(fk) => table.foreign_keys.push(fk),
                Item::PrimaryKey(cols) => table.merge_primary_keys(cols),
                Item::TableConstraint => {
                    debug!(table = %name, item = %code, "ignoring table-level constraint");
                }
                Item::Column(def) => {
                    let column_name = def.column.name.clone();
                    let has_inline_fk = def.foreign_key.is_some();
                    table.push_column(def.column);
                    table.foreign_keys.extend(def.foreign_key);

                    if self.options.infer_comment_foreign_keys && !has_inline_fk {
                        if let Some(fk) =
                            comment.and_then(|c| infer_comment_foreign_key(&column_name, c))
                        {
                            debug!(
                                table = %name,
                                column = %column_name,
                                ref_table = %fk.ref_table,
                                "inferred foreign key from comment"
                            );
                            table.foreign_keys.push(fk);
                        }
                    }
                }
                Item::Unparsed => {
                    warn!(table = %name, item = %code, "unparseable column definition");
                    let position = table.columns.len() + 1;
                    table.push_column(Column::placeholder(position, code));
                }
            }
        }

        table
    }
}

/// Position of the `)` in the first `);` after `open`, looking no further
/// than the next `CREATE TABLE`.
fn unbalanced_body_end(text: &str, open: usize, name: &str) -> Option<usize> {
    let start = open + 1;
    let limit = CREATE_TABLE_RE
        .find_at(text, start)
        .map_or(text.len(), |m| m.start());
    let end = BODY_END_RE.find(&text[start..limit])?;
    warn!(table = %name, "CREATE TABLE body is unbalanced, ending it at the first `);`");
    Some(start + end.start())
}

fn classify(item: &str) -> Item {
    if let Some(caps) = FOREIGN_KEY_RE.captures(item) {
        let fk = ForeignKey::new(
            split_name_list(&caps[1]),
            strip_quotes(&caps[2]),
            split_name_list(&caps[3]),
        )
        .raw(item);
        return Item::ForeignKey(fk);
    }

    if let Some(caps) = PRIMARY_KEY_RE.captures(item) {
        return Item::PrimaryKey(split_name_list(&caps[1]));
    }

    let first_word = item
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default();
    if TABLE_CONSTRAINT_KEYWORDS
        .iter()
        .any(|kw| first_word.eq_ignore_ascii_case(kw))
    {
        return Item::TableConstraint;
    }

    parse_column_definition(item).map_or(Item::Unparsed, Item::Column)
}

/// Parses DDL text with default options.
#[must_use]
pub fn parse_ddl(ddl: &str) -> Vec<Table> {
    DdlParser::new().parse(ddl)
}

/// Reads and parses a DDL file with default options.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_ddl_file(path: impl AsRef<Path>) -> Result<Vec<Table>> {
    DdlParser::new().parse_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        assert!(matches!(
            classify("CONSTRAINT fk_a FOREIGN KEY (a_id) REFERENCES a(id)"),
            Item::ForeignKey(_)
        ));
        assert!(matches!(
            classify("CONSTRAINT pk PRIMARY KEY (a, b)"),
            Item::PrimaryKey(cols) if cols == vec!["a", "b"]
        ));
        assert_eq!(classify("UNIQUE (email)"), Item::TableConstraint);
        assert_eq!(classify("check (price > 0)"), Item::TableConstraint);
        assert_eq!(classify("KEY idx_name (name)"), Item::TableConstraint);
        assert_eq!(classify("INDEX (name)"), Item::TableConstraint);
        assert!(matches!(classify("key_name VARCHAR(10)"), Item::Column(_)));
        assert_eq!(classify("???"), Item::Unparsed);
    }

    #[test]
    fn test_statement_body_balances_last_type() {
        let tables = parse_ddl("CREATE TABLE t (id INT, price DECIMAL(10,2));");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].raw_body, "id INT, price DECIMAL(10,2)");
        assert_eq!(tables[0].columns[1].raw_type, "DECIMAL(10,2)");
    }

    #[test]
    fn test_unterminated_statement_is_skipped() {
        let tables = parse_ddl("CREATE TABLE broken (id INT;\nCREATE TABLE ok (id INT);");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "ok");
    }

    #[test]
    fn test_unbalanced_body_keeps_table() {
        let tables = parse_ddl("CREATE TABLE a (x VARCHAR(10, y INT);\nCREATE TABLE b (id INT);");
        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);

        assert_eq!(tables[0].raw_body, "x VARCHAR(10, y INT");
        assert_eq!(tables[0].columns.len(), 1);
        assert_eq!(tables[0].columns[0].name, "x");
        assert_eq!(tables[1].columns[0].name, "id");
    }

    #[test]
    fn test_inline_reference_wins_over_comment() {
        let tables = parse_ddl(
            "CREATE TABLE e (\n  dept_id INT REFERENCES Departments(id) -- foreign key to Departments table\n);",
        );
        assert_eq!(tables[0].foreign_keys.len(), 1);
        assert_eq!(tables[0].foreign_keys[0].ref_cols, vec!["id"]);
        assert!(!tables[0].foreign_keys[0].raw.starts_with("comment:"));
    }

    #[test]
    fn test_comment_heuristic_can_be_disabled() {
        let ddl = "CREATE TABLE e (dept_id INT -- foreign key to Departments table\n);";

        let on = parse_ddl(ddl);
        assert_eq!(on[0].foreign_keys.len(), 1);

        let off = DdlParser::with_options(ParseOptions::new().infer_comment_foreign_keys(false))
            .parse(ddl);
        assert!(off[0].foreign_keys.is_empty());
        assert_eq!(off[0].columns.len(), 1);
    }

    #[test]
    fn test_placeholder_position() {
        let tables = parse_ddl("CREATE TABLE t (id INT, 42, name TEXT, ???);");
        let names: Vec<_> = tables[0].columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "_raw_2", "name", "_raw_4"]);
        assert_eq!(tables[0].columns[1].raw, "42");
    }
}
