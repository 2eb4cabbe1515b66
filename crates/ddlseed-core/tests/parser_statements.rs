//! Tests for CREATE TABLE discovery and top-level item handling.

mod common;
use common::*;

use ddlseed_core::parser::{parse_ddl, parse_ddl_file};
use ddlseed_core::schema::ForeignKey;

#[test]
fn test_single_statement_yields_one_table() {
    let table = parse_single("CREATE TABLE users (id INT);");
    assert_eq!(table.name, "users");
    assert_eq!(table.columns.len(), 1);
}

#[test]
fn test_table_name_quotes_stripped() {
    assert_eq!(parse_single("CREATE TABLE \"Users\" (id INT);").name, "Users");
    assert_eq!(parse_single("create table `orders` (id INT);").name, "orders");
}

#[test]
fn test_keywords_case_insensitive() {
    let table = parse_single("create Table items (ID int not null);");
    assert_eq!(table.name, "items");
    assert!(column(&table, "ID").not_null);
}

#[test]
fn test_if_not_exists_accepted() {
    assert_eq!(
        parse_single("CREATE TABLE IF NOT EXISTS logs (id INT);").name,
        "logs"
    );
}

#[test]
fn test_semicolon_optional() {
    let tables = parse_ddl("CREATE TABLE a (id INT)\nCREATE TABLE b (id INT)");
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_last_column_parenthesized_type_then_terminator() {
    let table = parse_single("CREATE TABLE prices (id INT, amount DECIMAL(10,2));");
    assert_eq!(table.raw_body, "id INT, amount DECIMAL(10,2)");
    assert_eq!(column(&table, "amount").raw_type, "DECIMAL(10,2)");

    let table = parse_single("CREATE TABLE t (code VARCHAR(255));");
    assert_eq!(column(&table, "code").raw_type, "VARCHAR(255)");
}

#[test]
fn test_multiline_body() {
    let table = parse_single(
        "CREATE TABLE t (\r\n  id INT,\r\n  name VARCHAR(20)\r\n);",
    );
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.raw_body, "id INT,\n  name VARCHAR(20)");
}

#[test]
fn test_other_statements_ignored() {
    let tables = parse_ddl(
        "DROP TABLE IF EXISTS t;\nINSERT INTO t VALUES (1, 'a');\nCREATE TABLE t (id INT);\nCREATE INDEX i ON t (id);",
    );
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "t");
}

#[test]
fn test_no_statements_is_empty() {
    assert!(parse_ddl("").is_empty());
    assert!(parse_ddl("SELECT 1;").is_empty());
}

#[test]
fn test_enum_with_commas_is_one_column() {
    let table = parse_single("CREATE TABLE t (kind ENUM('A,B','C') NOT NULL, id INT);");
    assert_eq!(table.columns.len(), 2);
    let kind = column(&table, "kind");
    assert_eq!(kind.raw_type, "ENUM('A,B','C')");
    assert!(kind.not_null);
}

#[test]
fn test_default_with_comma_not_fragmented() {
    let table = parse_single("CREATE TABLE t (tag VARCHAR(10) DEFAULT 'x,y', id INT);");
    assert_eq!(table.columns.len(), 2);
    assert_eq!(column(&table, "tag").default.as_deref(), Some("'x,y'"));
}

#[test]
fn test_double_quoted_literal_with_apostrophe() {
    let table = parse_single("CREATE TABLE t (note VARCHAR(20) DEFAULT \"it's, fine\", id INT);");
    assert_eq!(table.columns.len(), 2);
    assert_eq!(
        column(&table, "note").default.as_deref(),
        Some("\"it's, fine\"")
    );
}

#[test]
fn test_table_level_constraints_discarded() {
    let table = parse_single(
        "CREATE TABLE t (
            id INT,
            email VARCHAR(100),
            CONSTRAINT chk_id CHECK (id > 0),
            UNIQUE (email),
            KEY idx_email (email),
            INDEX (id),
            CHECK (id < 100)
        );",
    );
    let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "email"]);
    assert!(table.foreign_keys.is_empty());
    assert!(table.primary_keys.is_empty());
}

#[test]
fn test_table_level_primary_key_merges_without_duplicates() {
    let table = parse_single(
        "CREATE TABLE t (a INT PRIMARY KEY, b INT, PRIMARY KEY (a, b), PRIMARY KEY (\"b\"));",
    );
    assert_eq!(table.primary_keys, vec!["a", "b"]);
    assert!(column(&table, "a").is_primary);
    assert!(!column(&table, "b").is_primary);
}

#[test]
fn test_table_level_foreign_key() {
    let table = parse_single(
        "CREATE TABLE t (a INT, b INT, FOREIGN KEY (a, b) REFERENCES \"Other\" (x, y));",
    );
    assert_eq!(table.columns.len(), 2);
    assert_eq!(
        table.foreign_keys,
        vec![ForeignKey::new(
            vec!["a".into(), "b".into()],
            "Other",
            vec!["x".into(), "y".into()]
        )
        .raw("FOREIGN KEY (a, b) REFERENCES \"Other\" (x, y)")]
    );
}

#[test]
fn test_foreign_key_arity_mismatch_preserved() {
    let table = parse_single("CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES o (x, y));");
    assert_eq!(table.foreign_keys[0].cols, vec!["a"]);
    assert_eq!(table.foreign_keys[0].ref_cols, vec!["x", "y"]);
}

#[test]
fn test_unparseable_items_become_placeholders() {
    let table = parse_single("CREATE TABLE t (id INT, ???, 'quoted');");
    assert_eq!(table.columns.len(), 3);

    let placeholder = &table.columns[1];
    assert_eq!(placeholder.name, "_raw_2");
    assert_eq!(placeholder.raw_type, "");
    assert_eq!(placeholder.raw, "???");
    assert!(placeholder.is_placeholder());
    assert_eq!(table.columns[2].raw, "'quoted'");
}

#[test]
fn test_comment_lines_stripped_and_columns_kept() {
    let table = parse_single(
        "CREATE TABLE t (
            -- identifiers
            id INT,
            -- a, b, c
            name TEXT,
        );",
    );
    let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name"]);
}

#[test]
fn test_comment_containing_parenthesis_does_not_unbalance_body() {
    let table = parse_single(
        "CREATE TABLE t (
            id INT, -- see (legacy
            name TEXT
        );",
    );
    assert_eq!(table.columns.len(), 2);
}

#[test]
fn test_employees_end_to_end() {
    let table = parse_single(
        "CREATE TABLE Employees (id INT AUTO_INCREMENT PRIMARY KEY, name VARCHAR(100) NOT NULL, dept_id INT, FOREIGN KEY (dept_id) REFERENCES Departments(id));",
    );
    assert_eq!(table.name, "Employees");
    assert_eq!(table.columns.len(), 3);

    let id = column(&table, "id");
    assert!(id.auto_increment);
    assert!(id.is_primary);

    let name = column(&table, "name");
    assert!(name.not_null);
    assert_eq!(name.raw_type, "VARCHAR(100)");

    let dept = column(&table, "dept_id");
    assert!(!dept.not_null && !dept.is_primary && !dept.auto_increment);

    assert_eq!(table.primary_keys, vec!["id"]);
    assert_eq!(table.foreign_keys.len(), 1);
    let fk = &table.foreign_keys[0];
    assert_eq!(fk.cols, vec!["dept_id"]);
    assert_eq!(fk.ref_table, "Departments");
    assert_eq!(fk.ref_cols, vec!["id"]);
}

#[test]
fn test_company_document() {
    let tables = parse_ddl(COMPANY_DDL);
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Companies", "Departments", "Employees"]);

    let departments = &tables[1];
    assert_eq!(departments.primary_keys, vec!["dept_id"]);
    assert_eq!(departments.columns.len(), 4);
    assert_eq!(departments.foreign_keys[0].ref_table, "Companies");

    let employees = &tables[2];
    assert_eq!(employees.columns.len(), 8);
    assert_eq!(
        column(employees, "status").raw_type,
        "ENUM('ACTIVE','INACTIVE','ON LEAVE')"
    );
    let fk = &employees.foreign_keys[0];
    assert_eq!(fk.ref_table, "Departments");
    assert_eq!(fk.ref_cols, vec!["dept_id"]);
    assert!(fk.raw.starts_with("comment:"));
}

#[test]
fn test_parse_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company.ddl");
    std::fs::write(&path, COMPANY_DDL).unwrap();

    let tables = parse_ddl_file(&path).unwrap();
    assert_eq!(tables.len(), 3);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_ddl_file(dir.path().join("absent.ddl")).unwrap_err();
    assert!(matches!(err, ddlseed_core::SchemaError::Io(_)));
}
