#![allow(dead_code)]

use ddlseed_core::parser::parse_ddl;
use ddlseed_core::schema::{Column, Table};

/// A company schema exercising most of what the parser understands.
pub const COMPANY_DDL: &str = r"
-- Company / employee schema
CREATE TABLE Companies (
    company_id INT AUTO_INCREMENT PRIMARY KEY,
    company_name VARCHAR(150) NOT NULL UNIQUE,
    industry VARCHAR(100),
    website VARCHAR(255) DEFAULT 'https://example.com'
);

CREATE TABLE Departments (
    dept_id INT AUTO_INCREMENT,
    company_id INT NOT NULL, -- owning company
    dept_name VARCHAR(100) NOT NULL,
    budget DECIMAL(12,2) DEFAULT 0.00,
    PRIMARY KEY (dept_id),
    CONSTRAINT fk_dept_company FOREIGN KEY (company_id) REFERENCES Companies(company_id)
);

CREATE TABLE Employees (
    employee_id INT AUTO_INCREMENT PRIMARY KEY,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    email VARCHAR(120) UNIQUE,
    status ENUM('ACTIVE','INACTIVE','ON LEAVE') DEFAULT 'ACTIVE',
    rating INT CHECK (rating >= 1 AND rating <= 5),
    hire_date DATE,
    dept_id INT -- foreign key to Departments table
);

INSERT INTO Companies (company_name) VALUES ('Acme');
";

/// Parses DDL that must contain exactly one table.
pub fn parse_single(ddl: &str) -> Table {
    let mut tables = parse_ddl(ddl);
    assert_eq!(tables.len(), 1, "Expected one table in: {ddl}");
    tables.remove(0)
}

/// Looks up a column, panicking with the table's column names if missing.
pub fn column<'a>(table: &'a Table, name: &str) -> &'a Column {
    table.get_column(name).unwrap_or_else(|| {
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        panic!("No column {name} in {}: {names:?}", table.name)
    })
}
