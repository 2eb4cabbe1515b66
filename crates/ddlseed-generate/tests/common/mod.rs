#![allow(dead_code)]

use chrono::NaiveDate;
use ddlseed_core::normalize::{schema_from_tables, CanonicalSchema};
use ddlseed_core::parser::parse_ddl;
use ddlseed_generate::generator::GenerateOptions;
use ddlseed_generate::value::{GeneratedData, Row, Value};

/// Three tables chained by a table-level foreign key and a comment hint.
pub const COMPANY_DDL: &str = r"
CREATE TABLE Employees (
    employee_id INT AUTO_INCREMENT PRIMARY KEY,
    first_name VARCHAR(50) NOT NULL,
    email VARCHAR(120) UNIQUE,
    status ENUM('ACTIVE','INACTIVE','ON LEAVE') DEFAULT 'ACTIVE',
    rating INT CHECK (rating >= 1 AND rating <= 5),
    hire_date DATE,
    dept_id INT -- foreign key to Departments table
);

CREATE TABLE Departments (
    dept_id INT AUTO_INCREMENT,
    company_id INT NOT NULL,
    dept_name VARCHAR(100) NOT NULL,
    budget DECIMAL(12,2),
    PRIMARY KEY (dept_id),
    CONSTRAINT fk_dept_company FOREIGN KEY (company_id) REFERENCES Companies(company_id)
);

CREATE TABLE Companies (
    company_id INT AUTO_INCREMENT PRIMARY KEY,
    company_name VARCHAR(150) NOT NULL,
    industry VARCHAR(100)
);
";

pub fn schema(ddl: &str) -> CanonicalSchema {
    schema_from_tables(&parse_ddl(ddl))
}

/// Seeded options with a fixed reference date.
pub fn options(rows: usize) -> GenerateOptions {
    GenerateOptions::new()
        .rows_per_table(rows)
        .seed(2024)
        .reference_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
}

pub fn rows<'a>(data: &'a GeneratedData, table: &str) -> &'a [Row] {
    data.get(table)
        .unwrap_or_else(|| panic!("No rows generated for {table}"))
}

/// Values of one column across all rows of a table.
pub fn column_values(data: &GeneratedData, table: &str, column: &str) -> Vec<Value> {
    rows(data, table)
        .iter()
        .map(|row| row.get(column).cloned().unwrap_or(Value::Null))
        .collect()
}
