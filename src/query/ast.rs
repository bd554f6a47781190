// Abstract syntax tree
// One parsed statement is one `Statement` value.

use super::condition::Condition;
use crate::storage::{Column, Value};
use serde::Serialize;
use std::fmt;

/// The statements we support
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// CREATE TABLE tablename (col1 TYPE, col2 TYPE, ...)
    CreateTable { name: String, columns: Vec<Column> },
    /// INSERT INTO tablename [(col1, col2, ...)] VALUES (val1, val2, ...)
    Insert {
        table_name: String,
        columns: Option<Vec<String>>,
        values: Vec<Value>,
    },
    /// SELECT * | col1, col2, ... FROM tablename [WHERE ...]
    Select {
        projection: Projection,
        table_name: String,
        condition: Option<Condition>,
    },
    /// UPDATE tablename SET col1 = val1, ... [WHERE ...]
    /// Assignment columns are unique.
    Update {
        table_name: String,
        assignments: Vec<(String, Value)>,
        condition: Option<Condition>,
    },
    /// DELETE FROM tablename [WHERE ...]
    Delete {
        table_name: String,
        condition: Option<Condition>,
    },
    /// DROP TABLE tablename
    DropTable { table_name: String },
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::CreateTable { .. } => StatementKind::Create,
            Statement::Insert { .. } => StatementKind::Insert,
            Statement::Select { .. } => StatementKind::Select,
            Statement::Update { .. } => StatementKind::Update,
            Statement::Delete { .. } => StatementKind::Delete,
            Statement::DropTable { .. } => StatementKind::Drop,
        }
    }
}

/// The column list of a SELECT
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// SELECT *
    All,
    Columns(Vec<String>),
}

/// Tag reported with every result; `Error` marks a failed statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    Create,
    Insert,
    Select,
    Update,
    Delete,
    Drop,
    Error,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Create => "CREATE",
            StatementKind::Insert => "INSERT",
            StatementKind::Select => "SELECT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Drop => "DROP",
            StatementKind::Error => "ERROR",
        };
        f.write_str(name)
    }
}
