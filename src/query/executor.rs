// Query Executor
// This module executes parsed statements against the database

use super::ast::{Statement, StatementKind};
use crate::error::Result;
use crate::storage::{Database, ResultSet};

/// The query executor owns the database and runs statements against it
pub struct QueryExecutor {
    database: Database,
}

impl QueryExecutor {
    /// Create a new query executor (empty database)
    pub fn new() -> Self {
        Self::with_database(Database::new())
    }

    /// Run statements against an existing database
    pub fn with_database(database: Database) -> Self {
        Self { database }
    }

    /// Execute a statement and return the result
    /// Any store error is passed through untouched.
    pub fn execute(&mut self, statement: Statement) -> Result<QueryResult> {
        let kind = statement.kind();

        match statement {
            Statement::CreateTable { name, columns } => {
                self.database.create_table(&name, columns)?;
                Ok(QueryResult::message(
                    kind,
                    format!("Table '{}' created successfully", name),
                ))
            }

            Statement::Insert {
                table_name,
                columns,
                values,
            } => {
                self.database
                    .insert_row(&table_name, columns.as_deref(), values)?;
                Ok(QueryResult::message(
                    kind,
                    format!("1 row inserted into '{}'", table_name),
                ))
            }

            Statement::Select {
                projection,
                table_name,
                condition,
            } => {
                let rows =
                    self.database
                        .select_rows(&table_name, &projection, condition.as_ref())?;
                Ok(QueryResult {
                    kind,
                    message: format!("{} row(s) returned", rows.len()),
                    rows: Some(rows),
                })
            }

            Statement::Update {
                table_name,
                assignments,
                condition,
            } => {
                let count =
                    self.database
                        .update_rows(&table_name, &assignments, condition.as_ref())?;
                Ok(QueryResult::message(
                    kind,
                    format!("{} row(s) updated in '{}'", count, table_name),
                ))
            }

            Statement::Delete {
                table_name,
                condition,
            } => {
                let count = self
                    .database
                    .delete_rows(&table_name, condition.as_ref())?;
                Ok(QueryResult::message(
                    kind,
                    format!("{} row(s) deleted from '{}'", count, table_name),
                ))
            }

            Statement::DropTable { table_name } => {
                self.database.drop_table(&table_name)?;
                Ok(QueryResult::message(
                    kind,
                    format!("Table '{}' dropped successfully", table_name),
                ))
            }
        }
    }

    /// Get a reference to the database (for listing tables and schemas)
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl Default for QueryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Represents the result of a successful statement
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub kind: StatementKind,
    pub message: String,
    /// Only set for SELECT
    pub rows: Option<ResultSet>,
}

impl QueryResult {
    fn message(kind: StatementKind, message: String) -> Self {
        Self {
            kind,
            message,
            rows: None,
        }
    }

    /// Format the result as a string for display
    pub fn format(&self) -> String {
        match &self.rows {
            Some(rows) => format_rows(rows),
            None => self.message.clone(),
        }
    }
}

/// Render rows as a box-drawn table followed by the row count
pub fn format_rows(result: &ResultSet) -> String {
    if result.is_empty() {
        return "No rows found".to_string();
    }

    // Calculate column widths
    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.chars().count()).collect();
    for row in &result.rows {
        for (width, value) in widths.iter_mut().zip(&row.values) {
            *width = (*width).max(value.to_string().chars().count());
        }
    }

    let border = |left: &str, middle: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(middle), right)
    };

    let line = |cells: Vec<String>| {
        let mut line = String::from("│");
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str(&format!(" {:<width$} │", cell, width = width));
        }
        line.push('\n');
        line
    };

    let mut output = border("┌", "┬", "┐");
    output.push_str(&line(result.columns.clone()));
    output.push_str(&border("├", "┼", "┤"));
    for row in &result.rows {
        output.push_str(&line(row.values.iter().map(|v| v.to_string()).collect()));
    }
    output.push_str(&border("└", "┴", "┘"));
    output.push_str(&format!("\n{} row(s) returned", result.len()));

    output
}
