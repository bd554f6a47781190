// The in-memory database
// Owns every table by name and exposes the table-level operations the executor needs.

use super::{Column, ResultSet, Schema, Table, Value};
use crate::error::StorageError;
use crate::query::ast::Projection;
use crate::query::condition::Condition;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Read-only summary of a table, for front ends that list the schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<Column>,
    pub row_count: usize,
}

/// A set of named tables
/// Created empty; everything in it is gone once it is dropped.
#[derive(Default)]
pub struct Database {
    tables: HashMap<String, Table>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty table
    pub fn create_table(&mut self, name: &str, columns: Vec<Column>) -> Result<(), StorageError> {
        match self.tables.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StorageError::DuplicateTable(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Table::new(name.to_string(), Schema::new(columns))?);
                Ok(())
            }
        }
    }

    /// Append one row to a table
    pub fn insert_row(
        &mut self,
        name: &str,
        columns: Option<&[String]>,
        values: Vec<Value>,
    ) -> Result<(), StorageError> {
        self.table_mut(name)?.insert(columns, values)
    }

    /// Read rows from a table, optionally filtered
    pub fn select_rows(
        &self,
        name: &str,
        projection: &Projection,
        condition: Option<&Condition>,
    ) -> Result<ResultSet, StorageError> {
        Ok(self.table(name)?.select(projection, condition))
    }

    /// Update rows in place; returns how many rows matched
    pub fn update_rows(
        &mut self,
        name: &str,
        assignments: &[(String, Value)],
        condition: Option<&Condition>,
    ) -> Result<usize, StorageError> {
        self.table_mut(name)?.update(assignments, condition)
    }

    /// Remove rows; returns how many rows were removed
    pub fn delete_rows(
        &mut self,
        name: &str,
        condition: Option<&Condition>,
    ) -> Result<usize, StorageError> {
        Ok(self.table_mut(name)?.delete(condition))
    }

    /// Remove a table and all of its rows
    pub fn drop_table(&mut self, name: &str) -> Result<(), StorageError> {
        self.tables
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::NoSuchTable(name.to_string()))
    }

    /// List all table names, sorted
    pub fn list_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the columns and row count of a table
    pub fn table_info(&self, name: &str) -> Result<TableInfo, StorageError> {
        let table = self.table(name)?;
        Ok(TableInfo {
            name: table.name.clone(),
            columns: table.columns().to_vec(),
            row_count: table.row_count(),
        })
    }

    /// Get a reference to a table (useful for direct access)
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    fn table(&self, name: &str) -> Result<&Table, StorageError> {
        self.tables
            .get(name)
            .ok_or_else(|| StorageError::NoSuchTable(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, StorageError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StorageError::NoSuchTable(name.to_string()))
    }
}
