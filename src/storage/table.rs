// Table implementation
// A table combines a fixed schema with an ordered list of rows.
// Rows are kept in insertion order; deletes keep the survivors' relative order.

use super::{Column, ResultSet, Row, Schema, Value};
use crate::error::StorageError;
use crate::query::ast::Projection;
use crate::query::condition::Condition;

/// Represents a database table
pub struct Table {
    /// The name of the table
    pub name: String,
    /// The schema (column definitions)
    pub schema: Schema,
    /// The rows, each shaped exactly like the schema
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    /// Fails if two columns share a name.
    pub fn new(name: String, schema: Schema) -> Result<Self, StorageError> {
        for (i, column) in schema.columns.iter().enumerate() {
            if schema.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(StorageError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
        }

        Ok(Self {
            name,
            schema,
            rows: Vec::new(),
        })
    }

    /// Insert a row into the table
    ///
    /// Without a column list the values bind positionally to the schema.
    /// With one, the listed columns get the values and every other column is NULL.
    pub fn insert(
        &mut self,
        columns: Option<&[String]>,
        values: Vec<Value>,
    ) -> Result<(), StorageError> {
        let expected = columns.map_or(self.schema.len(), |cols| cols.len());
        if values.len() != expected {
            return Err(StorageError::ArityMismatch {
                expected,
                found: values.len(),
            });
        }

        let row = match columns {
            None => Row::new(values),
            Some(columns) => {
                let positions = self.resolve_columns(columns.iter())?;
                let mut row_values = vec![Value::Null; self.schema.len()];
                for (position, value) in positions.into_iter().zip(values) {
                    row_values[position] = value;
                }
                Row::new(row_values)
            }
        };

        self.rows.push(row);
        Ok(())
    }

    /// Select the rows matching `filter`, projected onto `projection`
    ///
    /// Unknown column names in the projection come back as NULL instead of failing.
    pub fn select(&self, projection: &Projection, filter: Option<&Condition>) -> ResultSet {
        let matching = self
            .rows
            .iter()
            .filter(|row| filter.map_or(true, |cond| cond.evaluate(&self.schema, row)));

        match projection {
            Projection::All => ResultSet {
                columns: self.schema.column_names(),
                rows: matching.cloned().collect(),
            },
            Projection::Columns(requested) => {
                // Rows are column -> value maps, so a repeated name appears once
                let mut names: Vec<String> = Vec::with_capacity(requested.len());
                for name in requested {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }

                let positions: Vec<Option<usize>> = names
                    .iter()
                    .map(|name| self.schema.get_column_index(name))
                    .collect();

                let rows = matching
                    .map(|row| {
                        Row::new(
                            positions
                                .iter()
                                .map(|pos| pos.map_or(Value::Null, |i| row.values[i].clone()))
                                .collect(),
                        )
                    })
                    .collect();

                ResultSet {
                    columns: names,
                    rows,
                }
            }
        }
    }

    /// Update rows matching `filter` (all rows when there is none)
    /// Returns the number of rows updated
    ///
    /// Every assignment column must exist; that is checked before any row changes.
    /// Values are not checked against the declared column type.
    pub fn update(
        &mut self,
        assignments: &[(String, Value)],
        filter: Option<&Condition>,
    ) -> Result<usize, StorageError> {
        let positions = self.resolve_columns(assignments.iter().map(|(name, _)| name))?;

        let schema = &self.schema;
        let mut updated_count = 0;

        for row in self.rows.iter_mut() {
            if filter.map_or(true, |cond| cond.evaluate(schema, row)) {
                for (&position, (_, value)) in positions.iter().zip(assignments) {
                    row.values[position] = value.clone();
                }
                updated_count += 1;
            }
        }

        Ok(updated_count)
    }

    /// Delete rows matching `filter`; with no filter the table is emptied
    /// Returns the number of rows deleted
    pub fn delete(&mut self, filter: Option<&Condition>) -> usize {
        let before = self.rows.len();

        match filter {
            None => self.rows.clear(),
            Some(cond) => {
                let schema = &self.schema;
                self.rows.retain(|row| !cond.evaluate(schema, row));
            }
        }

        before - self.rows.len()
    }

    /// Get the rows in insertion order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of rows in the table
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the column definitions
    pub fn columns(&self) -> &[Column] {
        &self.schema.columns
    }

    /// Map column names to schema positions, rejecting unknown or repeated names
    fn resolve_columns<'a>(
        &self,
        names: impl Iterator<Item = &'a String>,
    ) -> Result<Vec<usize>, StorageError> {
        let mut positions = Vec::new();

        for name in names {
            let position =
                self.schema
                    .get_column_index(name)
                    .ok_or_else(|| StorageError::UnknownColumn {
                        table: self.name.clone(),
                        column: name.clone(),
                    })?;

            if positions.contains(&position) {
                return Err(StorageError::DuplicateColumn {
                    column: name.clone(),
                });
            }
            positions.push(position);
        }

        Ok(positions)
    }
}
