// WHERE conditions
// A condition is a chain of comparisons joined by AND / OR:
//
//   age > 19 AND grade = 'A' OR name = 'Bob'
//
// Each link owns the next one. There is no precedence and no parentheses; a link's
// own comparison is combined with the result of the whole rest of the chain.

use crate::storage::{Row, Schema, Value};
use std::cmp::Ordering;
use std::fmt;

/// The comparison operators allowed in a WHERE clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::GtEq => ">=",
        }
    }

    /// Does `left.cmp(right) == ordering` satisfy `left <op> right`?
    pub fn matches(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::Eq => ordering == Ordering::Equal,
            ComparisonOp::NotEq => ordering != Ordering::Equal,
            ComparisonOp::Lt => ordering == Ordering::Less,
            ComparisonOp::Gt => ordering == Ordering::Greater,
            ComparisonOp::LtEq => ordering != Ordering::Greater,
            ComparisonOp::GtEq => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// One link of a WHERE chain: `column <op> value`, optionally followed by AND/OR and the rest
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: ComparisonOp,
    pub value: Value,
    pub next: Option<(LogicalOp, Box<Condition>)>,
}

impl Condition {
    pub fn new(column: impl Into<String>, op: ComparisonOp, value: Value) -> Self {
        Self {
            column: column.into(),
            op,
            value,
            next: None,
        }
    }

    /// Attach the rest of the chain to this link
    pub fn with_next(mut self, logical: LogicalOp, next: Condition) -> Self {
        self.next = Some((logical, Box::new(next)));
        self
    }

    /// Evaluate the chain against one row
    ///
    /// A column the schema doesn't have reads as NULL, and comparing against NULL
    /// (or across text and numbers) is simply false.
    pub fn evaluate(&self, schema: &Schema, row: &Row) -> bool {
        let matched = self.compare(schema, row);

        match &self.next {
            None => matched,
            Some((LogicalOp::And, next)) => matched && next.evaluate(schema, row),
            Some((LogicalOp::Or, next)) => matched || next.evaluate(schema, row),
        }
    }

    fn compare(&self, schema: &Schema, row: &Row) -> bool {
        let Some(value) = schema
            .get_column_index(&self.column)
            .and_then(|index| row.values.get(index))
        else {
            return false;
        };

        value
            .compare(&self.value)
            .is_some_and(|ordering| self.op.matches(ordering))
    }
}
