// Error types
// Every stage of the pipeline has its own error type; SqlError ties them together
// so the compiler facade can catch everything in one place.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SqlError>;

/// Raised by the lexer when the input text can't be split into tokens
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Lex error at position {offset}: {message}")]
pub struct LexError {
    pub message: String,
    /// Character offset into the statement text
    pub offset: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Raised by the parser when the token stream violates the grammar
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error at position {offset}: expected {expected}, got {found}")]
pub struct SyntaxError {
    pub expected: String,
    pub found: String,
    pub offset: usize,
}

/// Raised by the store when a statement doesn't fit the current tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Table '{0}' already exists")]
    DuplicateTable(String),

    #[error("Table '{0}' does not exist")]
    NoSuchTable(String),

    #[error("Number of columns and values don't match: expected {expected} values, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Column '{column}' does not exist in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Column '{column}' specified more than once")]
    DuplicateColumn { column: String },
}

/// Any failure produced while compiling or executing a statement
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqlError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
