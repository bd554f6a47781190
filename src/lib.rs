// minisql - a small SQL compiler over an in-memory store
// This is the library root that exposes the public API

pub mod compiler;
pub mod error;
pub mod query;
pub mod storage;

// Re-export commonly used types for convenience
pub use compiler::{CompileResult, SqlCompiler};
pub use error::{LexError, SqlError, StorageError, SyntaxError};
pub use query::{QueryExecutor, QueryParser, Statement, StatementKind};
pub use storage::{Column, DataType, Database, ResultSet, Row, Schema, TableInfo, Value};
