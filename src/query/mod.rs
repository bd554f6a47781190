// Query module - turns SQL text into statements and runs them
// lexer -> parser -> executor, each stage feeding the next
pub mod ast;
pub mod condition;
pub mod executor;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Projection, Statement, StatementKind};
pub use condition::{ComparisonOp, Condition, LogicalOp};
pub use executor::{QueryExecutor, QueryResult};
pub use lexer::Lexer;
pub use parser::QueryParser;
pub use token::{Keyword, Punct, Token, TokenKind};
