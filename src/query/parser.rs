// SQL Parser
// A recursive-descent parser: one method per statement, driven by the first token.
// It stops at the first error; there is no recovery.

use super::ast::{Projection, Statement};
use super::condition::{ComparisonOp, Condition, LogicalOp};
use super::token::{Keyword, Punct, Token, TokenKind};
use crate::error::SyntaxError;
use crate::storage::{Column, DataType, Value};

/// Parse a token stream (as produced by the lexer) into one statement
pub fn parse(tokens: Vec<Token>) -> Result<Statement, SyntaxError> {
    QueryParser::new(tokens).parse()
}

/// The query parser
pub struct QueryParser {
    tokens: Vec<Token>,
    position: usize,
}

impl QueryParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse exactly one statement
    /// Trailing semicolons are allowed; any other token after the statement is an error.
    pub fn parse(mut self) -> Result<Statement, SyntaxError> {
        let Some(last) = self.tokens.last() else {
            return Err(SyntaxError {
                expected: "a statement".to_string(),
                found: "no tokens".to_string(),
                offset: 0,
            });
        };
        if !last.is_eof() {
            let offset = last.offset;
            self.tokens.push(Token::new(TokenKind::Eof, offset));
        }

        let statement = match self.current().keyword() {
            Some(Keyword::Create) => self.parse_create_table()?,
            Some(Keyword::Insert) => self.parse_insert()?,
            Some(Keyword::Select) => self.parse_select()?,
            Some(Keyword::Update) => self.parse_update()?,
            Some(Keyword::Delete) => self.parse_delete()?,
            Some(Keyword::Drop) => self.parse_drop_table()?,
            _ => {
                return Err(
                    self.error("a statement (CREATE, INSERT, SELECT, UPDATE, DELETE or DROP)")
                )
            }
        };

        while self.skip_punct(Punct::Semicolon) {}
        if !self.current().is_eof() {
            return Err(self.error("end of input"));
        }

        Ok(statement)
    }

    /// CREATE TABLE name (col TYPE [,] ...)
    fn parse_create_table(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.expect_identifier()?;
        self.expect_punct(Punct::LeftParen)?;

        let mut columns = Vec::new();
        while !self.current().is_punct(Punct::RightParen) {
            let column_name = self.expect_identifier()?;
            let data_type = self.parse_data_type()?;
            columns.push(Column::new(column_name, data_type));

            self.skip_punct(Punct::Comma);
        }
        self.expect_punct(Punct::RightParen)?;

        Ok(Statement::CreateTable { name, columns })
    }

    /// INSERT INTO name [(col [,] ...)] VALUES (literal [,] ...)
    fn parse_insert(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table_name = self.expect_identifier()?;

        let columns = if self.skip_punct(Punct::LeftParen) {
            let mut columns = Vec::new();
            while !self.current().is_punct(Punct::RightParen) {
                columns.push(self.expect_identifier()?);
                self.skip_punct(Punct::Comma);
            }
            self.expect_punct(Punct::RightParen)?;
            Some(columns)
        } else {
            None
        };

        self.expect_keyword(Keyword::Values)?;
        self.expect_punct(Punct::LeftParen)?;

        let mut values = Vec::new();
        while !self.current().is_punct(Punct::RightParen) {
            values.push(self.parse_literal()?);
            self.skip_punct(Punct::Comma);
        }
        self.expect_punct(Punct::RightParen)?;

        Ok(Statement::Insert {
            table_name,
            columns,
            values,
        })
    }

    /// SELECT * | col, ... FROM name [WHERE ...]
    fn parse_select(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Select)?;

        let projection = if self.skip_punct(Punct::Star) {
            Projection::All
        } else {
            let mut columns = vec![self.expect_identifier()?];
            while self.skip_punct(Punct::Comma) {
                columns.push(self.expect_identifier()?);
            }
            Projection::Columns(columns)
        };

        self.expect_keyword(Keyword::From)?;
        let table_name = self.expect_identifier()?;
        let condition = self.parse_where_clause()?;

        Ok(Statement::Select {
            projection,
            table_name,
            condition,
        })
    }

    /// UPDATE name SET col = literal [,] ... [WHERE ...]
    fn parse_update(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Update)?;
        let table_name = self.expect_identifier()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments: Vec<(String, Value)> = Vec::new();
        loop {
            let column = self.expect_identifier()?;
            self.expect_operator(ComparisonOp::Eq)?;
            let value = self.parse_literal()?;

            // Assigning the same column twice keeps the last value
            match assignments.iter_mut().find(|(name, _)| *name == column) {
                Some(existing) => existing.1 = value,
                None => assignments.push((column, value)),
            }

            self.skip_punct(Punct::Comma);
            if !matches!(self.current().kind, TokenKind::Ident(_)) {
                break;
            }
        }

        let condition = self.parse_where_clause()?;

        Ok(Statement::Update {
            table_name,
            assignments,
            condition,
        })
    }

    /// DELETE FROM name [WHERE ...]
    fn parse_delete(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table_name = self.expect_identifier()?;
        let condition = self.parse_where_clause()?;

        Ok(Statement::Delete {
            table_name,
            condition,
        })
    }

    /// DROP TABLE name
    fn parse_drop_table(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Table)?;
        let table_name = self.expect_identifier()?;

        Ok(Statement::DropTable { table_name })
    }

    /// An optional `WHERE condition_chain`
    fn parse_where_clause(&mut self) -> Result<Option<Condition>, SyntaxError> {
        if self.current().keyword() == Some(Keyword::Where) {
            self.advance();
            Ok(Some(self.parse_condition()?))
        } else {
            Ok(None)
        }
    }

    /// col <op> literal [(AND | OR) condition_chain]
    fn parse_condition(&mut self) -> Result<Condition, SyntaxError> {
        let column = self.expect_identifier()?;
        let op = match self.current().kind {
            TokenKind::Operator(op) => {
                self.advance();
                op
            }
            _ => return Err(self.error("a comparison operator")),
        };
        let value = self.parse_literal()?;

        let condition = Condition::new(column, op, value);

        let logical = match self.current().keyword() {
            Some(Keyword::And) => LogicalOp::And,
            Some(Keyword::Or) => LogicalOp::Or,
            _ => return Ok(condition),
        };
        self.advance();

        // A connective must be followed by another comparison
        Ok(condition.with_next(logical, self.parse_condition()?))
    }

    /// INT | FLOAT | DATE | VARCHAR [(size)]
    fn parse_data_type(&mut self) -> Result<DataType, SyntaxError> {
        let data_type = match self.current().keyword() {
            Some(Keyword::Int) => DataType::Int,
            Some(Keyword::Float) => DataType::Float,
            Some(Keyword::Date) => DataType::Date,
            Some(Keyword::Varchar) => DataType::Varchar(None),
            _ => return Err(self.error("a column type (INT, VARCHAR, FLOAT or DATE)")),
        };
        self.advance();

        if data_type == DataType::Varchar(None) && self.skip_punct(Punct::LeftParen) {
            let size = match self.current().kind {
                TokenKind::Integer(n) => usize::try_from(n).ok(),
                _ => None,
            };
            let Some(size) = size else {
                return Err(self.error("a VARCHAR size"));
            };
            self.advance();
            self.expect_punct(Punct::RightParen)?;
            return Ok(DataType::Varchar(Some(size)));
        }

        Ok(data_type)
    }

    /// A string or numeric literal
    fn parse_literal(&mut self) -> Result<Value, SyntaxError> {
        let value = match &self.current().kind {
            TokenKind::String(s) => Value::Text(s.clone()),
            TokenKind::Integer(n) => Value::Integer(*n),
            TokenKind::Float(x) => Value::Float(*x),
            _ => return Err(self.error("a value")),
        };
        self.advance();
        Ok(value)
    }

    // --- Token Helpers ---

    /// The current token; stays on `Eof` once the end is reached
    fn current(&self) -> &Token {
        let index = self.position.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn error(&self, expected: &str) -> SyntaxError {
        let token = self.current();
        SyntaxError {
            expected: expected.to_string(),
            found: token.kind.to_string(),
            offset: token.offset,
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), SyntaxError> {
        if self.current().keyword() == Some(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(keyword.as_str()))
        }
    }

    fn expect_punct(&mut self, punct: Punct) -> Result<(), SyntaxError> {
        if self.skip_punct(punct) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", punct.as_char())))
        }
    }

    fn expect_operator(&mut self, op: ComparisonOp) -> Result<(), SyntaxError> {
        if self.current().kind == TokenKind::Operator(op) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", op)))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, SyntaxError> {
        match &self.current().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("an identifier")),
        }
    }

    /// Consume `punct` if it is next; reports whether it was
    fn skip_punct(&mut self, punct: Punct) -> bool {
        if self.current().is_punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }
}
