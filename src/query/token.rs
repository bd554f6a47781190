// Tokens produced by the lexer

use super::condition::ComparisonOp;
use std::fmt;

/// Reserved words, matched case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    Where,
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Create,
    Table,
    Drop,
    And,
    Or,
    // Type names
    Int,
    Varchar,
    Float,
    Date,
}

impl Keyword {
    /// Look up an upper-cased word in the keyword table
    pub fn from_word(word: &str) -> Option<Keyword> {
        let keyword = match word {
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "WHERE" => Keyword::Where,
            "INSERT" => Keyword::Insert,
            "INTO" => Keyword::Into,
            "VALUES" => Keyword::Values,
            "UPDATE" => Keyword::Update,
            "SET" => Keyword::Set,
            "DELETE" => Keyword::Delete,
            "CREATE" => Keyword::Create,
            "TABLE" => Keyword::Table,
            "DROP" => Keyword::Drop,
            "AND" => Keyword::And,
            "OR" => Keyword::Or,
            "INT" => Keyword::Int,
            "VARCHAR" => Keyword::Varchar,
            "FLOAT" => Keyword::Float,
            "DATE" => Keyword::Date,
            _ => return None,
        };
        Some(keyword)
    }

    /// The canonical (upper-case) spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Update => "UPDATE",
            Keyword::Set => "SET",
            Keyword::Delete => "DELETE",
            Keyword::Create => "CREATE",
            Keyword::Table => "TABLE",
            Keyword::Drop => "DROP",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Int => "INT",
            Keyword::Varchar => "VARCHAR",
            Keyword::Float => "FLOAT",
            Keyword::Date => "DATE",
        }
    }
}

/// Single-character punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Star,
}

impl Punct {
    pub fn as_char(&self) -> char {
        match self {
            Punct::LeftParen => '(',
            Punct::RightParen => ')',
            Punct::Comma => ',',
            Punct::Semicolon => ';',
            Punct::Star => '*',
        }
    }
}

/// What kind of token this is, together with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    /// A table or column name, spelled as written
    Ident(String),
    /// A quoted string, escapes already resolved
    String(String),
    Integer(i64),
    Float(f64),
    Operator(ComparisonOp),
    Punct(Punct),
    /// End of input - always the last token
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "keyword {}", kw.as_str()),
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::String(s) => write!(f, "string '{}'", s),
            TokenKind::Integer(n) => write!(f, "number {}", n),
            TokenKind::Float(x) => write!(f, "number {:?}", x),
            TokenKind::Operator(op) => write!(f, "operator '{}'", op),
            TokenKind::Punct(p) => write!(f, "'{}'", p.as_char()),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token and where it starts in the input
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset of the first character of the token
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn is_punct(&self, punct: Punct) -> bool {
        self.kind == TokenKind::Punct(punct)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
