// SQL Lexer
// Converts a statement string into tokens in one left-to-right pass.
// Looks at most one character ahead (two to spot a `--` comment).

use super::condition::ComparisonOp;
use super::token::{Keyword, Punct, Token, TokenKind};
use crate::error::LexError;

/// Tokenize a whole statement
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

/// A lexical scanner over one statement
pub struct Lexer {
    /// The input stored as characters; offsets are indexes into this
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Processes the entire input and returns the tokens, ending with exactly one `Eof`
    ///
    /// # Errors
    /// Fails on a character that can't start a token, a lone `!`,
    /// an unterminated string or a number that doesn't fit.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.skip_comment();
                continue;
            }

            tokens.push(self.next_token()?);
        }

        tokens.push(Token::new(TokenKind::Eof, self.position));
        Ok(tokens)
    }

    /// Reads the token starting at the current position
    fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, start));
        };

        let kind = match ch {
            '\'' | '"' => self.read_string(ch)?,
            c if c.is_ascii_digit() => self.read_number()?,
            c if c.is_alphabetic() || c == '_' => self.read_word(),
            '(' => self.punct(Punct::LeftParen),
            ')' => self.punct(Punct::RightParen),
            ',' => self.punct(Punct::Comma),
            ';' => self.punct(Punct::Semicolon),
            '*' => self.punct(Punct::Star),
            '=' | '!' | '<' | '>' => self.read_operator()?,
            _ => {
                return Err(LexError::new(
                    format!("unexpected character '{}'", ch),
                    start,
                ))
            }
        };

        Ok(Token::new(kind, start))
    }

    // --- Navigation Helpers ---

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Skips a `--` comment up to (not including) the newline
    fn skip_comment(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    // --- Extraction Logic ---

    fn punct(&mut self, punct: Punct) -> TokenKind {
        self.advance();
        TokenKind::Punct(punct)
    }

    /// Reads a quoted string; a backslash takes the next character literally
    fn read_string(&mut self, quote: char) -> Result<TokenKind, LexError> {
        let start = self.position;
        self.advance(); // Skip the opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(LexError::new("unterminated string literal", start)),
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(TokenKind::String(value));
                }
                Some('\\') => {
                    self.advance();
                    if let Some(escaped) = self.peek() {
                        value.push(escaped);
                        self.advance();
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Reads digits with at most one decimal point
    /// A point makes it a float, otherwise it's an integer.
    fn read_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut has_dot = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                number.push(c);
            } else if c == '.' && !has_dot {
                has_dot = true;
                number.push(c);
            } else {
                break;
            }
            self.advance();
        }

        if has_dot {
            number
                .parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| LexError::new(format!("invalid number '{}'", number), start))
        } else {
            number.parse::<i64>().map(TokenKind::Integer).map_err(|_| {
                LexError::new(format!("integer literal '{}' is out of range", number), start)
            })
        }
    }

    /// Reads a word and decides whether it's a keyword or an identifier
    fn read_word(&mut self) -> TokenKind {
        let mut word = String::new();

        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            word.push(c);
            self.advance();
        }

        match Keyword::from_word(&word.to_uppercase()) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Ident(word),
        }
    }

    /// Reads `=`, `!=`, `<`, `<=`, `>` or `>=`
    fn read_operator(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let Some(first) = self.peek() else {
            return Err(LexError::new("expected an operator", start));
        };
        self.advance();

        let followed_by_eq = self.peek() == Some('=');
        let op = match first {
            '=' => ComparisonOp::Eq,
            '!' if followed_by_eq => ComparisonOp::NotEq,
            '!' => return Err(LexError::new("expected '=' after '!'", start)),
            '<' if followed_by_eq => ComparisonOp::LtEq,
            '<' => ComparisonOp::Lt,
            '>' if followed_by_eq => ComparisonOp::GtEq,
            '>' => ComparisonOp::Gt,
            other => {
                return Err(LexError::new(
                    format!("unexpected character '{}'", other),
                    start,
                ))
            }
        };

        if op != ComparisonOp::Eq && followed_by_eq {
            self.advance();
        }

        Ok(TokenKind::Operator(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Ident(name.to_string())
    }

    #[test]
    fn test_tokenize_create_table() {
        assert_eq!(
            kinds("create TABLE users (id INT, name varchar(50))"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                ident("users"),
                TokenKind::Punct(Punct::LeftParen),
                ident("id"),
                TokenKind::Keyword(Keyword::Int),
                TokenKind::Punct(Punct::Comma),
                ident("name"),
                TokenKind::Keyword(Keyword::Varchar),
                TokenKind::Punct(Punct::LeftParen),
                TokenKind::Integer(50),
                TokenKind::Punct(Punct::RightParen),
                TokenKind::Punct(Punct::RightParen),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_keep_spelling() {
        assert_eq!(
            kinds("SeLeCt First_Name"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                ident("First_Name"),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(
            kinds("42 50000.75 7."),
            vec![
                TokenKind::Integer(42),
                TokenKind::Float(50000.75),
                TokenKind::Float(7.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_second_decimal_point_is_not_part_of_number() {
        let err = tokenize("1.2.3").unwrap_err();
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn test_tokenize_operators() {
        let ops: Vec<TokenKind> = [
            ComparisonOp::Eq,
            ComparisonOp::NotEq,
            ComparisonOp::Lt,
            ComparisonOp::LtEq,
            ComparisonOp::Gt,
            ComparisonOp::GtEq,
        ]
        .into_iter()
        .map(TokenKind::Operator)
        .chain([TokenKind::Eof])
        .collect();

        assert_eq!(kinds("= != < <= > >="), ops);
        assert_eq!(kinds("=!=<<=>>="), ops);
    }

    #[test]
    fn test_bang_needs_equals() {
        let err = tokenize("a ! b").unwrap_err();
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_tokenize_strings() {
        assert_eq!(
            kinds(r#"'Alice' "Bob Dylan" 'it\'s' ''"#),
            vec![
                TokenKind::String("Alice".into()),
                TokenKind::String("Bob Dylan".into()),
                TokenKind::String("it's".into()),
                TokenKind::String(String::new()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("SELECT 'hello").unwrap_err();
        assert_eq!(err.offset, 7);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("SELECT -- the columns\n* -- trailing"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Punct(Punct::Star),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("SELECT @").unwrap_err();
        assert_eq!(err, LexError::new("unexpected character '@'", 7));

        // a single dash is not a comment
        assert!(tokenize("- 1").is_err());
    }

    #[test]
    fn test_offsets_and_single_eof() {
        let tokens = tokenize("  DROP   TABLE t  ").unwrap();

        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![2, 9, 15, 18]);
        assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);

        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }
}
