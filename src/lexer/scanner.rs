use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for Rill source text
///
/// Tokens are produced on demand by [`Scanner::next_token`]; the cursor
/// advances monotonically and never rewinds. After the end of input every
/// call returns the `Eof` sentinel.
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Line where the current token started
    start_line: usize,
    /// Column where the current token started
    start_column: usize,
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Returns the next token, or the `Eof` sentinel once input is exhausted
    ///
    /// Spaces and tabs are insignificant; `//` comments are skipped entirely.
    /// Newlines are statement boundaries and are emitted as tokens. Illegal
    /// characters and unterminated strings are returned errors, never aborts;
    /// the offending character is consumed so scanning can continue.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            self.skip_insignificant();

            if self.is_at_end() {
                return Ok(Token::new(
                    TokenKind::Eof,
                    String::new(),
                    self.line,
                    self.column,
                ));
            }

            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;

            let c = self.advance();

            return match c {
                '\n' => Ok(self.make_token(TokenKind::Newline)),
                ';' => Ok(self.make_token(TokenKind::Semicolon)),

                '+' => Ok(self.make_token(TokenKind::Plus)),
                '-' => Ok(self.make_token(TokenKind::Minus)),
                '*' => Ok(self.make_token(TokenKind::Star)),
                '/' => {
                    // A second slash starts a comment running to end of line;
                    // the comment is not emitted as a token.
                    if self.match_char('/') {
                        self.skip_line_comment();
                        continue;
                    }
                    Ok(self.make_token(TokenKind::Slash))
                }

                '<' => Ok(self.make_token(TokenKind::Lt)),
                '>' => Ok(self.make_token(TokenKind::Gt)),
                '=' => Ok(self.make_token(TokenKind::Assign)),

                '(' => Ok(self.make_token(TokenKind::LeftParen)),
                ')' => Ok(self.make_token(TokenKind::RightParen)),
                '{' => Ok(self.make_token(TokenKind::LeftBrace)),
                '}' => Ok(self.make_token(TokenKind::RightBrace)),
                ':' => Ok(self.make_token(TokenKind::Colon)),
                ',' => Ok(self.make_token(TokenKind::Comma)),

                '"' => self.scan_string(),

                c if c.is_ascii_digit() => self.scan_number(),
                c if c.is_alphabetic() => Ok(self.scan_identifier_or_keyword()),

                c => Err(Error::IllegalCharacter {
                    ch: c,
                    line: self.start_line,
                    column: self.start_column,
                }),
            };
        }
    }

    /// Scans all remaining tokens eagerly, including the trailing `Eof`
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn skip_insignificant(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_string(&mut self) -> Result<Token> {
        // No escape processing: the lexeme runs to the next double quote.
        // Strings do not span lines.
        while !self.is_at_end() && self.peek() != '"' && self.peek() != '\n' {
            self.advance();
        }

        if self.is_at_end() || self.peek() == '\n' {
            return Err(Error::UnterminatedString {
                line: self.start_line,
            });
        }

        let value: String = self.source[self.start + 1..self.current].iter().collect();
        self.advance(); // Closing "

        Ok(self.make_token(TokenKind::Str(value)))
    }

    fn scan_number(&mut self) -> Result<Token> {
        // Maximal digit run. No sign (unary minus belongs to the parser)
        // and no fractional part.
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let value: i64 = text.parse().map_err(|_| Error::InvalidNumber {
            text: text.clone(),
            line: self.start_line,
        })?;

        Ok(self.make_token(TokenKind::Integer(value)))
    }

    fn scan_identifier_or_keyword(&mut self) -> Token {
        // Maximal run of letters. The keyword table is consulted only once
        // the full lexeme has been scanned.
        while self.peek().is_alphabetic() {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier(text));

        self.make_token(kind)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        Token::new(kind, lexeme, self.start_line, self.start_column)
    }
}
