use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// All possible token types in Rill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// Integer literal
    Integer(i64),
    /// String literal (double-quoted, no escapes)
    Str(String),

    // Identifiers
    /// Identifier (maximal run of letters, not a keyword)
    Identifier(String),

    // Keywords
    /// LET keyword
    Let,
    /// FUNC keyword
    Func,
    /// IF keyword
    If,
    /// ELSE keyword
    Else,
    /// RETURN keyword
    Return,
    /// PRINTLINE built-in keyword
    Printline,

    // Operators
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Star,
    /// Slash operator (/)
    Slash,
    /// Less than operator (<)
    Lt,
    /// Greater than operator (>)
    Gt,
    /// Assignment operator (=)
    Assign,

    // Delimiters
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Left brace {
    LeftBrace,
    /// Right brace }
    RightBrace,
    /// Colon delimiter (type annotations)
    Colon,
    /// Comma delimiter (parameter and argument lists)
    Comma,
    /// Semicolon statement boundary
    Semicolon,
    /// Newline statement boundary
    Newline,

    // Special
    /// End of file marker
    Eof,
}

lazy_static! {
    /// Fixed keyword table. Consulted only after a complete identifier scan;
    /// any other lookup path (substring search over the line) is a defect.
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut m = HashMap::new();
        m.insert("let", TokenKind::Let);
        m.insert("func", TokenKind::Func);
        m.insert("if", TokenKind::If);
        m.insert("else", TokenKind::Else);
        m.insert("return", TokenKind::Return);
        m.insert("printline", TokenKind::Printline);
        m
    };
}

impl TokenKind {
    /// Looks up a fully scanned identifier in the keyword table
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS.get(text).cloned()
    }

    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Func
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Return
                | TokenKind::Printline
        )
    }

    /// Check if token ends a statement
    pub fn is_statement_boundary(&self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon | TokenKind::Newline | TokenKind::Eof
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Str(s) => write!(f, "\"{}\"", s),
            TokenKind::Identifier(id) => write!(f, "{}", id),
            TokenKind::Let => write!(f, "let"),
            TokenKind::Func => write!(f, "func"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Else => write!(f, "else"),
            TokenKind::Return => write!(f, "return"),
            TokenKind::Printline => write!(f, "printline"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::LeftBrace => write!(f, "{{"),
            TokenKind::RightBrace => write!(f, "}}"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("let"), Some(TokenKind::Let));
        assert_eq!(TokenKind::keyword("func"), Some(TokenKind::Func));
        assert_eq!(TokenKind::keyword("if"), Some(TokenKind::If));
        assert_eq!(TokenKind::keyword("else"), Some(TokenKind::Else));
        assert_eq!(TokenKind::keyword("return"), Some(TokenKind::Return));
        assert_eq!(TokenKind::keyword("printline"), Some(TokenKind::Printline));
        assert_eq!(TokenKind::keyword("letter"), None);
        assert_eq!(TokenKind::keyword("Func"), None);
        assert_eq!(TokenKind::keyword(""), None);
    }

    #[test]
    fn test_is_keyword() {
        assert!(TokenKind::Let.is_keyword());
        assert!(TokenKind::Printline.is_keyword());
        assert!(!TokenKind::Integer(42).is_keyword());
        assert!(!TokenKind::Identifier("test".to_string()).is_keyword());
    }

    #[test]
    fn test_statement_boundaries() {
        assert!(TokenKind::Semicolon.is_statement_boundary());
        assert!(TokenKind::Newline.is_statement_boundary());
        assert!(TokenKind::Eof.is_statement_boundary());
        assert!(!TokenKind::RightBrace.is_statement_boundary());
        assert!(!TokenKind::Plus.is_statement_boundary());
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::Integer(5).to_string(), "5");
        assert_eq!(TokenKind::Str("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(TokenKind::Assign.to_string(), "=");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }
}
