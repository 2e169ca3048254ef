//! # Rill - a minimal scripting language
//!
//! The front-end and evaluation core of a small statement-based scripting
//! language: a tokenizer, a recursive-descent parser producing an AST, and a
//! tree-walking evaluator over a tagged runtime-object model with chained
//! scopes.
//!
//! ## Quick Start
//!
//! ```rust
//! use rill::{interpret, Object};
//!
//! # fn main() -> rill::Result<()> {
//! let result = interpret("let x = 5\nx + 3")?;
//! assert_eq!(result, Object::Integer(8));
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the components directly
//!
//! The pipeline is `Scanner` → `Parser` → `Evaluator`. Driving it by hand
//! gives access to parser error recovery and to the lines rendered by
//! `printline` (the core never writes to an output sink itself):
//!
//! ```rust
//! use rill::{Evaluator, Parser, Scanner};
//!
//! let source = r#"
//!     let greeting = "hello"
//!     printline(greeting)
//!     printline(2 + 3 * 4)
//! "#;
//!
//! let mut parser = Parser::new(Scanner::new(source));
//! let program = parser.parse_program();
//! assert!(parser.errors().is_empty());
//!
//! let mut evaluator = Evaluator::new();
//! evaluator.execute(&program);
//! assert_eq!(evaluator.take_output(), vec!["hello", "14"]);
//! ```
//!
//! ## Language Overview
//!
//! - `let name [: type] = expr` — bind a name in the current scope
//! - `printline(expr)` — render a value
//! - `if (expr) { ... } [else { ... }]` — conditional over Boolean values
//! - `func name(params) { ... }` / `return expr` — function declaration
//!   and call
//! - Arithmetic `+ - * /` and comparisons `< >` over 64-bit integers, with
//!   parentheses overriding precedence
//! - Integer and double-quoted string literals; `//` line comments
//! - Statements end at a newline or `;`
//!
//! ## Error Handling
//!
//! Every failure is a returned value, never a process abort. Lexer and
//! parser errors are recorded per statement and the statement is skipped;
//! evaluation errors are first-class [`Object::Error`] values that
//! short-circuit only the statement containing them:
//!
//! ```rust
//! use rill::{interpret, Error, Object};
//!
//! let result = interpret("10 / 0").unwrap();
//! assert_eq!(result, Object::error(Error::DivisionByZero));
//! ```

// Module declarations
/// Version of the Rill interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use error::{Error, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{BinaryOp, Expression, Parser, Precedence, Program, Statement, UnaryOp};
pub use runtime::{Environment, Evaluator, Object};

/// Runs a source text through the whole pipeline and returns the last
/// statement's object
///
/// The first recorded lex or parse error is returned as `Err`; callers that
/// want statement-granularity recovery or the `printline` output drive
/// [`Parser`] and [`Evaluator`] directly.
pub fn interpret(source: &str) -> Result<Object> {
    let mut parser = Parser::new(Scanner::new(source));
    let program = parser.parse_program();

    if let Some(error) = parser.take_errors().into_iter().next() {
        return Err(error);
    }

    let mut evaluator = Evaluator::new();
    Ok(evaluator.execute(&program))
}
