//! Error types for the Rill interpreter

use thiserror::Error;

/// Rill interpreter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lex errors
    /// Unrecognized byte in the source text
    ///
    /// **Triggered by:** A character outside the token grammar
    /// **Example:** `let x = 5 @ 3` (`@` is not a Rill token)
    #[error("Illegal character '{ch}' at line {line}, column {column}")]
    IllegalCharacter {
        /// The offending character
        ch: char,
        /// Line number where it appeared (1-indexed)
        line: usize,
        /// Column number where it appeared (1-indexed)
        column: usize,
    },

    /// String literal with no closing quote
    ///
    /// **Triggered by:** End of input reached inside a string
    /// **Example:** `let s = "hello`
    #[error("Unterminated string starting at line {line}")]
    UnterminatedString {
        /// Line number where the string opened
        line: usize,
    },

    /// Digit run that does not fit a 64-bit integer
    #[error("Invalid integer literal '{text}' at line {line}")]
    InvalidNumber {
        /// The offending digit run
        text: String,
        /// Line number where it appeared
        line: usize,
    },

    // Parse errors
    /// Token mismatch during parsing
    ///
    /// **Triggered by:** The current token not matching the grammar rule
    /// **Example:** `let x 5` (missing `=`)
    #[error("Expected {expected}, got {got} at line {line}, column {column}")]
    UnexpectedToken {
        /// Description of the expected token
        expected: String,
        /// The token actually seen
        got: String,
        /// Line number of the mismatch
        line: usize,
        /// Column number of the mismatch
        column: usize,
    },

    /// Input ended in the middle of a construct
    #[error("Unexpected end of input")]
    UnexpectedEof,

    // Eval errors
    /// Single value with the wrong tag for an operation
    ///
    /// **Triggered by:** A unary operator or an `if` condition receiving
    /// an unsupported operand
    /// **Example:** `-"text"`, `if ("text") { ... }`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Binary operation across differing operand tags
    ///
    /// **Triggered by:** Mixing types in a binary operation
    /// **Example:** `5 + "text"`
    #[error("Type mismatch: {left_type} {op} {right_type}")]
    TypeMismatch {
        /// Operator text
        op: String,
        /// Left operand type name
        left_type: String,
        /// Right operand type name
        right_type: String,
    },

    /// Operator the operand type does not support
    ///
    /// **Triggered by:** Same-tag operands with no rule for the operator
    /// **Example:** `"a" - "b"`
    #[error("Unknown operator: {left_type} {op} {right_type}")]
    UnknownOperator {
        /// Operator text
        op: String,
        /// Left operand type name
        left_type: String,
        /// Right operand type name
        right_type: String,
    },

    /// Division with a zero right operand
    ///
    /// **Triggered by:** `x / 0`
    #[error("Division by zero")]
    DivisionByZero,

    /// Reference to a name with no binding in any enclosing scope
    ///
    /// **Triggered by:** Using a variable before any `let`
    #[error("Undefined variable: {name}")]
    UndefinedVariable {
        /// Variable name
        name: String,
    },

    /// Call of a value that is not a function
    #[error("Value is not callable: {type_name}")]
    NotCallable {
        /// Type of the non-callable value
        type_name: String,
    },

    /// Call with the wrong number of arguments
    #[error("Function {name} expects {expected} argument(s), got {got}")]
    InvalidArguments {
        /// Function name
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// `return` outside any function body
    #[error("Return statement outside function")]
    ReturnOutsideFunction,
}

/// Result type for Rill operations
pub type Result<T> = std::result::Result<T, Error>;
