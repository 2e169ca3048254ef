use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::parser::Statement;

/// Runtime value representation
///
/// Exactly one tag is active at a time. `Error` is an ordinary first-class
/// value: it propagates by explicit short-circuit in the evaluator, never by
/// panic or exception.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit integer value
    Integer(i64),
    /// String value
    Str(String),

    /// Callable function value bound by a declaration
    Function {
        /// Declared name
        name: String,
        /// Parameter names
        params: Vec<String>,
        /// Body statements (shared, the AST is immutable once built)
        body: Arc<Vec<Statement>>,
        /// Bindings visible at the point of declaration
        closure: Arc<HashMap<String, Object>>,
    },

    /// Evaluation error carried as a value
    Error(Box<Error>),
}

impl Object {
    /// Wraps an error as a runtime value
    pub fn error(error: Error) -> Self {
        Object::Error(Box::new(error))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> String {
        match self {
            Object::Null => "null".to_string(),
            Object::Boolean(_) => "bool".to_string(),
            Object::Integer(_) => "int".to_string(),
            Object::Str(_) => "string".to_string(),
            Object::Function { .. } => "function".to_string(),
            Object::Error(_) => "error".to_string(),
        }
    }

    /// Returns true if the value carries an error
    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl fmt::Display for Object {
    /// Renders the textual form used by `printline`: integers in decimal,
    /// strings verbatim, errors as `ERROR: <message>`
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Null => write!(f, "null"),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Integer(n) => write!(f, "{}", n),
            Object::Str(s) => write!(f, "{}", s),
            Object::Function { name, params, .. } => {
                write!(f, "<func {}({})>", name, params.join(", "))
            }
            Object::Error(e) => write!(f, "ERROR: {}", e),
        }
    }
}
