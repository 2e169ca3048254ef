//! Rill parser module
//!
//! Parses the token stream into an Abstract Syntax Tree (AST) by recursive
//! descent, one statement at a time, with precedence climbing for
//! expressions.

mod ast;
mod descent;

pub use ast::{BinaryOp, Expression, Precedence, Program, Statement, UnaryOp};
pub use descent::Parser;
