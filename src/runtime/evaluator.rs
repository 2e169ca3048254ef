use std::sync::Arc;

use crate::error::Error;
use crate::parser::{BinaryOp, Expression, Program, Statement, UnaryOp};
use crate::runtime::{Environment, Object};

/// Tree-walking evaluator for Rill programs
///
/// Owns the [`Environment`], which persists across `execute` calls so that
/// consecutive statements retain their `let` bindings, and the buffer of
/// lines rendered by `printline` (the core never writes to a sink itself;
/// callers drain the buffer with [`Evaluator::take_output`]).
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    /// Variable environment
    pub env: Environment,
    /// Lines rendered by `printline`, in order
    output: Vec<String>,
}

/// Result of evaluating one statement: either an ordinary value or a
/// `return` unwinding the innermost function call
enum Flow {
    Normal(Object),
    Return(Object),
}

impl Evaluator {
    /// Creates a new evaluator with an empty root environment
    pub fn new() -> Self {
        Evaluator {
            env: Environment::new(),
            output: Vec::new(),
        }
    }

    /// Creates an evaluator over an existing environment
    pub fn with_env(env: Environment) -> Self {
        Evaluator {
            env,
            output: Vec::new(),
        }
    }

    /// Executes a program and returns the last statement's object
    ///
    /// A statement evaluating to an `Error` object never stops later
    /// statements; bindings established by earlier valid statements are
    /// preserved.
    pub fn execute(&mut self, program: &Program) -> Object {
        let mut last = Object::Null;
        for statement in &program.statements {
            last = self.eval_statement(statement);
        }
        last
    }

    /// Evaluates a single statement against the current environment
    pub fn eval_statement(&mut self, statement: &Statement) -> Object {
        match self.eval_stmt(statement) {
            Flow::Normal(obj) => obj,
            Flow::Return(_) => Object::error(Error::ReturnOutsideFunction),
        }
    }

    /// Takes the lines rendered by `printline` so far, leaving the buffer
    /// empty
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Lines rendered by `printline` so far
    pub fn output(&self) -> &[String] {
        &self.output
    }

    fn eval_stmt(&mut self, statement: &Statement) -> Flow {
        match statement {
            Statement::Let { name, value, .. } => {
                // The type hint is accepted by the parser but unused here.
                let value = self.eval_expression(value);
                if value.is_error() {
                    return Flow::Normal(value);
                }
                self.env.define(name.clone(), value.clone());
                Flow::Normal(value)
            }

            Statement::Print(expr) => {
                // Errors render like any other object; printing never fails
                // the pipeline.
                let obj = self.eval_expression(expr);
                let rendered = obj.to_string();
                tracing::debug!(line = %rendered, "printline");
                self.output.push(rendered);
                Flow::Normal(Object::Null)
            }

            Statement::Block(statements) => self.eval_block(statements),

            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let cond = self.eval_expression(condition);
                match cond {
                    Object::Error(_) => Flow::Normal(cond),
                    Object::Boolean(true) => self.eval_block(then_branch),
                    Object::Boolean(false) => match else_branch {
                        Some(statements) => self.eval_block(statements),
                        None => Flow::Normal(Object::Null),
                    },
                    other => Flow::Normal(Object::error(Error::TypeError {
                        expected: "bool".to_string(),
                        got: other.type_name(),
                    })),
                }
            }

            Statement::FunctionDecl { name, params, body } => {
                let function = Object::Function {
                    name: name.clone(),
                    params: params.clone(),
                    body: Arc::new(body.clone()),
                    closure: Arc::new(self.env.snapshot()),
                };
                self.env.define(name.clone(), function);
                Flow::Normal(Object::Null)
            }

            Statement::Return(expr) => {
                let value = self.eval_expression(expr);
                if value.is_error() {
                    Flow::Normal(value)
                } else {
                    Flow::Return(value)
                }
            }

            Statement::Expression(expr) => Flow::Normal(self.eval_expression(expr)),
        }
    }

    /// Evaluates statements in one child scope; the first `Error` halts the
    /// block and becomes its value
    fn eval_block(&mut self, statements: &[Statement]) -> Flow {
        self.env.enter_scope();
        let flow = self.run_sequence(statements);
        self.env.exit_scope();
        flow
    }

    fn run_sequence(&mut self, statements: &[Statement]) -> Flow {
        let mut last = Object::Null;
        for statement in statements {
            match self.eval_stmt(statement) {
                Flow::Normal(obj) if obj.is_error() => return Flow::Normal(obj),
                Flow::Normal(obj) => last = obj,
                flow @ Flow::Return(_) => return flow,
            }
        }
        Flow::Normal(last)
    }

    fn eval_expression(&mut self, expr: &Expression) -> Object {
        match expr {
            Expression::IntegerLiteral(n) => Object::Integer(*n),
            Expression::StringLiteral(s) => Object::Str(s.clone()),

            Expression::Identifier(name) => match self.env.get(name) {
                Ok(value) => value,
                Err(error) => Object::error(error),
            },

            Expression::Unary { op, operand } => {
                let operand = self.eval_expression(operand);
                if operand.is_error() {
                    return operand;
                }
                Self::apply_unary_op(*op, operand)
            }

            Expression::Binary { op, left, right } => {
                // Left first; its error short-circuits and the right
                // operand is never evaluated.
                let left = self.eval_expression(left);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right);
                if right.is_error() {
                    return right;
                }
                Self::apply_binary_op(*op, left, right)
            }

            Expression::Call { name, args } => self.eval_call(name, args),
        }
    }

    fn apply_unary_op(op: UnaryOp, operand: Object) -> Object {
        match (op, operand) {
            (UnaryOp::Neg, Object::Integer(n)) => Object::Integer(-n),
            (UnaryOp::Neg, other) => Object::error(Error::TypeError {
                expected: "int".to_string(),
                got: other.type_name(),
            }),
        }
    }

    fn apply_binary_op(op: BinaryOp, left: Object, right: Object) -> Object {
        match (left, right) {
            (Object::Integer(a), Object::Integer(b)) => match op {
                BinaryOp::Add => Object::Integer(a + b),
                BinaryOp::Sub => Object::Integer(a - b),
                BinaryOp::Mul => Object::Integer(a * b),
                BinaryOp::Div => {
                    if b == 0 {
                        Object::error(Error::DivisionByZero)
                    } else {
                        Object::Integer(a / b)
                    }
                }
                BinaryOp::Lt => Object::Boolean(a < b),
                BinaryOp::Gt => Object::Boolean(a > b),
            },
            (left, right) => {
                let left_type = left.type_name();
                let right_type = right.type_name();
                if left_type == right_type {
                    Object::error(Error::UnknownOperator {
                        op: op.to_string(),
                        left_type,
                        right_type,
                    })
                } else {
                    Object::error(Error::TypeMismatch {
                        op: op.to_string(),
                        left_type,
                        right_type,
                    })
                }
            }
        }
    }

    fn eval_call(&mut self, name: &str, args: &[Expression]) -> Object {
        let mut evaluated = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.eval_expression(arg);
            if value.is_error() {
                return value;
            }
            evaluated.push(value);
        }

        let callee = match self.env.get(name) {
            Ok(value) => value,
            Err(error) => return Object::error(error),
        };

        let (params, body, closure) = match callee {
            Object::Function {
                params,
                body,
                closure,
                ..
            } => (params, body, closure),
            other => {
                return Object::error(Error::NotCallable {
                    type_name: other.type_name(),
                })
            }
        };

        if params.len() != evaluated.len() {
            return Object::error(Error::InvalidArguments {
                name: name.to_string(),
                expected: params.len(),
                got: evaluated.len(),
            });
        }

        // One child scope per call, seeded with the declaration-time
        // bindings and then the parameters.
        self.env.enter_scope();
        for (key, value) in closure.iter() {
            self.env.define(key.clone(), value.clone());
        }
        for (param, value) in params.iter().zip(evaluated) {
            self.env.define(param.clone(), value);
        }
        let flow = self.run_sequence(&body);
        self.env.exit_scope();

        match flow {
            Flow::Return(value) => value,
            Flow::Normal(obj) if obj.is_error() => obj,
            // Falling off the end of a body yields null.
            Flow::Normal(_) => Object::Null,
        }
    }
}
