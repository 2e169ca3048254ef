use super::ast::{BinaryOp, Expression, Precedence, Program, Statement, UnaryOp};
use crate::error::{Error, Result};
use crate::lexer::{Scanner, Token, TokenKind};

/// Recursive-descent parser for Rill
///
/// Pulls tokens from the [`Scanner`] on demand with a one-token window and
/// builds one AST node per statement, climbing [`Precedence`] levels for
/// expressions. A malformed statement is recorded in [`Parser::errors`] and
/// skipped; parsing resumes at the next statement boundary.
pub struct Parser {
    scanner: Scanner,
    current: Token,
    errors: Vec<Error>,
}

impl Parser {
    /// Creates a parser over the given scanner
    pub fn new(scanner: Scanner) -> Self {
        let mut parser = Parser {
            scanner,
            current: Token::new(TokenKind::Eof, String::new(), 1, 1),
            errors: Vec::new(),
        };
        parser.bump();
        parser
    }

    /// Parses the whole token stream into a program
    ///
    /// Never fails as a whole: errors are recorded per statement and the
    /// offending statement is skipped.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        loop {
            self.skip_separators();
            if self.current.kind == TokenKind::Eof {
                break;
            }
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }

        Program { statements }
    }

    /// Errors recorded while parsing, in source order
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Takes ownership of the recorded errors, leaving the list empty
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    // Statements

    fn parse_statement(&mut self) -> Result<Statement> {
        let statement = match self.current.kind {
            TokenKind::Let => self.parse_let()?,
            TokenKind::Printline => self.parse_print()?,
            TokenKind::If => self.parse_if()?,
            TokenKind::Func => self.parse_function_decl()?,
            TokenKind::Return => {
                self.advance()?;
                Statement::Return(self.parse_expression(Precedence::Lowest)?)
            }
            TokenKind::LeftBrace => Statement::Block(self.parse_block()?),
            _ => Statement::Expression(self.parse_expression(Precedence::Lowest)?),
        };

        // Brace-terminated statements end themselves; the rest must stop at
        // a statement boundary.
        if !matches!(
            statement,
            Statement::If { .. } | Statement::FunctionDecl { .. } | Statement::Block(_)
        ) {
            self.expect_statement_end()?;
        }
        Ok(statement)
    }

    fn parse_let(&mut self) -> Result<Statement> {
        self.advance()?; // let

        let name = self.expect_identifier()?;

        // Optional type annotation, accepted and stored but not checked.
        let type_hint = if self.current.kind == TokenKind::Colon {
            self.advance()?;
            Some(self.expect_identifier()?)
        } else {
            None
        };

        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression(Precedence::Lowest)?;

        Ok(Statement::Let {
            name,
            type_hint,
            value,
        })
    }

    fn parse_print(&mut self) -> Result<Statement> {
        self.advance()?; // printline
        self.expect(TokenKind::LeftParen)?;
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenKind::RightParen)?;
        Ok(Statement::Print(expr))
    }

    fn parse_if(&mut self) -> Result<Statement> {
        self.advance()?; // if
        self.expect(TokenKind::LeftParen)?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenKind::RightParen)?;

        self.skip_newlines();
        let then_branch = self.parse_block()?;

        // Newlines before a trailing else are separators either way.
        self.skip_newlines();
        let else_branch = if self.current.kind == TokenKind::Else {
            self.advance()?;
            self.skip_newlines();
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_function_decl(&mut self) -> Result<Statement> {
        self.advance()?; // func

        let name = self.expect_identifier()?;
        self.expect(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if self.current.kind != TokenKind::RightParen {
            loop {
                params.push(self.expect_identifier()?);
                if self.current.kind == TokenKind::Comma {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;

        self.skip_newlines();
        let body = self.parse_block()?;

        Ok(Statement::FunctionDecl { name, params, body })
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>> {
        self.expect(TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        loop {
            self.skip_separators();
            match self.current.kind {
                TokenKind::RightBrace => {
                    self.advance()?;
                    return Ok(statements);
                }
                TokenKind::Eof => return Err(Error::UnexpectedEof),
                _ => statements.push(self.parse_statement()?),
            }
        }
    }

    // Expressions, by precedence climbing

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let mut left = self.parse_prefix()?;

        while precedence < self.current_precedence() {
            let op = match Self::binary_op(&self.current.kind) {
                Some(op) => op,
                None => break,
            };
            self.advance()?;
            let right = self.parse_expression(op.precedence())?;
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expression> {
        match self.current.kind.clone() {
            TokenKind::Integer(n) => {
                self.advance()?;
                Ok(Expression::IntegerLiteral(n))
            }
            TokenKind::Str(s) => {
                self.advance()?;
                Ok(Expression::StringLiteral(s))
            }
            TokenKind::Identifier(name) => {
                self.advance()?;
                if self.current.kind == TokenKind::LeftParen {
                    self.parse_call(name)
                } else {
                    Ok(Expression::Identifier(name))
                }
            }
            TokenKind::Minus => {
                self.advance()?;
                let operand = self.parse_expression(Precedence::Unary)?;
                Ok(Expression::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                })
            }
            TokenKind::LeftParen => {
                self.advance()?;
                let expr = self.parse_expression(Precedence::Lowest)?;
                self.expect(TokenKind::RightParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_call(&mut self, name: String) -> Result<Expression> {
        self.expect(TokenKind::LeftParen)?;

        let mut args = Vec::new();
        if self.current.kind != TokenKind::RightParen {
            loop {
                args.push(self.parse_expression(Precedence::Lowest)?);
                if self.current.kind == TokenKind::Comma {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;

        Ok(Expression::Call { name, args })
    }

    fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Gt => Some(BinaryOp::Gt),
            _ => None,
        }
    }

    fn current_precedence(&self) -> Precedence {
        Self::binary_op(&self.current.kind)
            .map(|op| op.precedence())
            .unwrap_or(Precedence::Lowest)
    }

    // Token plumbing

    /// Consumes the current token if its kind matches, otherwise reports
    /// what was expected
    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        if self.current.kind == expected {
            let token = self.current.clone();
            self.advance()?;
            Ok(token)
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.current.kind.clone() {
            TokenKind::Identifier(name) => {
                self.advance()?;
                Ok(name)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// Every statement ends at a newline, a semicolon, a closing brace, or
    /// the end of input. The terminator itself is left for the caller.
    fn expect_statement_end(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline
            | TokenKind::Semicolon
            | TokenKind::RightBrace
            | TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of statement")),
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        if self.current.kind == TokenKind::Eof {
            Error::UnexpectedEof
        } else {
            Error::UnexpectedToken {
                expected: expected.to_string(),
                got: self.current.kind.to_string(),
                line: self.current.line,
                column: self.current.column,
            }
        }
    }

    /// Advances the one-token window. A lexer error is surfaced to the
    /// caller after the window is refilled with the next clean token, so
    /// recovery can keep going.
    fn advance(&mut self) -> Result<()> {
        match self.scanner.next_token() {
            Ok(token) => {
                self.current = token;
                Ok(())
            }
            Err(error) => {
                loop {
                    match self.scanner.next_token() {
                        Ok(token) => {
                            self.current = token;
                            break;
                        }
                        Err(_) => continue,
                    }
                }
                Err(error)
            }
        }
    }

    /// Advances, recording rather than returning any lexer error
    fn bump(&mut self) {
        if let Err(error) = self.advance() {
            self.errors.push(error);
        }
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.current.kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.bump();
        }
    }

    fn skip_newlines(&mut self) {
        while self.current.kind == TokenKind::Newline {
            self.bump();
        }
    }

    /// Skips tokens until the next top-level statement boundary, tracking
    /// brace depth so a malformed block is discarded as one statement
    fn synchronize(&mut self) {
        tracing::debug!("parser recovery: skipping to next statement boundary");
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => depth = depth.saturating_sub(1),
                TokenKind::Newline | TokenKind::Semicolon if depth == 0 => {
                    let _ = self.advance();
                    return;
                }
                _ => {}
            }
            let _ = self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Program, Vec<Error>) {
        let mut parser = Parser::new(Scanner::new(source));
        let program = parser.parse_program();
        let errors = parser.take_errors();
        (program, errors)
    }

    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        program
    }

    fn int(n: i64) -> Expression {
        Expression::IntegerLiteral(n)
    }

    fn binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_let_statement() {
        let program = parse_ok("let x = 5");
        assert_eq!(
            program.statements,
            vec![Statement::Let {
                name: "x".to_string(),
                type_hint: None,
                value: int(5),
            }]
        );
    }

    #[test]
    fn test_let_with_type_hint() {
        let program = parse_ok("let x: int = 5");
        assert_eq!(
            program.statements,
            vec![Statement::Let {
                name: "x".to_string(),
                type_hint: Some("int".to_string()),
                value: int(5),
            }]
        );
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let program = parse_ok("2 + 3 * 4");
        assert_eq!(
            program.statements,
            vec![Statement::Expression(binary(
                BinaryOp::Add,
                int(2),
                binary(BinaryOp::Mul, int(3), int(4)),
            ))]
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let program = parse_ok("(2 + 3) * 4");
        assert_eq!(
            program.statements,
            vec![Statement::Expression(binary(
                BinaryOp::Mul,
                binary(BinaryOp::Add, int(2), int(3)),
                int(4),
            ))]
        );
    }

    #[test]
    fn test_left_associativity() {
        let program = parse_ok("10 - 3 - 2");
        assert_eq!(
            program.statements,
            vec![Statement::Expression(binary(
                BinaryOp::Sub,
                binary(BinaryOp::Sub, int(10), int(3)),
                int(2),
            ))]
        );
    }

    #[test]
    fn test_comparison_binds_loosest() {
        let program = parse_ok("1 + 2 < 3 * 4");
        assert_eq!(
            program.statements,
            vec![Statement::Expression(binary(
                BinaryOp::Lt,
                binary(BinaryOp::Add, int(1), int(2)),
                binary(BinaryOp::Mul, int(3), int(4)),
            ))]
        );
    }

    #[test]
    fn test_unary_minus() {
        let program = parse_ok("-5 + 3");
        assert_eq!(
            program.statements,
            vec![Statement::Expression(binary(
                BinaryOp::Add,
                Expression::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(int(5)),
                },
                int(3),
            ))]
        );
    }

    #[test]
    fn test_print_statement() {
        let program = parse_ok("printline(1 + 2)");
        assert_eq!(
            program.statements,
            vec![Statement::Print(binary(BinaryOp::Add, int(1), int(2)))]
        );
    }

    #[test]
    fn test_if_else() {
        let program = parse_ok("if (x < 3) { let a = 1 } else { let a = 2 }");
        match &program.statements[0] {
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                assert_eq!(
                    *condition,
                    binary(
                        BinaryOp::Lt,
                        Expression::Identifier("x".to_string()),
                        int(3)
                    )
                );
                assert_eq!(then_branch.len(), 1);
                assert_eq!(else_branch.as_ref().unwrap().len(), 1);
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else() {
        let program = parse_ok("if (x > 0) { printline(x) }");
        match &program.statements[0] {
            Statement::If { else_branch, .. } => assert!(else_branch.is_none()),
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_function_declaration() {
        let program = parse_ok("func add(a, b) { return a + b }");
        assert_eq!(
            program.statements,
            vec![Statement::FunctionDecl {
                name: "add".to_string(),
                params: vec!["a".to_string(), "b".to_string()],
                body: vec![Statement::Return(binary(
                    BinaryOp::Add,
                    Expression::Identifier("a".to_string()),
                    Expression::Identifier("b".to_string()),
                ))],
            }]
        );
    }

    #[test]
    fn test_call_expression() {
        let program = parse_ok("add(1, 2 * 3)");
        assert_eq!(
            program.statements,
            vec![Statement::Expression(Expression::Call {
                name: "add".to_string(),
                args: vec![int(1), binary(BinaryOp::Mul, int(2), int(3))],
            })]
        );
    }

    #[test]
    fn test_standalone_block() {
        let program = parse_ok("{ let a = 1; a }");
        assert_eq!(
            program.statements,
            vec![Statement::Block(vec![
                Statement::Let {
                    name: "a".to_string(),
                    type_hint: None,
                    value: int(1),
                },
                Statement::Expression(Expression::Identifier("a".to_string())),
            ])]
        );
    }

    #[test]
    fn test_multiline_program() {
        let program = parse_ok("let x = 1\nlet y = 2\nx + y");
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn test_recovery_keeps_later_statements() {
        let (program, errors) = parse("let x = 1\nlet = 2\nlet z = 3");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], Error::UnexpectedToken { .. }));
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(
            program.statements[1],
            Statement::Let { ref name, .. } if name == "z"
        ));
    }

    #[test]
    fn test_recovery_from_lex_error() {
        let (program, errors) = parse("let x = @\nlet y = 2");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], Error::IllegalCharacter { .. }));
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_missing_statement_end() {
        let (program, errors) = parse("let x = 5 5");
        assert_eq!(program.statements.len(), 0);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_unterminated_block_is_eof_error() {
        let (_, errors) = parse("if (x > 0) { let a = 1");
        assert_eq!(errors, vec![Error::UnexpectedEof]);
    }
}
