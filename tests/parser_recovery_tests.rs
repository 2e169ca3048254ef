/// Parser error recovery tests
///
/// A malformed statement is reported once and skipped; every other
/// statement still parses and executes, preserving environment state
/// established by earlier valid statements.
use rill::{Error, Evaluator, Parser, Scanner};

fn parse(source: &str) -> (rill::Program, Vec<Error>) {
    let mut parser = Parser::new(Scanner::new(source));
    let program = parser.parse_program();
    let errors = parser.take_errors();
    (program, errors)
}

#[test]
fn test_malformed_statement_reports_one_error() {
    let (program, errors) = parse("let x = 1\nlet = 2\nlet z = 3");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::UnexpectedToken { .. }));
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn test_later_statements_still_execute() {
    let (program, errors) = parse("let x = 1\nlet = oops\nprintline(x)");
    assert_eq!(errors.len(), 1);

    let mut evaluator = Evaluator::new();
    evaluator.execute(&program);
    // The binding from the first statement survived the malformed second.
    assert_eq!(evaluator.take_output(), vec!["1"]);
}

#[test]
fn test_each_bad_statement_gets_its_own_error() {
    let (program, errors) = parse("let = 1\nlet x = 2\nlet = 3");
    assert_eq!(errors.len(), 2);
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_illegal_character_skips_only_its_statement() {
    let (program, errors) = parse("let a = 1 ~ 2\nlet b = 2");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::IllegalCharacter { ch: '~', .. }));
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_unterminated_string_is_reported() {
    let (_, errors) = parse("let s = \"oops\nlet t = 1");
    assert!(errors
        .iter()
        .any(|e| matches!(e, Error::UnterminatedString { .. })));
}

#[test]
fn test_malformed_block_discarded_as_one_statement() {
    let (program, errors) = parse("if (x > 0) { let = 1 }\nlet y = 2");
    assert_eq!(errors.len(), 1);
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(
        program.statements[0],
        rill::Statement::Let { ref name, .. } if name == "y"
    ));
}

#[test]
fn test_error_positions_point_at_the_mismatch() {
    let (_, errors) = parse("let x 5");
    match &errors[0] {
        Error::UnexpectedToken {
            expected,
            got,
            line,
            column,
        } => {
            assert_eq!(expected, "=");
            assert_eq!(got, "5");
            assert_eq!((*line, *column), (1, 7));
        }
        other => panic!("expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_recovery_never_loops_forever() {
    // Nothing but garbage still terminates with errors recorded.
    let (program, errors) = parse("= = =\n) ) )\n} } }");
    assert!(program.statements.is_empty());
    assert!(!errors.is_empty());
}
