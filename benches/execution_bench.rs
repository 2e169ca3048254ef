use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rill::{Evaluator, Parser, Scanner};

fn lexer_benchmark(c: &mut Criterion) {
    let source = r#"
        let x = 42
        let y = 10
        let result = x + y * 2
    "#;

    c.bench_function("tokenize simple program", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(source));
            scanner.scan_tokens().unwrap()
        })
    });
}

fn parser_benchmark(c: &mut Criterion) {
    let source = r#"
        let x = 42
        if (x > 10) {
            printline(x * 2)
        } else {
            printline(0)
        }
    "#;

    c.bench_function("parse simple program", |b| {
        b.iter(|| {
            let mut parser = Parser::new(Scanner::new(black_box(source)));
            parser.parse_program()
        })
    });
}

fn pipeline_benchmark(c: &mut Criterion) {
    let source = r#"
        func square(n) {
            return n * n
        }
        let total = square(3) + square(4)
        printline(total)
    "#;

    c.bench_function("execute simple program", |b| {
        b.iter(|| {
            let mut parser = Parser::new(Scanner::new(black_box(source)));
            let program = parser.parse_program();
            let mut evaluator = Evaluator::new();
            evaluator.execute(&program)
        })
    });
}

criterion_group!(benches, lexer_benchmark, parser_benchmark, pipeline_benchmark);
criterion_main!(benches);
