// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! REPL session tests: line accumulation, error recovery and fatal errors.

use pretty_assertions::assert_eq;
use skim_eval::{buffer_handler, EvalErrorKind, InterpreterBuilder};
use skimc::{Feed, Session};

fn session() -> Session {
    let interpreter = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .build()
        .expect("standard interpreter builds");
    Session::new(interpreter)
}

/// Printed results of a completed feed; errors print as `error: ...`.
fn printed(feed: Feed) -> Vec<String> {
    match feed {
        Feed::NeedMore => panic!("expected complete input"),
        Feed::Evaluated(results) => results
            .into_iter()
            .map(|result| match result {
                Ok(value) => value.to_string(),
                Err(err) => format!("error: {}", err.message),
            })
            .collect(),
    }
}

#[test]
fn test_single_line() {
    let mut session = session();
    assert_eq!(printed(session.feed("(+ 1 2)")), vec!["3"]);
    assert!(!session.is_pending());
}

#[test]
fn test_several_data_on_one_line() {
    let mut session = session();
    assert_eq!(
        printed(session.feed("(define x 4) (* x x)")),
        vec!["x", "16"]
    );
}

#[test]
fn test_multi_line_list() {
    let mut session = session();
    assert!(matches!(session.feed("(define (sq n)"), Feed::NeedMore));
    assert!(session.is_pending());
    assert_eq!(printed(session.feed("  (* n n))")), vec!["sq"]);
    assert_eq!(printed(session.feed("(sq 9)")), vec!["81"]);
}

#[test]
fn test_multi_line_string_keeps_newline() {
    let mut session = session();
    assert!(matches!(session.feed("(string-length \"ab"), Feed::NeedMore));
    assert_eq!(printed(session.feed("cd\")")), vec!["5"]);
}

#[test]
fn test_dangling_quote_waits() {
    let mut session = session();
    assert!(matches!(session.feed("'"), Feed::NeedMore));
    assert_eq!(printed(session.feed("sym")), vec!["sym"]);
}

#[test]
fn test_complete_datum_runs_before_unfinished_one() {
    let mut session = session();
    assert_eq!(printed(session.feed("(define a 1) (+ a")), vec!["a"]);
    assert!(session.is_pending());
    assert_eq!(printed(session.feed("  41)")), vec!["42"]);
    assert!(!session.is_pending());
}

#[test]
fn test_output_before_unfinished_datum_is_not_held_back() {
    let interpreter = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .build()
        .expect("standard interpreter builds");
    let output = interpreter.print_handler().clone();
    let mut session = Session::new(interpreter);

    assert_eq!(printed(session.feed("(display 1) (foo")), vec!["#<void>"]);
    assert_eq!(output.output(), "1");
    assert!(session.is_pending());
}

#[test]
fn test_comment_only_line() {
    let mut session = session();
    assert!(printed(session.feed("; just a comment")).is_empty());
    assert!(printed(session.feed("")).is_empty());
}

#[test]
fn test_error_stops_line_and_session_recovers() {
    let mut session = session();
    assert_eq!(
        printed(session.feed("(define y 1) (car y) (define z 2)")),
        vec!["y", "error: type mismatch: expected pair, got int"]
    );
    assert_eq!(printed(session.feed("y")), vec!["1"]);
    let err = match session.feed("z") {
        Feed::Evaluated(mut results) => results.pop().unwrap().unwrap_err(),
        Feed::NeedMore => panic!("expected complete input"),
    };
    assert!(matches!(err.kind, EvalErrorKind::UnboundVariable { .. }));
}

#[test]
fn test_read_error_discards_pending_input() {
    let mut session = session();
    assert_eq!(
        printed(session.feed(")")),
        vec!["error: read error: unexpected ')' (line 1)"]
    );
    assert!(!session.is_pending());
    assert_eq!(printed(session.feed("42")), vec!["42"]);
}

#[test]
fn test_reset_drops_partial_input() {
    let mut session = session();
    assert!(matches!(session.feed("(+ 1"), Feed::NeedMore));
    session.reset();
    assert_eq!(printed(session.feed("7")), vec!["7"]);
}

#[test]
fn test_call_stack_clean_between_lines() {
    let mut session = session();
    printed(session.feed("(+ 1 (car 2))"));
    assert!(session.interpreter().call_stack().is_empty());
}
