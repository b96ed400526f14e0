use super::*;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;
use skim_ir::SymbolTable;

fn interpreter() -> Interpreter {
    InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .build()
        .unwrap()
}

fn eval(interp: &mut Interpreter, source: &str) -> String {
    interp.eval_source(source).unwrap().to_string()
}

/// Returns its arguments as a list, exposing the order it received them in.
fn probe(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::list(args.iter().cloned()))
}

fn always_fails(_exec: &mut dyn Executor, _args: &[Value]) -> EvalResult {
    Err(EvalError::new("probe failure"))
}

// === Self-evaluation and lookup ===

#[test]
fn test_atoms_evaluate_to_themselves() {
    let mut interp = interpreter();
    assert_eq!(eval(&mut interp, "42"), "42");
    assert_eq!(eval(&mut interp, "2.5"), "2.5");
    assert_eq!(eval(&mut interp, "\"hi\""), "\"hi\"");
    assert_eq!(eval(&mut interp, "#t"), "#t");
}

#[test]
fn test_empty_source_is_unspecified() {
    let mut interp = interpreter();
    assert!(interp.eval_source("  ; nothing here\n").unwrap().is_unspecified());
}

#[test]
fn test_symbol_lookup() {
    let mut interp = interpreter();
    interp.define_global("answer", Value::int(42)).unwrap();
    assert_eq!(eval(&mut interp, "answer"), "42");
}

#[test]
fn test_unbound_variable() {
    let mut interp = interpreter();
    let err = interp.eval_source("nope").unwrap_err();
    assert_eq!(err.message, "unbound variable: nope");
    assert!(!err.is_fatal());
}

#[test]
fn test_evaluate_with_explicit_environment() {
    let mut interp = interpreter();
    let x = interp.symbols().get_or_add("x").unwrap();
    let local = interp.global().child();
    local.define(x.clone(), Value::int(7));

    let value = interp.evaluate(&Value::symbol(x), &local).unwrap();
    assert_eq!(value, Value::int(7));
}

// === Application dispatch ===

#[test]
fn test_builtin_consumes_exactly_its_arguments() {
    let mut interp = interpreter();
    assert_eq!(eval(&mut interp, "(+ 1 2)"), "3");
    assert!(interp.call_stack().is_empty());
    assert_eq!(interp.call_stack().peak(), 2);
}

#[test]
fn test_builtin_receives_arguments_in_source_order() {
    let mut interp = interpreter();
    interp
        .register_builtin("probe", Arity::AtLeast(0), probe)
        .unwrap();
    assert_eq!(eval(&mut interp, "(probe 1 2 3)"), "'(1 2 3)");
    assert_eq!(eval(&mut interp, "(probe)"), "'()");
}

#[test]
fn test_nested_builtin_calls_share_the_stack() {
    let mut interp = interpreter();
    interp
        .register_builtin("probe", Arity::AtLeast(0), probe)
        .unwrap();
    assert_eq!(eval(&mut interp, "(probe 1 (probe 2 3))"), "'(1 (2 3))");
    assert!(interp.call_stack().is_empty());
    // 1 stays pushed while 2 and 3 are evaluated.
    assert_eq!(interp.call_stack().peak(), 3);
}

#[test]
fn test_head_is_evaluated() {
    let mut interp = interpreter();
    assert_eq!(eval(&mut interp, "((if #t + *) 2 3)"), "5");
    assert_eq!(eval(&mut interp, "((lambda (x) (* x x)) 4)"), "16");
}

#[test]
fn test_unbound_head_is_not_a_procedure() {
    let mut interp = interpreter();
    let err = interp.eval_source("(foo 1 2)").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NotAProcedure { ref expr } if expr == "foo"));
    assert_eq!(
        err.message,
        "application: not a procedure [expected: procedure that can be applied to arguments, given: foo]"
    );
    assert_eq!(err.notes, vec!["unbound variable: foo".to_string()]);
}

#[test]
fn test_non_procedure_head_names_unevaluated_expression() {
    let mut interp = interpreter();
    eval(&mut interp, "(define five 5)");
    let err = interp.eval_source("(five 1)").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NotAProcedure { ref expr } if expr == "five"));

    let err = interp.eval_source("(1 2)").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NotAProcedure { ref expr } if expr == "1"));
}

#[test]
fn test_improper_operand_list() {
    let mut interp = interpreter();
    let err = interp.eval_source("(+ 1 . 2)").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::BadSyntax { ref form, .. } if form == "application"));
    assert!(interp.call_stack().is_empty());

    let err = interp.eval_source("((lambda x x) 1 . 2)").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::BadSyntax { .. }));
}

#[test]
fn test_builtin_arity_checked_before_call() {
    let mut interp = interpreter();
    let err = interp.eval_source("(car 1 2)").unwrap_err();
    assert_eq!(err.message, "car: arity mismatch: expected 1 argument, got 2");
    assert!(interp.call_stack().is_empty());
}

#[test]
fn test_lambda_arity() {
    let mut interp = interpreter();
    eval(&mut interp, "(define (pair-up a b) (cons a b))");
    let err = interp.eval_source("(pair-up 1)").unwrap_err();
    assert_eq!(
        err.message,
        "pair-up: arity mismatch: expected 2 arguments, got 1"
    );
}

// === Call stack hygiene ===

#[test]
fn test_call_stack_empty_after_argument_failure() {
    let mut interp = interpreter();
    let err = interp.eval_source("(+ 1 2 (car 5) 4)").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    assert!(interp.call_stack().is_empty());
}

#[test]
fn test_call_stack_empty_after_builtin_failure() {
    let mut interp = interpreter();
    interp
        .register_builtin("fail", Arity::AtLeast(0), always_fails)
        .unwrap();
    let err = interp.eval_source("(list 1 (fail 2 3))").unwrap_err();
    assert_eq!(err.message, "probe failure");
    assert!(interp.call_stack().is_empty());
}

#[test]
fn test_interpreter_usable_after_error() {
    let mut interp = interpreter();
    eval(&mut interp, "(define x 1)");
    assert!(interp.eval_source("(set! x (car '()))").is_err());
    assert_eq!(eval(&mut interp, "x"), "1");
    assert_eq!(eval(&mut interp, "(+ x 1)"), "2");
}

// === Tail calls and depth ===

#[test]
fn test_deep_tail_recursion_runs_in_constant_stack() {
    let mut interp = interpreter();
    eval(
        &mut interp,
        "(define (count-up n acc) (if (= n 0) acc (count-up (- n 1) (+ acc 1))))",
    );
    assert_eq!(eval(&mut interp, "(count-up 100000 0)"), "100000");
}

#[test]
fn test_tail_position_in_cond_and_begin() {
    let mut interp = interpreter();
    eval(
        &mut interp,
        "(define (spin n) (cond ((= n 0) 'done) (else (begin 1 (spin (- n 1))))))",
    );
    assert_eq!(eval(&mut interp, "(spin 50000)"), "done");
}

#[test]
fn test_mutual_tail_recursion() {
    let mut interp = interpreter();
    eval(
        &mut interp,
        "(define (even? n) (if (= n 0) #t (odd? (- n 1))))
         (define (odd? n) (if (= n 0) #f (even? (- n 1))))",
    );
    assert_eq!(eval(&mut interp, "(even? 20001)"), "#f");
}

#[test]
fn test_recursion_limit() {
    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .max_depth(Some(100))
        .build()
        .unwrap();
    eval(
        &mut interp,
        "(define (down n) (if (= n 0) 0 (+ 1 (down (- n 1)))))",
    );

    let err = interp.eval_source("(down 1000)").unwrap_err();
    assert_eq!(err.message, "maximum recursion depth exceeded (limit: 100)");
    assert!(interp.call_stack().is_empty());

    // Depth is restored, so shallow calls still work.
    assert_eq!(eval(&mut interp, "(down 10)"), "10");
}

#[test]
fn test_deep_non_tail_recursion_without_limit() {
    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .max_depth(None)
        .build()
        .unwrap();
    eval(
        &mut interp,
        "(define (down n) (if (= n 0) 0 (+ 1 (down (- n 1)))))",
    );
    assert_eq!(eval(&mut interp, "(down 20000)"), "20000");
}

// === Builder and configuration ===

#[test]
fn test_without_stdlib() {
    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .without_stdlib()
        .build()
        .unwrap();
    assert_eq!(eval(&mut interp, "7"), "7");
    assert!(interp.eval_source("(+ 1 2)").is_err());
}

#[test]
fn test_shared_symbol_table() {
    let symbols = SharedSymbolTable::default();
    let mut interp = InterpreterBuilder::new()
        .symbols(symbols.clone())
        .print_handler(buffer_handler())
        .build()
        .unwrap();

    let value = interp.eval_source("'shared").unwrap();
    let symbol = symbols.lookup("shared").unwrap();
    assert!(value.as_symbol().unwrap().ptr_eq(&symbol));
    assert_eq!(eval(&mut interp, "(eq? 'shared (string->symbol \"shared\"))"), "#t");
}

#[test]
fn test_symbol_table_exhaustion_is_fatal() {
    let tiny = SharedSymbolTable::new(SymbolTable::with_capacity(3).with_max_capacity(3));
    let err = InterpreterBuilder::new()
        .symbols(tiny)
        .print_handler(buffer_handler())
        .build()
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err.kind, EvalErrorKind::SymbolTableFull { .. }));
}

#[test]
fn test_profile_counters() {
    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .profile(true)
        .build()
        .unwrap();
    eval(&mut interp, "(+ 1 2)");

    let counters = interp.counters().unwrap();
    assert_eq!(counters.builtin_calls, 1);
    assert_eq!(counters.peak_call_stack, 2);
    assert!(counters.expressions_evaluated >= 4);
    assert!(interpreter().counters().is_none());
}

#[test]
fn test_output_goes_to_print_handler() {
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .print_handler(handler.clone())
        .build()
        .unwrap();
    eval(&mut interp, "(display \"hi\") (newline) (display 42)");
    assert_eq!(handler.output(), "hi\n42");
}

#[test]
fn test_executor_call_applies_procedures() {
    let mut interp = interpreter();
    let square = interp.eval_source("(lambda (x) (* x x))").unwrap();
    assert_eq!(interp.call(&square, vec![Value::int(9)]).unwrap(), Value::int(81));

    let plus = interp.eval_source("+").unwrap();
    assert_eq!(
        interp.call(&plus, vec![Value::int(1), Value::int(2)]).unwrap(),
        Value::int(3)
    );
    assert!(interp.call(&Value::int(1), Vec::new()).is_err());
}
