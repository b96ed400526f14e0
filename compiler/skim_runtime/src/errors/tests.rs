use super::*;
use pretty_assertions::assert_eq;
use skim_ir::SymbolTable;

#[test]
fn test_factory_messages() {
    assert_eq!(unbound_variable("x").message, "unbound variable: x");
    assert_eq!(division_by_zero().message, "division by zero");
    assert_eq!(integer_overflow("+").message, "integer overflow in +");
    assert_eq!(
        recursion_limit_exceeded(200).message,
        "maximum recursion depth exceeded (limit: 200)"
    );
    assert_eq!(
        bad_syntax("if", "expected 2 or 3 operands").message,
        "bad syntax in if: expected 2 or 3 operands"
    );
    assert_eq!(
        type_mismatch("pair", &Value::int(1)).message,
        "type mismatch: expected pair, got int"
    );
}

#[test]
fn test_not_a_procedure_names_expression() {
    let mut table = SymbolTable::new();
    let foo = Value::symbol(table.get_or_add("foo").unwrap());
    let err = not_a_procedure(&foo);

    assert_eq!(
        err.kind,
        EvalErrorKind::NotAProcedure {
            expr: "foo".to_string()
        }
    );
    assert!(err.message.contains("given: foo"));
}

#[test]
fn test_arity_messages() {
    assert_eq!(
        arity_mismatch("car", Arity::Exact(1), 2).message,
        "car: arity mismatch: expected 1 argument, got 2"
    );
    assert_eq!(
        arity_mismatch("", Arity::AtLeast(2), 0).message,
        "arity mismatch: expected at least 2 arguments, got 0"
    );
    assert_eq!(
        arity_mismatch("f", Arity::Range(1, 2), 3).message,
        "f: arity mismatch: expected 1 to 2 arguments, got 3"
    );
}

#[test]
fn test_only_symbol_table_errors_are_fatal() {
    let err: EvalError = SymbolTableError::CapacityExceeded { capacity: 3 }.into();
    assert!(err.is_fatal());
    assert!(err.message.starts_with("symbol table problem"));

    assert!(!unbound_variable("x").is_fatal());
    assert!(!internal_error("boom").is_fatal());
    assert!(!EvalError::new("custom").is_fatal());
}

#[test]
fn test_notes_are_displayed() {
    let err = EvalError::new("failed").with_note("while loading");
    assert_eq!(err.to_string(), "failed\n  note: while loading");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "failed".to_string()
        }
    );
}

#[test]
fn test_call_stack_underflow_is_internal() {
    let err = call_stack_underflow(3, 1);
    assert!(matches!(err.kind, EvalErrorKind::Internal { .. }));
    assert_eq!(
        err.message,
        "internal error: call stack underflow: 3 values requested, 1 available"
    );
}
