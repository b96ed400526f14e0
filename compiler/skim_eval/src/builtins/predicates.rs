//! Type predicates and equivalence.

use skim_runtime::errors::wrong_arg_type;
use skim_runtime::{Arity, EvalResult, Executor, Value};

use super::{fixed, Entry};

pub(super) const BUILTINS: &[Entry] = &[
    ("null?", Arity::Exact(1), is_null),
    ("pair?", Arity::Exact(1), is_pair),
    ("list?", Arity::Exact(1), is_list),
    ("symbol?", Arity::Exact(1), is_symbol),
    ("string?", Arity::Exact(1), is_string),
    ("number?", Arity::Exact(1), is_number),
    ("integer?", Arity::Exact(1), is_integer),
    ("boolean?", Arity::Exact(1), is_boolean),
    ("procedure?", Arity::Exact(1), is_procedure),
    ("zero?", Arity::Exact(1), is_zero),
    ("not", Arity::Exact(1), not),
    ("eq?", Arity::Exact(2), eq),
    ("equal?", Arity::Exact(2), equal),
];

/// Apply `check` to the single argument of predicate `name`.
fn predicate(name: &str, args: &[Value], check: fn(&Value) -> bool) -> EvalResult {
    let [value] = fixed::<1>(name, args)?;
    Ok(Value::Bool(check(value)))
}

fn is_null(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("null?", args, Value::is_null)
}

fn is_pair(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("pair?", args, Value::is_pair)
}

fn is_list(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("list?", args, Value::is_list)
}

fn is_symbol(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("symbol?", args, Value::is_symbol)
}

fn is_string(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("string?", args, |v| matches!(v, Value::Str(_)))
}

fn is_number(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("number?", args, Value::is_number)
}

/// Only exact integers; `2.0` is not an integer here.
fn is_integer(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("integer?", args, |v| matches!(v, Value::Int(_)))
}

fn is_boolean(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("boolean?", args, |v| matches!(v, Value::Bool(_)))
}

fn is_procedure(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("procedure?", args, Value::is_procedure)
}

fn is_zero(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [value] = fixed::<1>("zero?", args)?;
    match value {
        Value::Int(n) => Ok(Value::Bool(*n == 0)),
        Value::Float(f) => Ok(Value::Bool(*f == 0.0)),
        other => Err(wrong_arg_type("zero?", "number", other)),
    }
}

fn not(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    predicate("not", args, |v| !v.is_true())
}

fn eq(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [a, b] = fixed::<2>("eq?", args)?;
    Ok(Value::Bool(a.eqv(b)))
}

fn equal(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [a, b] = fixed::<2>("equal?", args)?;
    Ok(Value::Bool(a == b))
}
