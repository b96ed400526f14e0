//! String and symbol conversion.

use skim_runtime::errors::{integer_overflow, wrong_arg_type};
use skim_runtime::{Arity, EvalResult, Executor, Value};

use super::{fixed, Entry};

pub(super) const BUILTINS: &[Entry] = &[
    ("string-length", Arity::Exact(1), string_length),
    ("string-append", Arity::AtLeast(0), string_append),
    ("symbol->string", Arity::Exact(1), symbol_to_string),
    ("string->symbol", Arity::Exact(1), string_to_symbol),
    ("number->string", Arity::Exact(1), number_to_string),
];

/// Length in characters, not bytes.
fn string_length(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [s] = fixed::<1>("string-length", args)?;
    let text = s
        .as_str()
        .ok_or_else(|| wrong_arg_type("string-length", "string", s))?;
    i64::try_from(text.chars().count())
        .map(Value::Int)
        .map_err(|_| integer_overflow("string-length"))
}

fn string_append(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let mut out = String::new();
    for arg in args {
        let text = arg
            .as_str()
            .ok_or_else(|| wrong_arg_type("string-append", "string", arg))?;
        out.push_str(text);
    }
    Ok(Value::string(out))
}

fn symbol_to_string(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [s] = fixed::<1>("symbol->string", args)?;
    let symbol = s
        .as_symbol()
        .ok_or_else(|| wrong_arg_type("symbol->string", "symbol", s))?;
    Ok(Value::string(symbol.name()))
}

/// Interns through the interpreter's symbol table, so the result is `eq?`
/// to the same symbol read from source.
fn string_to_symbol(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [s] = fixed::<1>("string->symbol", args)?;
    let text = s
        .as_str()
        .ok_or_else(|| wrong_arg_type("string->symbol", "string", s))?;
    Ok(Value::symbol(exec.intern(text)?))
}

fn number_to_string(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [n] = fixed::<1>("number->string", args)?;
    if !n.is_number() {
        return Err(wrong_arg_type("number->string", "number", n));
    }
    Ok(Value::string(n.to_string()))
}
