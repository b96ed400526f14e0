//! Output through the interpreter's print handler.

use skim_runtime::{Arity, EvalResult, Executor, Value};

use super::{fixed, Entry};

pub(super) const BUILTINS: &[Entry] = &[
    ("display", Arity::Exact(1), display),
    ("newline", Arity::Exact(0), newline),
];

/// Strings are written raw; everything else as it prints.
fn display(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [value] = fixed::<1>("display", args)?;
    exec.print(&value.display_string());
    Ok(Value::Unspecified)
}

fn newline(exec: &mut dyn Executor, _args: &[Value]) -> EvalResult {
    exec.print("\n");
    Ok(Value::Unspecified)
}
