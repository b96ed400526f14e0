//! Built-in procedures.
//!
//! Every built-in declares its arity in a registration table. The
//! interpreter checks the argument count before the call, so a body only
//! destructures what its arity already guarantees.

mod lists;
mod numeric;
mod output;
mod predicates;
mod strings;

use skim_runtime::errors::{arity_mismatch, type_mismatch};
use skim_runtime::{Arity, BuiltinFn, EvalError, EvalResult, Executor, Value};

use crate::Interpreter;

type Entry = (&'static str, Arity, BuiltinFn);

const PROCEDURES: &[Entry] = &[("apply", Arity::AtLeast(2), apply)];

/// Bind every built-in procedure in the interpreter's global environment.
pub fn register_all(interpreter: &mut Interpreter) -> Result<(), EvalError> {
    let tables: [&[Entry]; 6] = [
        numeric::BUILTINS,
        lists::BUILTINS,
        predicates::BUILTINS,
        strings::BUILTINS,
        output::BUILTINS,
        PROCEDURES,
    ];
    for &(name, arity, func) in tables.into_iter().flatten() {
        interpreter.register_builtin(name, arity, func)?;
    }
    Ok(())
}

/// View `args` as exactly `N` arguments.
fn fixed<'a, const N: usize>(name: &str, args: &'a [Value]) -> Result<&'a [Value; N], EvalError> {
    args.try_into()
        .map_err(|_| arity_mismatch(name, Arity::Exact(N), args.len()))
}

/// The elements of a proper, acyclic list argument.
fn list_arg(name: &str, value: &Value) -> Result<Vec<Value>, EvalError> {
    if value.list_length().is_none() {
        return Err(not_a_list(name, value));
    }
    value.to_vec()
}

/// The offending value is not printed: it may be cyclic.
#[cold]
fn not_a_list(name: &str, value: &Value) -> EvalError {
    type_mismatch("list", value).with_note(format!("in argument to {name}"))
}

/// `(apply proc arg... list)`.
fn apply(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [procedure, spread @ .., list] = args else {
        return Err(arity_mismatch("apply", Arity::AtLeast(2), args.len()));
    };
    let mut call_args = spread.to_vec();
    call_args.extend(list_arg("apply", list)?);
    exec.call(procedure, call_args)
}
