//! Pair and list primitives.

use skim_runtime::errors::{integer_overflow, wrong_arg_type};
use skim_runtime::{Arity, EvalError, EvalResult, Executor, Pair, Value};

use super::{fixed, list_arg, not_a_list, Entry};

pub(super) const BUILTINS: &[Entry] = &[
    ("cons", Arity::Exact(2), cons),
    ("car", Arity::Exact(1), car),
    ("cdr", Arity::Exact(1), cdr),
    ("set-car!", Arity::Exact(2), set_car),
    ("set-cdr!", Arity::Exact(2), set_cdr),
    ("list", Arity::AtLeast(0), list),
    ("length", Arity::Exact(1), length),
    ("reverse", Arity::Exact(1), reverse),
    ("append", Arity::AtLeast(0), append),
];

fn pair_arg<'a>(procedure: &str, value: &'a Value) -> Result<&'a Pair, EvalError> {
    value
        .as_pair()
        .ok_or_else(|| wrong_arg_type(procedure, "pair", value))
}

fn cons(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [first, rest] = fixed::<2>("cons", args)?;
    Ok(Value::cons(first.clone(), rest.clone()))
}

fn car(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [pair] = fixed::<1>("car", args)?;
    Ok(pair_arg("car", pair)?.first())
}

fn cdr(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [pair] = fixed::<1>("cdr", args)?;
    Ok(pair_arg("cdr", pair)?.rest())
}

fn set_car(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [pair, value] = fixed::<2>("set-car!", args)?;
    pair_arg("set-car!", pair)?.set_first(value.clone());
    Ok(Value::Unspecified)
}

fn set_cdr(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [pair, value] = fixed::<2>("set-cdr!", args)?;
    pair_arg("set-cdr!", pair)?.set_rest(value.clone());
    Ok(Value::Unspecified)
}

fn list(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::list(args.iter().cloned()))
}

/// Rejects improper and cyclic lists.
fn length(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [list] = fixed::<1>("length", args)?;
    let len = list
        .list_length()
        .ok_or_else(|| not_a_list("length", list))?;
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| integer_overflow("length"))
}

fn reverse(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [list] = fixed::<1>("reverse", args)?;
    Ok(list_arg("reverse", list)?
        .into_iter()
        .fold(Value::Nil, |acc, item| Value::cons(item, acc)))
}

/// Copies every list but the last, which becomes the shared tail. The last
/// argument may be any value.
fn append(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let Some((tail, lists)) = args.split_last() else {
        return Ok(Value::Nil);
    };
    let mut items = Vec::new();
    for list in lists {
        items.extend(list_arg("append", list)?);
    }
    Ok(Value::list_with_tail(items, tail.clone()))
}
