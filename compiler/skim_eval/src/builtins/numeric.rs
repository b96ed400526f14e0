//! Arithmetic and numeric comparison.
//!
//! Integer arithmetic is checked. Any float operand makes the result a
//! float. Integer `/` stays an integer when the division is exact.

use skim_runtime::errors::{arity_mismatch, division_by_zero, integer_overflow, wrong_arg_type};
use skim_runtime::{Arity, EvalError, EvalResult, Executor, Value};
use std::cmp::Ordering;

use super::{fixed, Entry};

pub(super) const BUILTINS: &[Entry] = &[
    ("+", Arity::AtLeast(0), add),
    ("-", Arity::AtLeast(1), sub),
    ("*", Arity::AtLeast(0), mul),
    ("/", Arity::AtLeast(1), div),
    ("quotient", Arity::Exact(2), quotient),
    ("remainder", Arity::Exact(2), remainder),
    ("modulo", Arity::Exact(2), modulo),
    ("abs", Arity::Exact(1), abs),
    ("min", Arity::AtLeast(1), min),
    ("max", Arity::AtLeast(1), max),
    ("=", Arity::AtLeast(1), num_eq),
    ("<", Arity::AtLeast(1), num_lt),
    (">", Arity::AtLeast(1), num_gt),
    ("<=", Arity::AtLeast(1), num_le),
    (">=", Arity::AtLeast(1), num_ge),
];

#[derive(Clone, Copy, Debug)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn from_value(procedure: &str, value: &Value) -> Result<Self, EvalError> {
        match value {
            Value::Int(n) => Ok(Number::Int(*n)),
            Value::Float(f) => Ok(Number::Float(*f)),
            other => Err(wrong_arg_type(procedure, "number", other)),
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integer to float promotion is the arithmetic contract"
    )]
    fn to_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    fn into_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Int(n),
            Number::Float(f) => Value::Float(f),
        }
    }

    /// Numeric ordering; `None` when a NaN is involved.
    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

fn numbers(procedure: &str, args: &[Value]) -> Result<Vec<Number>, EvalError> {
    args.iter()
        .map(|arg| Number::from_value(procedure, arg))
        .collect()
}

/// Apply a binary operation with checked integer and plain float variants.
fn combine(
    operation: &str,
    a: Number,
    b: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Number, EvalError> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => int_op(x, y)
            .map(Number::Int)
            .ok_or_else(|| integer_overflow(operation)),
        _ => Ok(Number::Float(float_op(a.to_f64(), b.to_f64()))),
    }
}

fn fold(
    operation: &str,
    init: Number,
    args: &[Number],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Number, EvalError> {
    args.iter()
        .try_fold(init, |acc, &n| combine(operation, acc, n, int_op, float_op))
}

fn first_and_rest<'a>(
    procedure: &str,
    args: &'a [Number],
) -> Result<(Number, &'a [Number]), EvalError> {
    match args.split_first() {
        Some((&first, rest)) => Ok((first, rest)),
        None => Err(arity_mismatch(procedure, Arity::AtLeast(1), 0)),
    }
}

fn add(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let nums = numbers("+", args)?;
    fold("+", Number::Int(0), &nums, i64::checked_add, |a, b| a + b).map(Number::into_value)
}

fn mul(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let nums = numbers("*", args)?;
    fold("*", Number::Int(1), &nums, i64::checked_mul, |a, b| a * b).map(Number::into_value)
}

/// `(- x)` negates; `(- x y ...)` subtracts left to right.
fn sub(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let nums = numbers("-", args)?;
    let (first, rest) = first_and_rest("-", &nums)?;
    let result = if rest.is_empty() {
        combine("-", Number::Int(0), first, i64::checked_sub, |a, b| a - b)?
    } else {
        fold("-", first, rest, i64::checked_sub, |a, b| a - b)?
    };
    Ok(result.into_value())
}

/// `(/ x)` inverts; `(/ x y ...)` divides left to right.
fn div(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let nums = numbers("/", args)?;
    let (first, rest) = first_and_rest("/", &nums)?;
    let result = if rest.is_empty() {
        divide(Number::Int(1), first)?
    } else {
        rest.iter().try_fold(first, |acc, &n| divide(acc, n))?
    };
    Ok(result.into_value())
}

fn divide(a: Number, b: Number) -> Result<Number, EvalError> {
    match (a, b) {
        (_, Number::Int(0)) => Err(division_by_zero()),
        (Number::Int(x), Number::Int(y)) => match x.checked_rem(y) {
            Some(0) => x
                .checked_div(y)
                .map(Number::Int)
                .ok_or_else(|| integer_overflow("/")),
            Some(_) => Ok(Number::Float(a.to_f64() / b.to_f64())),
            None => Err(integer_overflow("/")),
        },
        _ => {
            let divisor = b.to_f64();
            if divisor == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Number::Float(a.to_f64() / divisor))
        }
    }
}

/// Both arguments of an integer-only operation, rejecting a zero divisor.
fn int_pair(procedure: &str, args: &[Value]) -> Result<(i64, i64), EvalError> {
    let [a, b] = fixed::<2>(procedure, args)?;
    let x = a.as_int().ok_or_else(|| wrong_arg_type(procedure, "int", a))?;
    let y = b.as_int().ok_or_else(|| wrong_arg_type(procedure, "int", b))?;
    if y == 0 {
        return Err(division_by_zero());
    }
    Ok((x, y))
}

/// Truncating division.
fn quotient(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let (x, y) = int_pair("quotient", args)?;
    x.checked_div(y)
        .map(Value::Int)
        .ok_or_else(|| integer_overflow("quotient"))
}

/// Remainder with the sign of the dividend.
fn remainder(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let (x, y) = int_pair("remainder", args)?;
    x.checked_rem(y)
        .map(Value::Int)
        .ok_or_else(|| integer_overflow("remainder"))
}

/// Remainder with the sign of the divisor.
fn modulo(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let (x, y) = int_pair("modulo", args)?;
    let r = x
        .checked_rem(y)
        .ok_or_else(|| integer_overflow("modulo"))?;
    Ok(Value::Int(if r != 0 && (r < 0) != (y < 0) { r + y } else { r }))
}

fn abs(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let [a] = fixed::<1>("abs", args)?;
    match Number::from_value("abs", a)? {
        Number::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("abs")),
        Number::Float(f) => Ok(Value::Float(f.abs())),
    }
}

/// Pick the argument that `wins` against every other. Any float argument
/// makes the result a float.
fn extremum(procedure: &str, args: &[Value], wins: Ordering) -> EvalResult {
    let nums = numbers(procedure, args)?;
    let (mut best, rest) = first_and_rest(procedure, &nums)?;
    let mut inexact = best.is_float();
    for &n in rest {
        inexact |= n.is_float();
        if n.compare(best) == Some(wins) {
            best = n;
        }
    }
    Ok(if inexact {
        Value::Float(best.to_f64())
    } else {
        best.into_value()
    })
}

fn min(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    extremum("min", args, Ordering::Less)
}

fn max(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    extremum("max", args, Ordering::Greater)
}

/// `#t` when `holds` is true for every adjacent pair. Every argument must be
/// a number, even after the chain has already failed.
fn chain(procedure: &str, args: &[Value], holds: fn(Ordering) -> bool) -> EvalResult {
    let nums = numbers(procedure, args)?;
    let ok = nums
        .windows(2)
        .all(|w| w[0].compare(w[1]).is_some_and(holds));
    Ok(Value::Bool(ok))
}

fn num_eq(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("=", args, Ordering::is_eq)
}

fn num_lt(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("<", args, Ordering::is_lt)
}

fn num_gt(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain(">", args, Ordering::is_gt)
}

fn num_le(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("<=", args, Ordering::is_le)
}

fn num_ge(_exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain(">=", args, Ordering::is_ge)
}
