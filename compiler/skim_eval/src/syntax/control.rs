//! `quote`, `if`, `begin`, `cond`, `and`, `or`.

use skim_runtime::errors::bad_syntax;
use skim_runtime::{Environment, EvalError, Executor, SyntaxOutcome, Value};

use super::{operands, sequence};

type Outcome = Result<SyntaxOutcome, EvalError>;

pub(super) fn quote(_exec: &mut dyn Executor, args: &Value, _env: &Environment) -> Outcome {
    match operands("quote", args)?.as_slice() {
        [datum] => Ok(SyntaxOutcome::Value(datum.clone())),
        _ => Err(bad_syntax("quote", "expected exactly one datum")),
    }
}

/// `(if test then [else])`. Only `#f` is false.
pub(super) fn if_form(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let items = operands("if", args)?;
    let (test, then, otherwise) = match items.as_slice() {
        [test, then] => (test, then, None),
        [test, then, otherwise] => (test, then, Some(otherwise)),
        _ => return Err(bad_syntax("if", "expected (if test then [else])")),
    };

    let branch = if exec.eval(test, env)?.is_true() {
        Some(then)
    } else {
        otherwise
    };
    Ok(match branch {
        Some(expr) => SyntaxOutcome::Tail {
            expr: expr.clone(),
            env: env.clone(),
        },
        None => SyntaxOutcome::Value(Value::Unspecified),
    })
}

pub(super) fn begin(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let body = operands("begin", args)?;
    sequence(exec, &body, env.clone())
}

/// `(cond (test body...)... [(else body...)])`.
pub(super) fn cond(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let clauses = operands("cond", args)?;
    let else_symbol = exec.intern("else")?;

    for (index, clause) in clauses.iter().enumerate() {
        let clause = clause
            .to_vec()
            .map_err(|_| bad_syntax("cond", format!("clause must be a list: {clause}")))?;
        let Some((test, body)) = clause.split_first() else {
            return Err(bad_syntax("cond", "empty clause"));
        };

        if test.as_symbol().is_some_and(|s| s.ptr_eq(&else_symbol)) {
            if index + 1 != clauses.len() {
                return Err(bad_syntax("cond", "else clause must be last"));
            }
            if body.is_empty() {
                return Err(bad_syntax("cond", "else clause needs a body"));
            }
            return sequence(exec, body, env.clone());
        }

        let value = exec.eval(test, env)?;
        if value.is_true() {
            if body.is_empty() {
                return Ok(SyntaxOutcome::Value(value));
            }
            return sequence(exec, body, env.clone());
        }
    }

    Ok(SyntaxOutcome::Value(Value::Unspecified))
}

/// `(and e...)`: the first false value, else the last value; `(and)` is `#t`.
pub(super) fn and(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let items = operands("and", args)?;
    let Some((last, init)) = items.split_last() else {
        return Ok(SyntaxOutcome::Value(Value::Bool(true)));
    };
    for expr in init {
        let value = exec.eval(expr, env)?;
        if !value.is_true() {
            return Ok(SyntaxOutcome::Value(value));
        }
    }
    Ok(SyntaxOutcome::Tail {
        expr: last.clone(),
        env: env.clone(),
    })
}

/// `(or e...)`: the first true value, else the last value; `(or)` is `#f`.
pub(super) fn or(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let items = operands("or", args)?;
    let Some((last, init)) = items.split_last() else {
        return Ok(SyntaxOutcome::Value(Value::Bool(false)));
    };
    for expr in init {
        let value = exec.eval(expr, env)?;
        if value.is_true() {
            return Ok(SyntaxOutcome::Value(value));
        }
    }
    Ok(SyntaxOutcome::Tail {
        expr: last.clone(),
        env: env.clone(),
    })
}
