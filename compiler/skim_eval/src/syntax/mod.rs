//! Built-in syntax forms.
//!
//! Each rule receives the unevaluated operand list and the current
//! environment. A rule whose value is the value of one of its
//! subexpressions returns [`SyntaxOutcome::Tail`] so the interpreter
//! evaluates that subexpression in its own loop.

mod binding;
mod control;

use skim_runtime::errors::bad_syntax;
use skim_runtime::{Environment, EvalError, Executor, SyntaxFn, SyntaxOutcome, Value};

use crate::Interpreter;

const FORMS: &[(&str, SyntaxFn)] = &[
    ("quote", control::quote),
    ("if", control::if_form),
    ("begin", control::begin),
    ("cond", control::cond),
    ("and", control::and),
    ("or", control::or),
    ("define", binding::define),
    ("set!", binding::set),
    ("lambda", binding::lambda),
    ("let", binding::let_form),
    ("let*", binding::let_star),
];

/// Bind every built-in syntax form in the interpreter's global environment.
pub fn register_all(interpreter: &mut Interpreter) -> Result<(), EvalError> {
    for &(name, rule) in FORMS {
        interpreter.register_syntax(name, rule)?;
    }
    Ok(())
}

/// The operands of `form` as a vector; an improper list is bad syntax.
fn operands(form: &str, operands: &Value) -> Result<Vec<Value>, EvalError> {
    operands
        .to_vec()
        .map_err(|_| bad_syntax(form, "operands must form a proper list"))
}

/// Evaluate all but the last of `body` and hand the last back as a tail
/// expression. An empty body is unspecified.
fn sequence(
    exec: &mut dyn Executor,
    body: &[Value],
    env: Environment,
) -> Result<SyntaxOutcome, EvalError> {
    let Some((last, init)) = body.split_last() else {
        return Ok(SyntaxOutcome::Value(Value::Unspecified));
    };
    for expr in init {
        exec.eval(expr, &env)?;
    }
    Ok(SyntaxOutcome::Tail {
        expr: last.clone(),
        env,
    })
}
