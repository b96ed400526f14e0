//! `define`, `set!`, `lambda`, `let`, `let*`.

use rustc_hash::FxHashSet;
use skim_ir::Symbol;
use skim_runtime::errors::bad_syntax;
use skim_runtime::{Environment, EvalError, Executor, Formals, Lambda, SyntaxOutcome, Value};
use std::rc::Rc;

use super::{operands, sequence};

type Outcome = Result<SyntaxOutcome, EvalError>;

/// `(define name expr)` or `(define (name . formals) body...)`. The value
/// is the defined symbol.
pub(super) fn define(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let items = operands("define", args)?;
    let Some((target, rest)) = items.split_first() else {
        return Err(bad_syntax("define", "expected a name"));
    };

    let (name, value) = match target {
        Value::Symbol(name) => {
            let [expr] = rest else {
                return Err(bad_syntax(
                    "define",
                    format!("expected exactly one expression for {name}"),
                ));
            };
            let value = exec.eval(expr, env)?;
            (name.clone(), name_procedure(value, name))
        }
        Value::Pair(signature) => {
            let Value::Symbol(name) = signature.first() else {
                return Err(bad_syntax(
                    "define",
                    format!("procedure name must be a symbol: {}", signature.first()),
                ));
            };
            let lambda = make_lambda("define", Some(&name), &signature.rest(), rest, env)?;
            (name, Value::lambda(lambda))
        }
        other => return Err(bad_syntax("define", format!("cannot define {other}"))),
    };

    tracing::trace!(name = %name, "define");
    env.define(name.clone(), value);
    Ok(SyntaxOutcome::Value(Value::symbol(name)))
}

/// `(set! name expr)`: assign the nearest existing binding.
pub(super) fn set(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let items = operands("set!", args)?;
    let [target, expr] = items.as_slice() else {
        return Err(bad_syntax("set!", "expected (set! name expr)"));
    };
    let Value::Symbol(name) = target else {
        return Err(bad_syntax("set!", format!("not a variable: {target}")));
    };
    let value = exec.eval(expr, env)?;
    env.set(name, value)?;
    Ok(SyntaxOutcome::Value(Value::Unspecified))
}

/// `(lambda formals body...)`.
pub(super) fn lambda(_exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let items = operands("lambda", args)?;
    let Some((formals, body)) = items.split_first() else {
        return Err(bad_syntax("lambda", "expected formals and a body"));
    };
    let lambda = make_lambda("lambda", None, formals, body, env)?;
    Ok(SyntaxOutcome::Value(Value::lambda(lambda)))
}

/// `(let ((name init)...) body...)`: inits see the outer environment and
/// are bound together in one new frame.
pub(super) fn let_form(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let (bindings, body) = split_let("let", args)?;

    let mut seen = FxHashSet::default();
    let mut values = Vec::with_capacity(bindings.len());
    for (name, init) in &bindings {
        if !seen.insert(name.clone()) {
            return Err(bad_syntax("let", format!("duplicate binding: {name}")));
        }
        values.push(exec.eval(init, env)?);
    }

    let frame = env.child();
    for ((name, _), value) in bindings.into_iter().zip(values) {
        frame.define(name, value);
    }
    sequence(exec, &body, frame)
}

/// `(let* ((name init)...) body...)`: each init sees the bindings before it.
pub(super) fn let_star(exec: &mut dyn Executor, args: &Value, env: &Environment) -> Outcome {
    let (bindings, body) = split_let("let*", args)?;

    let mut scope = env.clone();
    for (name, init) in bindings {
        let value = exec.eval(&init, &scope)?;
        scope = scope.child();
        scope.define(name, value);
    }
    // Body definitions must not land in the enclosing frame.
    if scope.ptr_eq(env) {
        scope = env.child();
    }
    sequence(exec, &body, scope)
}

/// Split a `let`-family form into `(name, init)` pairs and a non-empty body.
fn split_let(form: &str, args: &Value) -> Result<(Vec<(Symbol, Value)>, Vec<Value>), EvalError> {
    let items = operands(form, args)?;
    let Some((bindings, body)) = items.split_first() else {
        return Err(bad_syntax(form, "expected bindings and a body"));
    };
    if body.is_empty() {
        return Err(bad_syntax(form, "empty body"));
    }

    let bindings = bindings
        .to_vec()
        .map_err(|_| bad_syntax(form, "bindings must form a proper list"))?
        .iter()
        .map(|binding| match binding.to_vec().as_deref() {
            Ok([Value::Symbol(name), init]) => Ok((name.clone(), init.clone())),
            _ => Err(bad_syntax(
                form,
                format!("binding must be (name expr): {binding}"),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((bindings, body.to_vec()))
}

/// Build a closure over `env`.
fn make_lambda(
    form: &str,
    name: Option<&Symbol>,
    formals: &Value,
    body: &[Value],
    env: &Environment,
) -> Result<Lambda, EvalError> {
    if body.is_empty() {
        return Err(bad_syntax(form, "empty body"));
    }
    Ok(Lambda {
        name: name.map(|n| n.name().to_string()),
        formals: parse_formals(form, formals)?,
        body: body.to_vec(),
        env: env.clone(),
    })
}

/// A proper list of symbols, a dotted list ending in a symbol, or a lone
/// symbol. Names must be distinct.
fn parse_formals(form: &str, formals: &Value) -> Result<Formals, EvalError> {
    let mut fixed = Vec::new();
    let mut seen = FxHashSet::default();
    let mut check = |symbol: &Symbol| {
        if seen.insert(symbol.clone()) {
            Ok(())
        } else {
            Err(bad_syntax(form, format!("duplicate parameter: {symbol}")))
        }
    };

    let mut rest = formals.clone();
    loop {
        match rest {
            Value::Nil => return Ok(Formals::Fixed(fixed)),
            Value::Symbol(symbol) => {
                check(&symbol)?;
                return Ok(Formals::Variadic {
                    fixed,
                    rest: symbol,
                });
            }
            Value::Pair(pair) => {
                let Value::Symbol(symbol) = pair.first() else {
                    return Err(bad_syntax(
                        form,
                        format!("parameter must be a symbol: {}", pair.first()),
                    ));
                };
                check(&symbol)?;
                fixed.push(symbol);
                rest = pair.rest();
            }
            other => {
                return Err(bad_syntax(
                    form,
                    format!("parameter must be a symbol: {other}"),
                ))
            }
        }
    }
}

/// Give an anonymous procedure the name it is being defined under. A
/// procedure already shared elsewhere keeps its identity.
fn name_procedure(value: Value, name: &Symbol) -> Value {
    match value {
        Value::Lambda(lambda) if lambda.name.is_none() => match Rc::try_unwrap(lambda) {
            Ok(mut owned) => {
                owned.name = Some(name.name().to_string());
                Value::lambda(owned)
            }
            Err(shared) => Value::Lambda(shared),
        },
        other => other,
    }
}
