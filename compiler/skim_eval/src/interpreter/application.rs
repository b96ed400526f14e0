//! Procedure application: argument evaluation, built-in invocation and
//! user procedure entry.

use skim_runtime::errors::{bad_syntax, internal_error};
use skim_runtime::{Builtin, Environment, EvalError, EvalResult, Lambda, Value};

use super::Interpreter;
use crate::counters::EvalCounters;

impl Interpreter {
    /// Evaluate `operands` left to right onto the call stack, take them back
    /// as one frame, check arity and invoke.
    pub(super) fn apply_builtin(
        &mut self,
        builtin: &Builtin,
        operands: &Value,
        env: &Environment,
    ) -> EvalResult {
        let base = self.call_stack.len();
        let count = match self.push_operands(operands, env) {
            Ok(count) => count,
            Err(err) => {
                self.call_stack.truncate(base);
                return Err(err);
            }
        };
        let args = self.call_stack.pop_frame(count)?;
        builtin.arity.check(&builtin.name, args.len())?;
        self.invoke_builtin(builtin, &args)
    }

    pub(super) fn invoke_builtin(&mut self, builtin: &Builtin, args: &[Value]) -> EvalResult {
        self.count(EvalCounters::count_builtin_call);
        tracing::trace!(name = %builtin.name, argc = args.len(), "builtin call");
        (builtin.func)(self, args)
    }

    /// Push each evaluated operand as soon as it is produced. Returns how
    /// many were pushed.
    fn push_operands(&mut self, operands: &Value, env: &Environment) -> Result<usize, EvalError> {
        let mut count = 0;
        let mut rest = operands.clone();
        loop {
            match rest {
                Value::Nil => return Ok(count),
                Value::Pair(pair) => {
                    let value = self.eval_nested(&pair.first(), env)?;
                    self.call_stack.push(value);
                    count += 1;
                    let len = self.call_stack.len();
                    self.count(|c| c.peak_call_stack = c.peak_call_stack.max(len));
                    rest = pair.rest();
                }
                _ => return Err(improper_operands(operands)),
            }
        }
    }

    /// Evaluate `operands` left to right into a vector.
    pub(super) fn eval_operands(
        &mut self,
        operands: &Value,
        env: &Environment,
    ) -> Result<Vec<Value>, EvalError> {
        let mut args = Vec::new();
        for operand in operands.iter_list() {
            let operand = operand.map_err(|_| improper_operands(operands))?;
            args.push(self.eval_nested(&operand, env)?);
        }
        Ok(args)
    }

    /// Bind `args` and run every body expression but the last. Returns the
    /// last expression and its environment for the caller to evaluate in
    /// tail position.
    pub(super) fn enter_lambda(
        &mut self,
        lambda: &Lambda,
        args: Vec<Value>,
    ) -> Result<(Value, Environment), EvalError> {
        self.count(EvalCounters::count_procedure_call);
        let env = lambda.bind(args)?;
        let Some((last, init)) = lambda.body.split_last() else {
            return Err(internal_error(format!(
                "procedure {} has an empty body",
                lambda.display_name()
            )));
        };
        for expr in init {
            self.eval_nested(expr, &env)?;
        }
        Ok((last.clone(), env))
    }
}

#[cold]
fn improper_operands(operands: &Value) -> EvalError {
    bad_syntax(
        "application",
        format!("operands must form a proper list: {operands}"),
    )
}
