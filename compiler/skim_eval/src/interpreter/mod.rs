//! Tree-walking interpreter for Skim.
//!
//! # Architecture
//!
//! [`Interpreter::evaluate`] is the single entry point. It runs
//! `eval_loop`, which dispatches on the expression:
//!
//! - symbols resolve through the environment chain
//! - pairs are applications: the head is evaluated, then classified as a
//!   built-in procedure, built-in syntax or user procedure (`application`)
//! - everything else evaluates to itself
//!
//! Expressions in tail position (the last body expression of a procedure,
//! the branches of `if`, ...) do not recurse: syntax rules and procedure
//! entry hand back the next expression and environment, and the loop
//! continues with them. Everything else is nested evaluation, which is
//! depth-counted and runs under [`ensure_sufficient_stack`].
//!
//! # Call stack discipline
//!
//! Built-in arguments travel through the interpreter's [`CallStack`]. The
//! stack length recorded before the first push is restored on any failure,
//! so a failed top-level evaluation never leaves values behind.

mod application;
mod builder;

pub use builder::InterpreterBuilder;

use skim_ir::{SharedSymbolTable, Symbol};
use skim_reader::Reader;
use skim_runtime::errors::{not_a_procedure, recursion_limit_exceeded};
use skim_runtime::{
    Arity, BuiltinFn, CallStack, Environment, EvalError, EvalErrorKind, EvalResult, Executor,
    SyntaxFn, SyntaxOutcome, Value,
};

use crate::counters::EvalCounters;
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;

/// A Skim interpreter: global environment, argument stack and output.
///
/// Create one with [`Interpreter::new`] or [`InterpreterBuilder`].
pub struct Interpreter {
    symbols: SharedSymbolTable,
    global: Environment,
    call_stack: CallStack,
    print_handler: SharedPrintHandler,
    /// Nested evaluation limit; `None` for unlimited.
    max_depth: Option<usize>,
    /// Current nested evaluation depth.
    depth: usize,
    counters: Option<EvalCounters>,
}

impl Interpreter {
    /// Interpreter with the standard library, printing to stdout.
    pub fn new() -> Result<Self, EvalError> {
        InterpreterBuilder::new().build()
    }

    /// Evaluate `expr` in `env`.
    ///
    /// On failure the call stack is restored to its length on entry; the
    /// environment keeps any definitions made before the failing
    /// subexpression.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&mut self, expr: &Value, env: &Environment) -> EvalResult {
        let base = self.call_stack.len();
        let depth = self.depth;
        let result = self.eval_nested(expr, env);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "evaluation failed");
            self.call_stack.truncate(base);
            self.depth = depth;
        }
        result
    }

    /// Read and evaluate every datum in `source` in the global environment.
    ///
    /// Returns the value of the last datum, or unspecified for empty input.
    /// Stops at the first read or evaluation error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval_source(&mut self, source: &str) -> EvalResult {
        let mut reader = Reader::new(source, self.symbols.clone());
        let global = self.global.clone();
        let mut last = Value::Unspecified;
        while let Some(datum) = reader.read()? {
            last = self.evaluate(&datum, &global)?;
        }
        Ok(last)
    }

    /// Bind `name` to a built-in procedure in the global environment.
    pub fn register_builtin(
        &mut self,
        name: &str,
        arity: Arity,
        func: BuiltinFn,
    ) -> Result<(), EvalError> {
        let symbol = self.symbols.get_or_add(name)?;
        self.global.define(symbol, Value::builtin(name, arity, func));
        Ok(())
    }

    /// Bind `name` to a built-in syntax form in the global environment.
    pub fn register_syntax(&mut self, name: &str, rule: SyntaxFn) -> Result<(), EvalError> {
        let symbol = self.symbols.get_or_add(name)?;
        self.global.define(symbol, Value::syntax(name, rule));
        Ok(())
    }

    /// Define `name` as an ordinary variable in the global environment.
    pub fn define_global(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        let symbol = self.symbols.get_or_add(name)?;
        self.global.define(symbol, value);
        Ok(())
    }

    #[inline]
    pub fn global(&self) -> &Environment {
        &self.global
    }

    #[inline]
    pub fn symbols(&self) -> &SharedSymbolTable {
        &self.symbols
    }

    #[inline]
    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Counters, if profiling is enabled.
    pub fn counters(&self) -> Option<&EvalCounters> {
        self.counters.as_ref()
    }

    /// Fail once nested evaluation reaches the configured limit.
    fn check_recursion_limit(&self) -> Result<(), EvalError> {
        if let Some(max_depth) = self.max_depth {
            if self.depth >= max_depth {
                return Err(recursion_limit_exceeded(max_depth));
            }
        }
        Ok(())
    }

    /// Evaluate a subexpression that is not in tail position.
    fn eval_nested(&mut self, expr: &Value, env: &Environment) -> EvalResult {
        self.check_recursion_limit()?;
        self.depth += 1;
        let depth = self.depth;
        self.count(|c| c.record_depth(depth));
        let result = ensure_sufficient_stack(|| self.eval_loop(expr.clone(), env.clone()));
        self.depth -= 1;
        result
    }

    fn eval_loop(&mut self, mut expr: Value, mut env: Environment) -> EvalResult {
        loop {
            self.count(EvalCounters::count_expression);

            let pair = match expr {
                Value::Symbol(symbol) => return env.lookup(&symbol),
                Value::Pair(pair) => pair,
                atom => return Ok(atom),
            };
            let head_expr = pair.first();
            let operands = pair.rest();

            let head = self.eval_head(&head_expr, &env)?;
            match head {
                Value::Builtin(builtin) => {
                    return self.apply_builtin(&builtin, &operands, &env);
                }
                Value::Syntax(syntax) => {
                    self.count(EvalCounters::count_syntax_form);
                    tracing::trace!(form = %syntax.name, "syntax dispatch");
                    match (syntax.rule)(self, &operands, &env)? {
                        SyntaxOutcome::Value(value) => return Ok(value),
                        SyntaxOutcome::Tail {
                            expr: next,
                            env: next_env,
                        } => {
                            expr = next;
                            env = next_env;
                        }
                    }
                }
                Value::Lambda(lambda) => {
                    let args = self.eval_operands(&operands, &env)?;
                    let (next, next_env) = self.enter_lambda(&lambda, args)?;
                    expr = next;
                    env = next_env;
                }
                _ => return Err(not_a_procedure(&head_expr)),
            }
        }
    }

    /// Evaluate the operator. An unbound symbol in operator position is
    /// reported as a failed application of that symbol.
    fn eval_head(&mut self, head_expr: &Value, env: &Environment) -> EvalResult {
        match self.eval_nested(head_expr, env) {
            Err(err)
                if head_expr.is_symbol()
                    && matches!(err.kind, EvalErrorKind::UnboundVariable { .. }) =>
            {
                Err(not_a_procedure(head_expr).with_note(err.message))
            }
            result => result,
        }
    }

    #[inline]
    fn count(&mut self, f: impl FnOnce(&mut EvalCounters)) {
        if let Some(counters) = &mut self.counters {
            f(counters);
        }
    }
}

impl Executor for Interpreter {
    fn eval(&mut self, expr: &Value, env: &Environment) -> EvalResult {
        self.eval_nested(expr, env)
    }

    fn call(&mut self, procedure: &Value, args: Vec<Value>) -> EvalResult {
        match procedure {
            Value::Builtin(builtin) => {
                builtin.arity.check(&builtin.name, args.len())?;
                self.invoke_builtin(builtin, &args)
            }
            Value::Lambda(lambda) => {
                let (expr, env) = self.enter_lambda(lambda, args)?;
                self.eval_nested(&expr, &env)
            }
            other => Err(not_a_procedure(other)),
        }
    }

    fn intern(&mut self, name: &str) -> Result<Symbol, EvalError> {
        Ok(self.symbols.get_or_add(name)?)
    }

    fn print(&mut self, text: &str) {
        self.print_handler.print(text);
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("symbols", &self.symbols)
            .field("call_stack", &self.call_stack.len())
            .field("max_depth", &self.max_depth)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
