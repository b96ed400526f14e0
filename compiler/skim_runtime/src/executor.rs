//! The seam between native procedures/syntax and the interpreter.

use skim_ir::Symbol;

use crate::environment::Environment;
use crate::errors::{EvalError, EvalResult};
use crate::value::Value;

/// Interpreter services available to built-in procedures and syntax rules.
///
/// Rules live outside the evaluator crate's dispatch loop and reach back into
/// it only through this trait.
pub trait Executor {
    /// Evaluate `expr` in `env` (not in tail position).
    fn eval(&mut self, expr: &Value, env: &Environment) -> EvalResult;

    /// Apply a procedure value to already evaluated arguments.
    fn call(&mut self, procedure: &Value, args: Vec<Value>) -> EvalResult;

    /// Intern `name` in the interpreter's symbol table.
    fn intern(&mut self, name: &str) -> Result<Symbol, EvalError>;

    /// Write text to the interpreter's output.
    fn print(&mut self, text: &str);
}

/// Result of a syntax rule.
#[derive(Debug)]
pub enum SyntaxOutcome {
    /// The form's final value.
    Value(Value),
    /// Evaluate `expr` in `env` as the form's value, in tail position.
    Tail { expr: Value, env: Environment },
}
