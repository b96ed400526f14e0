//! Callable values: built-in procedures, built-in syntax, and closures.

use skim_ir::Symbol;
use std::fmt;

use super::Value;
use crate::environment::Environment;
use crate::errors::{arity_mismatch, EvalError, EvalResult};
use crate::executor::{Executor, SyntaxOutcome};

/// Native procedure body. Arguments arrive evaluated, in source order.
pub type BuiltinFn = fn(&mut dyn Executor, &[Value]) -> EvalResult;

/// Native syntax rule. Receives the unevaluated operand list.
pub type SyntaxFn = fn(&mut dyn Executor, &Value, &Environment) -> Result<SyntaxOutcome, EvalError>;

/// Accepted argument counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    /// Inclusive on both ends.
    Range(usize, usize),
}

impl Arity {
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(min) => count >= min,
            Arity::Range(min, max) => (min..=max).contains(&count),
        }
    }

    /// Check `count`, naming `name` in the error.
    pub fn check(self, name: &str, count: usize) -> Result<(), EvalError> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(arity_mismatch(name, self, count))
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "argument" } else { "arguments" };
        match *self {
            Arity::Exact(n) => write!(f, "{n} {}", plural(n)),
            Arity::AtLeast(n) => write!(f, "at least {n} {}", plural(n)),
            Arity::Range(min, max) => write!(f, "{min} to {max} arguments"),
        }
    }
}

/// A natively implemented procedure.
pub struct Builtin {
    pub name: String,
    pub arity: Arity,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A natively implemented special form.
pub struct Syntax {
    pub name: String,
    pub rule: SyntaxFn,
}

impl fmt::Debug for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Syntax")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Parameter list of a user-defined procedure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formals {
    /// `(a b c)`: exactly this many arguments.
    Fixed(Vec<Symbol>),
    /// `(a b . rest)` or a bare `rest`: at least `fixed.len()` arguments,
    /// the remainder bound to `rest` as a fresh list.
    Variadic { fixed: Vec<Symbol>, rest: Symbol },
}

impl Formals {
    pub fn arity(&self) -> Arity {
        match self {
            Formals::Fixed(fixed) => Arity::Exact(fixed.len()),
            Formals::Variadic { fixed, .. } => Arity::AtLeast(fixed.len()),
        }
    }
}

/// A user-defined procedure closing over its defining environment.
#[derive(Clone)]
pub struct Lambda {
    pub name: Option<String>,
    pub formals: Formals,
    /// Body expressions; never empty.
    pub body: Vec<Value>,
    pub env: Environment,
}

impl Lambda {
    /// Name for messages; anonymous procedures report as `lambda`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("lambda")
    }

    /// Bind `args` in a fresh child of the captured environment.
    pub fn bind(&self, args: Vec<Value>) -> Result<Environment, EvalError> {
        self.formals.arity().check(self.display_name(), args.len())?;
        self.env.extend(&self.formals, args)
    }
}

impl fmt::Debug for Lambda {
    // The captured environment may contain this closure; never print it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("name", &self.name)
            .field("formals", &self.formals)
            .field("body_len", &self.body.len())
            .finish_non_exhaustive()
    }
}
