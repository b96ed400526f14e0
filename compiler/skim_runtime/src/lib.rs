#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across the crate"
)]
//! Skim Runtime - the data the evaluator works on.
//!
//! This crate provides:
//! - Runtime values (`Value`, `Pair`, procedure and syntax types)
//! - Lexical environments (`Environment`)
//! - The argument call stack (`CallStack`)
//! - Evaluation errors (`EvalError`, `EvalErrorKind`, `EvalResult`)
//! - The `Executor` trait through which native procedures and syntax reach
//!   back into the interpreter
//!
//! Environments and pairs are `Rc`-shared and therefore single-threaded. The
//! symbol table they key on lives in `skim_ir` and may be shared freely.

mod call_stack;
mod environment;
pub mod errors;
mod executor;
mod value;

pub use call_stack::CallStack;
pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use executor::{Executor, SyntaxOutcome};
pub use value::{
    Arity, Builtin, BuiltinFn, Formals, Lambda, ListIter, Pair, Syntax, SyntaxFn, Value,
};
