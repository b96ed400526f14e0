#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across the crate"
)]
//! Skim Eval - the tree-walking evaluator.
//!
//! This crate provides:
//! - `Interpreter`, its builder and configuration
//! - The built-in syntax forms (`quote`, `if`, `define`, `lambda`, ...)
//! - The built-in procedure library (arithmetic, lists, predicates, strings,
//!   output, `apply`)
//! - Print handlers for capturing or discarding output
//! - Optional evaluation counters for profiling
//!
//! ```text
//! let mut interpreter = Interpreter::new()?;
//! let value = interpreter.eval_source("(+ 1 2)")?;
//! ```

mod builtins;
mod config;
mod counters;
mod interpreter;
mod print_handler;
mod stack;
mod syntax;

pub use config::{EvalConfig, DEFAULT_MAX_DEPTH};
pub use counters::EvalCounters;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use stack::ensure_sufficient_stack;

// Re-export the runtime surface embedders need alongside the interpreter.
pub use skim_runtime::{EvalError, EvalErrorKind, EvalResult, Value};
