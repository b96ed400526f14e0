//! Argument buffer between argument evaluation and built-in invocation.
//!
//! The evaluator pushes each argument as soon as it is evaluated, then takes
//! the whole frame back with [`CallStack::pop_frame`], which returns the
//! values in push order. On an argument failure the evaluator truncates the
//! stack back to the length it had before the first push, so no value
//! outlives the call that pushed it.

use crate::errors::{call_stack_underflow, EvalError};
use crate::value::Value;

/// Interpreter-owned stack of evaluated arguments.
#[derive(Debug, Default)]
pub struct CallStack {
    values: Vec<Value>,
    peak: usize,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
        self.peak = self.peak.max(self.values.len());
    }

    /// Pop the most recently pushed value.
    #[inline]
    pub fn pop(&mut self) -> Option<Value> {
        self.values.pop()
    }

    /// Remove the top `count` values and return them in push order.
    ///
    /// Asking for more than is on the stack is an interpreter bug and fails
    /// without modifying the stack.
    pub fn pop_frame(&mut self, count: usize) -> Result<Vec<Value>, EvalError> {
        let len = self.values.len();
        if count > len {
            tracing::error!(count, len, "call stack underflow");
            return Err(call_stack_underflow(count, len));
        }
        Ok(self.values.split_off(len - count))
    }

    /// Drop everything above `len`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.values.truncate(len);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Highest length reached since creation.
    pub fn peak(&self) -> usize {
        self.peak
    }
}
