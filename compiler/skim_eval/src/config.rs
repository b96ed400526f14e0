//! Interpreter configuration.

use skim_ir::DEFAULT_CAPACITY;

/// Default limit on nested (non-tail) evaluation depth.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Settings consumed by [`InterpreterBuilder`](crate::InterpreterBuilder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Nested evaluation depth limit; `None` for unlimited.
    pub max_depth: Option<usize>,
    /// Initial slot count of a symbol table created by the builder.
    pub symbol_capacity: usize,
    /// Collect [`EvalCounters`](crate::EvalCounters).
    pub profile: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            symbol_capacity: DEFAULT_CAPACITY,
            profile: false,
        }
    }
}
