//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use skim_ir::{SharedSymbolTable, SymbolTable};
use skim_runtime::{CallStack, Environment, EvalError};

use super::Interpreter;
use crate::config::EvalConfig;
use crate::counters::EvalCounters;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::{builtins, syntax};

/// Builder for creating Interpreter instances.
///
/// Defaults: a fresh symbol table of [`EvalConfig::symbol_capacity`] slots,
/// stdout output, the standard library registered, no profiling.
pub struct InterpreterBuilder {
    config: EvalConfig,
    symbols: Option<SharedSymbolTable>,
    print_handler: Option<SharedPrintHandler>,
    stdlib: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            config: EvalConfig::default(),
            symbols: None,
            print_handler: None,
            stdlib: true,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing symbol table, e.g. with a reader or another
    /// interpreter.
    #[must_use]
    pub fn symbols(mut self, symbols: SharedSymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Limit nested evaluation depth; `None` removes the limit.
    #[must_use]
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Collect evaluation counters.
    #[must_use]
    pub fn profile(mut self, profile: bool) -> Self {
        self.config.profile = profile;
        self
    }

    /// Set where `display` and `newline` write.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Start from an empty global environment.
    #[must_use]
    pub fn without_stdlib(mut self) -> Self {
        self.stdlib = false;
        self
    }

    /// Build the interpreter, registering the standard library unless
    /// disabled. Fails only if the symbol table cannot intern the library's
    /// names.
    pub fn build(self) -> Result<Interpreter, EvalError> {
        let symbols = self.symbols.unwrap_or_else(|| {
            SharedSymbolTable::new(SymbolTable::with_capacity(self.config.symbol_capacity))
        });

        let mut interpreter = Interpreter {
            symbols,
            global: Environment::new(),
            call_stack: CallStack::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_depth: self.config.max_depth,
            depth: 0,
            counters: self.config.profile.then(EvalCounters::default),
        };

        if self.stdlib {
            syntax::register_all(&mut interpreter)?;
            builtins::register_all(&mut interpreter)?;
        }

        tracing::debug!(
            max_depth = ?interpreter.max_depth,
            symbols = interpreter.symbols.len(),
            "interpreter built"
        );
        Ok(interpreter)
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
