//! Reader errors.

use skim_ir::SymbolTableError;
use skim_runtime::errors::{parse_error, symbol_table_full};
use skim_runtime::EvalError;

/// Why source text could not be turned into a datum.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("unexpected end of input: {context} (line {line})")]
    UnexpectedEof { context: &'static str, line: usize },

    #[error("unexpected '{ch}' (line {line})")]
    UnexpectedChar { ch: char, line: usize },

    #[error("invalid number `{token}` (line {line})")]
    InvalidNumber { token: String, line: usize },

    #[error("invalid escape sequence '\\{ch}' in string (line {line})")]
    InvalidEscape { ch: char, line: usize },

    #[error("bad dotted list: {reason} (line {line})")]
    BadDottedList { reason: &'static str, line: usize },

    /// Interning a symbol failed. Fatal.
    #[error(transparent)]
    SymbolTable(#[from] SymbolTableError),
}

impl ReadError {
    /// Whether more input could complete the datum (used by the REPL to keep
    /// reading lines).
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ReadError::UnexpectedEof { .. })
    }
}

impl From<ReadError> for EvalError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::SymbolTable(err) => symbol_table_full(&err),
            other => parse_error(other.to_string()),
        }
    }
}
