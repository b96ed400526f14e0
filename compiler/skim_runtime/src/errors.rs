//! Evaluation error types.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` gives every failure a typed category. Factory functions
//! (e.g. `unbound_variable()`) are the public API: they populate both `kind`
//! and `message`, so callers match on the kind and print the message.
//!
//! Every kind except [`EvalErrorKind::SymbolTableFull`] is recoverable. A
//! failed top-level evaluation leaves environments, the symbol table and the
//! call stack consistent, and the next evaluation may proceed.

use skim_ir::SymbolTableError;
use std::fmt;

use crate::value::{Arity, Value};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Malformed source text.
    Parse { message: String },

    // Access
    UnboundVariable { name: String },

    // Application
    NotAProcedure { expr: String },
    Arity {
        name: String,
        expected: Arity,
        got: usize,
    },
    StackOverflow { depth: usize },

    // Types and arithmetic
    TypeMismatch { expected: String, got: String },
    DivisionByZero,
    IntegerOverflow { operation: String },

    // Syntax forms
    BadSyntax { form: String, reason: String },

    /// The symbol table could not intern a name. Fatal.
    SymbolTableFull { message: String },

    /// Broken interpreter invariant, never caused by user code alone.
    Internal { message: String },

    /// Catch-all for errors without a structured category.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { message } => write!(f, "read error: {message}"),

            Self::UnboundVariable { name } => write!(f, "unbound variable: {name}"),

            Self::NotAProcedure { expr } => write!(
                f,
                "application: not a procedure [expected: procedure that can be applied to arguments, given: {expr}]"
            ),
            Self::Arity {
                name,
                expected,
                got,
            } => {
                if name.is_empty() {
                    write!(f, "arity mismatch: expected {expected}, got {got}")
                } else {
                    write!(f, "{name}: arity mismatch: expected {expected}, got {got}")
                }
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }

            Self::BadSyntax { form, reason } => write!(f, "bad syntax in {form}: {reason}"),

            Self::SymbolTableFull { message } => write!(f, "{message}"),
            Self::Internal { message } => write!(f, "internal error: {message}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Secondary context, printed after the message.
    pub notes: Vec<String>,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Uses `Custom` kind. Prefer the factory functions when a structured
    /// kind exists.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Add a context note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Whether the interpreter can no longer be trusted after this error.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, EvalErrorKind::SymbolTableFull { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

impl From<SymbolTableError> for EvalError {
    #[cold]
    fn from(err: SymbolTableError) -> Self {
        symbol_table_full(&err)
    }
}

// Reader

/// Source text could not be read.
#[cold]
pub fn parse_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Parse {
        message: message.into(),
    })
}

/// The symbol table refused to intern a name.
#[cold]
pub fn symbol_table_full(err: &SymbolTableError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SymbolTableFull {
        message: err.to_string(),
    })
}

// Variables

/// No frame in the chain binds `name`.
#[cold]
pub fn unbound_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundVariable {
        name: name.to_string(),
    })
}

// Application

/// The head of an application did not evaluate to something callable.
///
/// `expr` is the unevaluated head expression.
#[cold]
pub fn not_a_procedure(expr: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAProcedure {
        expr: expr.to_string(),
    })
}

/// Wrong number of arguments. `name` may be empty for anonymous procedures.
#[cold]
pub fn arity_mismatch(name: &str, expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Arity {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Maximum recursion depth exceeded.
#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

// Types and arithmetic

/// A value of the wrong type was supplied.
#[cold]
pub fn type_mismatch(expected: &str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    })
}

/// A procedure received a value of the wrong type, with the procedure named.
#[cold]
pub fn wrong_arg_type(procedure: &str, expected: &str, got: &Value) -> EvalError {
    type_mismatch(expected, got).with_note(format!("in argument to {procedure}: {got}"))
}

/// Division by zero error.
#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// Integer overflow error.
#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Syntax forms

/// A built-in syntax form was used with malformed operands.
#[cold]
pub fn bad_syntax(form: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BadSyntax {
        form: form.to_string(),
        reason: reason.into(),
    })
}

// Interpreter invariants

/// A built-in asked for more arguments than were pushed.
#[cold]
pub fn call_stack_underflow(requested: usize, available: usize) -> EvalError {
    internal_error(format!(
        "call stack underflow: {requested} values requested, {available} available"
    ))
}

/// Broken interpreter invariant.
#[cold]
pub fn internal_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Internal {
        message: message.into(),
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
