//! REPL input handling.
//!
//! Lines are accumulated until they read as complete data: input that ends
//! inside a list, string or after a quote asks for more lines rather than
//! failing. Data completed earlier on the same line run immediately.

use skim_eval::{EvalError, Interpreter, Value};
use skim_reader::Reader;

/// What happened to a line fed to a [`Session`].
#[derive(Debug)]
pub enum Feed {
    /// The input so far ends inside a datum.
    NeedMore,
    /// Complete data were evaluated, in order. Evaluation stops at the first
    /// error, which is the last entry. An unfinished datum after them may
    /// still be pending.
    Evaluated(Vec<Result<Value, EvalError>>),
}

/// An interpreter plus the not yet complete input typed into it.
pub struct Session {
    interpreter: Interpreter,
    pending: String,
}

impl Session {
    pub fn new(interpreter: Interpreter) -> Self {
        Session {
            interpreter,
            pending: String::new(),
        }
    }

    /// Add one line of input and evaluate every datum it completes.
    ///
    /// Complete data run as soon as they are read; only an unfinished datum
    /// after them stays pending.
    pub fn feed(&mut self, line: &str) -> Feed {
        self.pending.push_str(line);
        self.pending.push('\n');

        let source = std::mem::take(&mut self.pending);
        let mut reader = Reader::new(&source, self.interpreter.symbols().clone());
        let global = self.interpreter.global().clone();
        let mut results = Vec::new();

        loop {
            let start = reader.offset();
            match reader.read() {
                Ok(Some(datum)) => {
                    let result = self.interpreter.evaluate(&datum, &global);
                    let failed = result.is_err();
                    results.push(result);
                    if failed {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) if err.is_incomplete() => {
                    self.pending = source[start..].to_string();
                    break;
                }
                Err(err) => {
                    tracing::debug!(error = %err, "discarding unreadable input");
                    results.push(Err(err.into()));
                    break;
                }
            }
        }

        if results.is_empty() && self.is_pending() {
            Feed::NeedMore
        } else {
            Feed::Evaluated(results)
        }
    }

    /// Whether earlier lines are waiting for the rest of a datum.
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop any incomplete input.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }
}
