//! Shell commands. Each returns the process exit status.

mod repl;
mod run;

pub use repl::run_repl;
pub use run::{eval_expression, run_file};

use skim_eval::{EvalError, Interpreter};

use crate::ShellOptions;

/// Build the interpreter for a command, reporting failure on stderr.
fn interpreter(options: &ShellOptions) -> Option<Interpreter> {
    match options.interpreter() {
        Ok(interpreter) => Some(interpreter),
        Err(err) => {
            report_error(&err);
            None
        }
    }
}

fn report_error(err: &EvalError) {
    eprintln!("error: {err}");
}

/// Print evaluation counters to stderr when profiling.
fn report_profile(interpreter: &Interpreter) {
    if let Some(counters) = interpreter.counters() {
        eprintln!("{}", counters.report());
    }
}
