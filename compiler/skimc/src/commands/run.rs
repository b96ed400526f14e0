//! `skim run <file>` and `skim eval "<expr>"`.

use super::{interpreter, report_error, report_profile};
use crate::ShellOptions;

/// Evaluate every datum in a file, stopping at the first error.
pub fn run_file(path: &str, options: &ShellOptions) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {path}: {err}");
            return 1;
        }
    };
    let Some(mut interpreter) = interpreter(options) else {
        return 1;
    };

    tracing::debug!(path, bytes = source.len(), "running file");
    let status = match interpreter.eval_source(&source) {
        Ok(_) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };
    report_profile(&interpreter);
    status
}

/// Evaluate `source` and print the value of its last datum.
pub fn eval_expression(source: &str, options: &ShellOptions) -> i32 {
    let Some(mut interpreter) = interpreter(options) else {
        return 1;
    };

    let status = match interpreter.eval_source(source) {
        Ok(value) => {
            if !value.is_unspecified() {
                println!("{value}");
            }
            0
        }
        Err(err) => {
            report_error(&err);
            1
        }
    };
    report_profile(&interpreter);
    status
}
