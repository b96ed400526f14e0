//! `skim repl`: the interactive read-eval-print loop.

use std::io::{BufRead, Write};

use super::{interpreter, report_error, report_profile};
use crate::{Feed, Session, ShellOptions};

const PROMPT: &str = "skim> ";
const CONTINUE_PROMPT: &str = "  ... ";

/// Read lines from stdin until end of input or a fatal error.
pub fn run_repl(options: &ShellOptions) -> i32 {
    let Some(interpreter) = interpreter(options) else {
        return 1;
    };
    let mut session = Session::new(interpreter);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!(
            "{}",
            if session.is_pending() {
                CONTINUE_PROMPT
            } else {
                PROMPT
            }
        );
        // The prompt is cosmetic; a failed flush shows up on the next print.
        let _ = std::io::stdout().flush();

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: cannot read input: {err}");
                return 1;
            }
        }

        let Feed::Evaluated(results) = session.feed(line.trim_end_matches(['\n', '\r'])) else {
            continue;
        };
        for result in results {
            match result {
                Ok(value) if value.is_unspecified() => {}
                Ok(value) => println!("{value}"),
                Err(err) => {
                    report_error(&err);
                    if err.is_fatal() {
                        report_profile(session.interpreter());
                        return 1;
                    }
                }
            }
        }
    }

    if session.is_pending() {
        eprintln!("warning: discarding incomplete input at end of file");
    }
    report_profile(session.interpreter());
    0
}
