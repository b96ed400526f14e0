//! Skim CLI
//!
//! Interactive shell, file runner and one-shot evaluator.

use skimc::commands::{eval_expression, run_file, run_repl};
use skimc::{init_tracing, ShellOptions};

fn main() {
    init_tracing();

    let (options, args) = match ShellOptions::parse(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let status = match args.first().map(String::as_str) {
        None | Some("repl") => run_repl(&options),
        Some("run") => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: skim run <file> [options]");
                std::process::exit(1);
            };
            run_file(path, &options)
        }
        Some("eval") => {
            let Some(source) = args.get(1) else {
                eprintln!("Usage: skim eval \"<expr>\" [options]");
                std::process::exit(1);
            };
            eval_expression(source, &options)
        }
        Some("help" | "-h" | "--help") => {
            print_usage();
            0
        }
        Some(other) => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            1
        }
    };

    std::process::exit(status);
}

fn print_usage() {
    eprintln!("Skim - a Scheme-like interpreter");
    eprintln!();
    eprintln!("Usage: skim [command] [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  repl              Interactive read-eval-print loop (default)");
    eprintln!("  run <file>        Evaluate every expression in a file");
    eprintln!("  eval \"<expr>\"     Evaluate expressions and print the last value");
    eprintln!("  help              Show this message");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --max-depth=<n>   Nested evaluation limit, or `none` (default: 10000)");
    eprintln!("  --profile         Print evaluation counters to stderr");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=skim_eval=debug) to enable tracing.");
}
