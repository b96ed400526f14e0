//! Skim shell library.
//!
//! The `skim` binary is a thin argument dispatcher over this crate:
//! - `options`: command-line flags and the interpreter they configure
//! - `session`: line-oriented REPL input handling
//! - `commands`: the `repl`, `run` and `eval` commands

pub mod commands;
pub mod options;
pub mod session;

pub use options::ShellOptions;
pub use session::{Feed, Session};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, so normal runs pay nothing for
/// the instrumentation in the evaluator.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
