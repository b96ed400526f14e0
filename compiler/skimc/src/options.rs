//! Command-line flags shared by every command.

use skim_eval::{
    stdout_handler, EvalConfig, EvalError, Interpreter, InterpreterBuilder, DEFAULT_MAX_DEPTH,
};

/// Flags accepted by `skim`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellOptions {
    /// `--max-depth=N`; `--max-depth=none` removes the limit.
    pub max_depth: Option<usize>,
    /// `--profile`: report evaluation counters on stderr.
    pub profile: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        ShellOptions {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            profile: false,
        }
    }
}

impl ShellOptions {
    /// Split `args` into flags and positional arguments.
    ///
    /// Unknown `--` flags are errors; everything else is positional.
    pub fn parse<I, S>(args: I) -> Result<(Self, Vec<String>), String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = ShellOptions::default();
        let mut positional = Vec::new();

        for arg in args {
            let arg: String = arg.into();
            if let Some(value) = arg.strip_prefix("--max-depth=") {
                options.max_depth = parse_depth(value)?;
            } else if arg == "--profile" {
                options.profile = true;
            } else if arg.starts_with("--") && arg != "--help" {
                return Err(format!("unknown option: {arg}"));
            } else {
                positional.push(arg);
            }
        }

        Ok((options, positional))
    }

    /// Interpreter configured by these flags, printing to stdout.
    pub fn interpreter(&self) -> Result<Interpreter, EvalError> {
        InterpreterBuilder::new()
            .config(EvalConfig {
                max_depth: self.max_depth,
                profile: self.profile,
                ..EvalConfig::default()
            })
            .print_handler(stdout_handler())
            .build()
    }
}

fn parse_depth(value: &str) -> Result<Option<usize>, String> {
    if value == "none" {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!(
            "invalid --max-depth value `{value}`: expected a positive integer or `none`"
        )),
        Ok(depth) => Ok(Some(depth)),
    }
}
