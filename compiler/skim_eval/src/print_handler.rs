//! Output destination for `display` and `newline`.
//!
//! The shell writes to stdout; tests and embedders capture into a buffer.
//! Dispatch is a plain enum match, so no trait object sits on the output
//! path.

use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Where interpreter output goes.
pub enum PrintHandlerImpl {
    /// Write to stdout, flushing after every write so REPL prompts interleave.
    Stdout,
    /// Append to an in-memory buffer.
    Buffer(Mutex<String>),
    /// Discard everything.
    Silent,
}

impl PrintHandlerImpl {
    pub fn print(&self, text: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout is not an evaluation error; drop the text.
                if out.write_all(text.as_bytes()).and_then(|()| out.flush()).is_err() {
                    tracing::warn!("failed to write interpreter output to stdout");
                }
            }
            Self::Buffer(buffer) => buffer.lock().push_str(text),
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Take and reset captured output.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(buffer) => std::mem::take(&mut *buffer.lock()),
            Self::Stdout | Self::Silent => String::new(),
        }
    }
}

/// Print handler shared between the interpreter and its owner.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_captures_and_takes() {
        let handler = buffer_handler();
        handler.print("hello");
        handler.print(" world\n");
        assert_eq!(handler.output(), "hello world\n");
        assert_eq!(handler.take_output(), "hello world\n");
        assert_eq!(handler.output(), "");
    }

    #[test]
    fn test_silent_and_stdout_capture_nothing() {
        let silent = silent_handler();
        silent.print("dropped");
        assert_eq!(silent.output(), "");
        assert_eq!(stdout_handler().output(), "");
    }
}
