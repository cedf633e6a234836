use rustyline::error::ReadlineError;
use std::io;
use thiserror::Error;

/// Errors that end the read-dispatch loop.
///
/// Everything a single command can get wrong is reported on the error stream and
/// swallowed by the interpreter; only these make it out of [`crate::Interpreter::repl`].
#[derive(Debug, Error)]
pub enum ShellError {
    /// A line or token buffer could not be grown.
    #[error("could not allocate {what} buffer")]
    OutOfMemory { what: &'static str },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("line editor error: {0}")]
    Editor(#[from] ReadlineError),
}
