use anyhow::Result;
use argh::FromArgs;
use std::io::Write;

use crate::builtin::Registry;

/// Status of the last command, in shell terms: 0 for success.
pub type ExitCode = i32;

/// Whether the interpreter loop should prompt again after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Continue,
    /// Only produced by `exit`.
    Stop,
}

impl Continuation {
    pub fn should_continue(self) -> bool {
        self == Continuation::Continue
    }
}

/// What running one command produced: the loop signal plus a status for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub continuation: Continuation,
    pub status: ExitCode,
}

impl Outcome {
    pub fn proceed(status: ExitCode) -> Self {
        Self {
            continuation: Continuation::Continue,
            status,
        }
    }

    pub fn stop() -> Self {
        Self {
            continuation: Continuation::Stop,
            status: 0,
        }
    }
}

/// Streams and shared state a builtin runs against.
pub struct BuiltinContext<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
    pub registry: &'a Registry,
}

/// A command that runs inside the shell process and can steer the loop.
///
/// The argument vector after the command name is handed to [`argh`] entirely as
/// operands, so a word such as `-x` or `--help` is data, never a flag.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Registry key, matched exactly against the first token.
    fn name() -> &'static str;

    /// Executes the command. An `Err` is reported on the error stream by the caller
    /// and never stops the loop.
    fn execute(self, ctx: &mut BuiltinContext<'_>) -> Result<Continuation>;
}
