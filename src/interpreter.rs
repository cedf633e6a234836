use crate::builtin::{PROGRAM_NAME, Registry};
use crate::command::{BuiltinContext, Continuation, ExitCode, Outcome};
use crate::error::ShellError;
use crate::launcher::{Launcher, SystemLauncher};
use crate::reader::LineSource;
use crate::tokenizer::{self, Tokens};
use std::io::{self, Write};

/// Prompt shown before each line when none is configured.
pub const DEFAULT_PROMPT: &str = "~$ ";

/// Turns lines of text into builtin calls or child processes.
///
/// A line is split on whitespace into [`Tokens`]. When the first token is a
/// [`Registry`] key the builtin runs in-process with the whole token vector;
/// any other first token is a program name, and the vector goes to the
/// [`Launcher`], which blocks until that child has terminated.
///
/// Example
/// ```
/// use toysh::{Continuation, Interpreter};
/// let mut sh = Interpreter::default();
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// let next = sh.execute_line("help", &mut out, &mut err).unwrap();
/// assert_eq!(next, Continuation::Continue);
/// assert!(String::from_utf8(out).unwrap().contains("* exit"));
/// ```
pub struct Interpreter {
    registry: Registry,
    launcher: Box<dyn Launcher>,
    prompt: String,
    last_status: ExitCode,
}

impl Interpreter {
    /// Dispatch against `registry`, running programs through `launcher`.
    pub fn new(registry: Registry, launcher: Box<dyn Launcher>) -> Self {
        Self {
            registry,
            launcher,
            prompt: DEFAULT_PROMPT.to_string(),
            last_status: 0,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Status of the most recent command: 0 on success, 1 for a failed builtin,
    /// 127 when the program was not found, 126 when it could not be started,
    /// otherwise the child's termination status.
    pub fn last_status(&self) -> ExitCode {
        self.last_status
    }

    /// Run one tokenized command.
    ///
    /// A blank line is a no-op. Command failures are written to `stderr` and the
    /// loop is told to continue; only `exit` returns [`Continuation::Stop`].
    ///
    /// # Errors
    /// Only if writing to `stdout` or `stderr` fails.
    pub fn dispatch(
        &mut self,
        tokens: &Tokens<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Continuation, ShellError> {
        let Some(name) = tokens.command() else {
            return Ok(Continuation::Continue);
        };
        let argv = tokens.as_slice();

        let outcome = match self.registry.lookup(name) {
            Some(builtin) => {
                tracing::debug!(builtin = name, argc = argv.len(), "running builtin");
                let mut ctx = BuiltinContext {
                    stdout: &mut *stdout,
                    stderr: &mut *stderr,
                    registry: &self.registry,
                };
                builtin.invoke(argv, &mut ctx)?
            }
            None => {
                // Anything we printed must land before the child's output.
                stdout.flush()?;
                self.launch(argv, stderr)?
            }
        };

        self.last_status = outcome.status;
        Ok(outcome.continuation)
    }

    fn launch(&self, argv: &[&str], stderr: &mut dyn Write) -> io::Result<Outcome> {
        let program = argv[0];
        match self.launcher.launch(argv) {
            Ok(termination) => {
                tracing::debug!(program, ?termination, "child terminated");
                Ok(Outcome::proceed(termination.status()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(program, "command not found");
                writeln!(stderr, "{PROGRAM_NAME}: {program}: command not found")?;
                Ok(Outcome::proceed(127))
            }
            Err(e) => {
                tracing::warn!(program, error = %e, "failed to launch");
                writeln!(stderr, "{PROGRAM_NAME}: {program}: {e}")?;
                Ok(Outcome::proceed(126))
            }
        }
    }

    /// Tokenize and dispatch a single line.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Continuation, ShellError> {
        let tokens = tokenizer::split_into_tokens(line)?;
        self.dispatch(&tokens, stdout, stderr)
    }

    /// Prompt, read, dispatch; repeat until `exit` or end of input.
    ///
    /// # Errors
    /// Fatal conditions only: a buffer that cannot grow, or a broken stream.
    pub fn repl(
        &mut self,
        source: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<(), ShellError> {
        loop {
            let Some(line) = source.read_line(&self.prompt)? else {
                tracing::debug!("end of input");
                return Ok(());
            };
            if !self.execute_line(&line, stdout, stderr)?.should_continue() {
                return Ok(());
            }
        }
    }
}

impl Default for Interpreter {
    /// `cd`, `help` and `exit` in-process, real child processes for the rest.
    fn default() -> Self {
        Self::new(Registry::standard(), Box::new(SystemLauncher))
    }
}
