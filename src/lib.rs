//! A tiny interactive command interpreter.
//!
//! Each iteration reads one line, splits it on whitespace, and either runs one of
//! the builtins (`cd`, `help`, `exit`) in-process or launches the named program as
//! a child and waits for it to terminate. There are no pipelines, redirections,
//! quoting or variables.
//!
//! The main entry point is [`Interpreter`]. Lines come from a [`LineSource`]:
//! [`PlainSource`] for scripted or piped input, [`EditorSource`] for a terminal.

mod buffer;
mod builtin;
mod command;
mod config;
mod error;
mod interpreter;
mod launcher;
mod reader;
mod tokenizer;

pub use builtin::{Builtin, PROGRAM_NAME, Registry};
pub use command::{BuiltinContext, Continuation, ExitCode, Outcome};
pub use config::Config;
pub use error::ShellError;
pub use interpreter::{DEFAULT_PROMPT, Interpreter};
pub use launcher::{Launcher, SystemLauncher, Termination};
pub use reader::{
    EditorSource, LINE_GROWTH_INCREMENT, LINE_INITIAL_CAPACITY, LineReader, LineSource,
    PlainSource,
};
pub use tokenizer::{DELIMITERS, Tokens, split_into_tokens};
