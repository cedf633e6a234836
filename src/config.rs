use crate::interpreter::DEFAULT_PROMPT;
use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// A toy interactive shell with cd, help and exit builtins.
pub struct Config {
    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// text printed before each command line
    pub prompt: String,

    #[argh(switch)]
    /// read lines without the line editor, even on a terminal
    pub plain: bool,

    #[argh(switch, short = 'v')]
    /// log dispatch and process events at debug level
    pub verbose: bool,
}

impl Config {
    /// Log filter directive: `RUST_LOG` wins, then `--verbose`, else warnings only.
    pub fn log_filter(&self, rust_log: Option<String>) -> String {
        match rust_log {
            Some(filter) if !filter.trim().is_empty() => filter,
            _ if self.verbose => "debug".to_string(),
            _ => "warn".to_string(),
        }
    }

    /// The line editor only makes sense when a person is typing.
    pub fn use_editor(&self, stdin_is_terminal: bool) -> bool {
        stdin_is_terminal && !self.plain
    }
}
