use std::io::{self, BufReader, IsTerminal};
use std::process;
use toysh::{Config, EditorSource, Interpreter, PROGRAM_NAME, PlainSource, ShellError};

fn init_logging(config: &Config) {
    let filter = config.log_filter(std::env::var("RUST_LOG").ok());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(config: &Config) -> Result<(), ShellError> {
    let mut sh = Interpreter::default().with_prompt(config.prompt.as_str());
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if config.use_editor(io::stdin().is_terminal()) {
        let mut source = EditorSource::new()?;
        sh.repl(&mut source, &mut stdout, &mut stderr)
    } else {
        let mut source = PlainSource::new(BufReader::new(io::stdin()), io::stdout());
        sh.repl(&mut source, &mut stdout, &mut stderr)
    }
}

fn main() -> process::ExitCode {
    let config: Config = argh::from_env();
    init_logging(&config);
    tracing::debug!(?config, "starting {PROGRAM_NAME}");

    match run(&config) {
        Ok(()) => process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{PROGRAM_NAME}: {e}");
            process::ExitCode::FAILURE
        }
    }
}
