use crate::command::{BuiltinCommand, BuiltinContext, Continuation, Outcome};
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::{self, Write};

/// Name printed in the `help` banner and in diagnostics.
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

const BANNER_RULE: &str = "*****************************";

/// Signature shared by every registry entry. `args[0]` is the command name.
pub type BuiltinFn = fn(&[&str], &mut BuiltinContext<'_>) -> io::Result<Outcome>;

/// One named in-process operation.
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    run: BuiltinFn,
}

impl Builtin {
    fn of<T: BuiltinCommand>() -> Self {
        Self {
            name: T::name(),
            run: run_builtin::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run with the full argument vector, command name included.
    pub fn invoke(&self, args: &[&str], ctx: &mut BuiltinContext<'_>) -> io::Result<Outcome> {
        (self.run)(args, ctx)
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

/// The fixed, ordered table of builtins.
///
/// Built once at startup and only ever read afterwards; lookup is a linear scan.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<Builtin>,
}

impl Registry {
    /// `cd`, `help` and `exit`, in that order.
    pub fn standard() -> Self {
        Self {
            entries: vec![Builtin::of::<Cd>(), Builtin::of::<Help>(), Builtin::of::<Exit>()],
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Builtin> {
        self.entries.iter().find(|b| b.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|b| b.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn run_builtin<T: BuiltinCommand>(
    args: &[&str],
    ctx: &mut BuiltinContext<'_>,
) -> io::Result<Outcome> {
    let rest = args.get(1..).unwrap_or(&[]);
    let operands: Vec<&str> = std::iter::once("--").chain(rest.iter().copied()).collect();
    match T::from_args(&[T::name()], &operands) {
        Ok(cmd) => match cmd.execute(ctx) {
            Ok(Continuation::Stop) => Ok(Outcome::stop()),
            Ok(Continuation::Continue) => Ok(Outcome::proceed(0)),
            Err(e) => {
                writeln!(ctx.stderr, "{PROGRAM_NAME}: {e:#}")?;
                Ok(Outcome::proceed(1))
            }
        },
        Err(EarlyExit { output, status }) => {
            if status.is_ok() {
                writeln!(ctx.stdout, "{output}")?;
                Ok(Outcome::proceed(0))
            } else {
                writeln!(ctx.stderr, "{output}")?;
                Ok(Outcome::proceed(1))
            }
        }
    }
}

#[derive(FromArgs)]
/// Change the current working directory of the shell process.
pub struct Cd {
    #[argh(positional, greedy)]
    /// directory to switch to, taken verbatim; anything after it is ignored.
    pub args: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _ctx: &mut BuiltinContext<'_>) -> Result<Continuation> {
        let Some(target) = self.args.first() else {
            anyhow::bail!("expected argument to \"cd\"");
        };
        env::set_current_dir(target).with_context(|| format!("cd: {target}"))?;
        tracing::debug!(dir = %target, "changed directory");
        Ok(Continuation::Continue)
    }
}

#[derive(FromArgs)]
/// Print the shell banner and the list of builtin commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, ctx: &mut BuiltinContext<'_>) -> Result<Continuation> {
        let out = &mut *ctx.stdout;
        writeln!(out, "{BANNER_RULE}")?;
        writeln!(out, "* {PROGRAM_NAME}, a toy shell")?;
        writeln!(out, "* Number of builtin functions: {}", ctx.registry.len())?;
        for name in ctx.registry.names() {
            writeln!(out, "* {name}")?;
        }
        writeln!(out, "{BANNER_RULE}")?;
        Ok(Continuation::Continue)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _ctx: &mut BuiltinContext<'_>) -> Result<Continuation> {
        Ok(Continuation::Stop)
    }
}

#[cfg(test)]
pub(crate) fn lock_current_dir() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}
