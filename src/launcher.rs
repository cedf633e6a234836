use crate::command::ExitCode;
use std::io;
use std::process::{Command, ExitStatus};

/// Terminal state of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The child exited on its own with this code.
    Exited(i32),
    /// The child was killed by this signal.
    Signaled(i32),
}

impl Termination {
    /// Shell-style status: the exit code, or `128 + signal`.
    pub fn status(self) -> ExitCode {
        match self {
            Termination::Exited(code) => code,
            Termination::Signaled(signal) => 128 + signal,
        }
    }

    pub fn success(self) -> bool {
        self == Termination::Exited(0)
    }
}

impl From<ExitStatus> for Termination {
    fn from(exit_status: ExitStatus) -> Self {
        match exit_status.code() {
            Some(code) => Termination::Exited(code),
            None => terminated_by_signal(exit_status),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> Termination {
    use std::os::unix::process::ExitStatusExt;
    match exit_status.signal() {
        Some(signal) => Termination::Signaled(signal),
        None => Termination::Exited(-1),
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> Termination {
    Termination::Exited(-1)
}

/// Runs an external program to completion.
///
/// `argv[0]` names the program and is also passed as its argument zero.
/// Implementations must block until the child has exited or was killed; a child
/// that is merely stopped has not terminated.
pub trait Launcher {
    fn launch(&self, argv: &[&str]) -> io::Result<Termination>;
}

/// Launches programs through [`std::process::Command`].
///
/// The program is looked up on `PATH` unless it contains a slash, and inherits the
/// shell's environment, working directory and standard streams. If the program
/// cannot be executed the error comes back from `spawn` in the parent, so the
/// child never runs shell code.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, argv: &[&str]) -> io::Result<Termination> {
        let Some((program, args)) = argv.split_first() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
        };
        let mut child = Command::new(program).args(args).spawn()?;
        tracing::debug!(pid = child.id(), program = %program, "spawned child");
        // Child::wait does not report stopped children, only exit or signal death.
        let exit_status = child.wait()?;
        Ok(exit_status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termination_status() {
        assert_eq!(Termination::Exited(0).status(), 0);
        assert_eq!(Termination::Exited(3).status(), 3);
        assert_eq!(Termination::Signaled(9).status(), 137);
        assert!(Termination::Exited(0).success());
        assert!(!Termination::Signaled(15).success());
    }

    #[test]
    fn test_empty_argv_is_invalid() {
        let err = SystemLauncher.launch(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let err = SystemLauncher
            .launch(&["this_does_not_exist_xyz"])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_codes_are_reported() {
        assert_eq!(
            SystemLauncher.launch(&["sh", "-c", "exit 0"]).unwrap(),
            Termination::Exited(0)
        );
        assert_eq!(
            SystemLauncher.launch(&["sh", "-c", "exit 7"]).unwrap(),
            Termination::Exited(7)
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_signal_death_is_terminal() {
        let t = SystemLauncher.launch(&["sh", "-c", "kill -9 $$"]).unwrap();
        assert_eq!(t, Termination::Signaled(9));
    }

    #[test]
    #[cfg(unix)]
    fn test_stopped_child_is_waited_through() {
        // Stops itself, is resumed by a background sibling, then exits normally.
        let script = "(sleep 0.2; kill -CONT $$) & kill -STOP $$; exit 5";
        let t = SystemLauncher.launch(&["sh", "-c", script]).unwrap();
        assert_eq!(t, Termination::Exited(5));
    }
}
