use std::ffi::OsStr;
use std::io::{self, Write};
use std::process::{Command, ExitStatus};

use log::{debug, warn};

use crate::builtins::Flow;

/// How a child reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Termination::Exited(code),
            None => Termination::Signaled(signal_of(status)),
        }
    }
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or(-1)
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> i32 {
    -1
}

/// Runs token 0 from `PATH` with the remaining tokens as arguments and blocks
/// until it exits or is killed. The shell always keeps going.
pub fn launch(parts: &[&OsStr], stderr_writer: &mut dyn Write) -> io::Result<Flow> {
    let Some((program, args)) = parts.split_first() else {
        return Ok(Flow::Continue);
    };

    if let Some(termination) = run_external(program, args, stderr_writer)? {
        debug!("{:?} finished: {:?}", program, termination);
    }
    Ok(Flow::Continue)
}

fn run_external(
    program: &OsStr,
    args: &[&OsStr],
    stderr_writer: &mut dyn Write,
) -> io::Result<Option<Termination>> {
    let name = program.to_string_lossy();
    let mut child = match Command::new(program).args(args).spawn() {
        Ok(child) => child,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            writeln!(stderr_writer, "dsh: {}: command not found", name)?;
            return Ok(None);
        }
        Err(err) => {
            warn!("spawning {} failed: {}", name, err);
            writeln!(stderr_writer, "dsh: {}: {}", name, err)?;
            return Ok(None);
        }
    };

    // waitpid without WUNTRACED: stopped children are not reported.
    match child.wait() {
        Ok(status) => Ok(Some(status.into())),
        Err(err) => {
            writeln!(stderr_writer, "dsh: {}: wait failed: {}", name, err)?;
            Ok(None)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::ffi::OsStrExt;

    fn os(words: &[&'static str]) -> Vec<&'static OsStr> {
        words.iter().map(|word| OsStr::new(*word)).collect()
    }

    fn run(program: &str, args: &[&'static str]) -> Option<Termination> {
        let mut stderr = Vec::new();
        let termination = run_external(OsStr::new(program), &os(args), &mut stderr).unwrap();
        assert!(stderr.is_empty());
        termination
    }

    #[test]
    fn missing_program_reports_and_continues() {
        let mut stderr = Vec::new();
        let flow = launch(&os(&["definitely_not_a_real_command_xyz"]), &mut stderr).unwrap();
        assert_eq!(Flow::Continue, flow);
        assert_eq!(
            "dsh: definitely_not_a_real_command_xyz: command not found\n",
            String::from_utf8(stderr).unwrap()
        );
    }

    #[test]
    fn failing_program_still_continues() {
        assert_eq!(Some(Termination::Exited(1)), run("false", &[]));
        let mut stderr = Vec::new();
        assert_eq!(Flow::Continue, launch(&os(&["false"]), &mut stderr).unwrap());
        assert!(stderr.is_empty());
    }

    #[test]
    fn arguments_are_passed_verbatim() {
        let termination = run("sh", &["-c", "test \"$0\" = '$x*'", "$x*"]);
        assert_eq!(Some(Termination::Exited(0)), termination);
    }

    #[test]
    fn non_utf8_arguments_reach_the_child() {
        let mut stderr = Vec::new();
        let args = [
            OsStr::new("-c"),
            OsStr::new("test \"$0\" = \"$(printf 'caf\\351')\""),
            OsStr::from_bytes(b"caf\xe9"),
        ];
        let termination = run_external(OsStr::new("sh"), &args, &mut stderr).unwrap();
        assert_eq!(Some(Termination::Exited(0)), termination);
        assert!(stderr.is_empty());
    }

    #[test]
    fn signal_termination_is_classified() {
        assert_eq!(Some(Termination::Signaled(9)), run("sh", &["-c", "kill -9 $$"]));
    }

    #[test]
    fn empty_token_list_is_a_no_op() {
        let mut stderr = Vec::new();
        assert_eq!(Flow::Continue, launch(&[], &mut stderr).unwrap());
        assert!(stderr.is_empty());
    }
}
