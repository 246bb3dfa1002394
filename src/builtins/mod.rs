use std::env;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;

use log::debug;

/// Whether the read loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Receives the full token list, token 0 included.
pub type BuiltinFn = fn(&[&OsStr], &mut dyn Write, &mut dyn Write) -> io::Result<Flow>;

/// Checked in order, first exact match wins.
static BUILTINS: &[(&str, BuiltinFn)] = &[
    ("cd", builtin_cd),
    ("help", builtin_help),
    ("exit", builtin_exit),
];

/// Matches on the raw bytes of token 0, case-sensitively.
pub fn lookup(name: &OsStr) -> Option<BuiltinFn> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| name == *builtin)
        .map(|(_, handler)| *handler)
}

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

fn builtin_cd(
    parts: &[&OsStr],
    _stdout_writer: &mut dyn Write,
    stderr_writer: &mut dyn Write,
) -> io::Result<Flow> {
    let Some(target) = parts.get(1) else {
        writeln!(stderr_writer, "dsh: expected argument to \"cd\"")?;
        return Ok(Flow::Continue);
    };

    let target = Path::new(target);
    match env::set_current_dir(target) {
        Ok(()) => debug!("cwd is now {}", target.display()),
        Err(err) => writeln!(stderr_writer, "dsh: cd: {}: {}", target.display(), err)?,
    }

    Ok(Flow::Continue)
}

fn builtin_help(
    _parts: &[&OsStr],
    stdout_writer: &mut dyn Write,
    _stderr_writer: &mut dyn Write,
) -> io::Result<Flow> {
    writeln!(stdout_writer, "Dhruva's DSH")?;
    writeln!(stdout_writer, "Type program names and arguments, and hit enter.")?;
    writeln!(stdout_writer, "The following are built in:")?;
    for name in builtin_names() {
        writeln!(stdout_writer, "  {}", name)?;
    }
    writeln!(
        stdout_writer,
        "Use the man command for information on other programs."
    )?;
    Ok(Flow::Continue)
}

fn builtin_exit(
    _parts: &[&OsStr],
    _stdout_writer: &mut dyn Write,
    _stderr_writer: &mut dyn Write,
) -> io::Result<Flow> {
    Ok(Flow::Stop)
}
