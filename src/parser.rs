use std::ffi::OsStr;

use log::{debug, trace};

use crate::error::ShellError;
use crate::reader::Line;

pub const DELIMITERS: &[u8] = b" \t\r\n\x07";

/// Whitespace-separated words of a single line, borrowed from that line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tokens<'a> {
    items: Vec<&'a OsStr>,
}

impl<'a> Tokens<'a> {
    /// Token 0; `None` when the line held no words.
    pub fn command(&self) -> Option<&'a OsStr> {
        self.items.first().copied()
    }

    pub fn args(&self) -> &[&'a OsStr] {
        self.items.get(1..).unwrap_or(&[])
    }

    pub fn as_slice(&self) -> &[&'a OsStr] {
        &self.items
    }
}

pub fn split(line: &Line, increment: usize) -> Result<Tokens<'_>, ShellError> {
    tokenize(line.as_bytes(), increment)
}

/// Splits on runs of delimiters. The token list grows `increment` slots at a time.
pub fn tokenize(input: &[u8], increment: usize) -> Result<Tokens<'_>, ShellError> {
    let increment = increment.max(1);
    let mut items: Vec<&OsStr> = Vec::new();

    for word in input
        .split(|byte| DELIMITERS.contains(byte))
        .filter(|word| !word.is_empty())
    {
        if items.len() == items.capacity() {
            let wanted = items.capacity() + increment;
            items
                .try_reserve_exact(increment)
                .map_err(|_| ShellError::Allocation {
                    what: "token list",
                    capacity: wanted,
                })?;
            trace!("token list grown to {} slots", items.capacity());
        }
        items.push(word_to_os_str(word)?);
    }

    debug!("tokens: {:?}", items);
    Ok(Tokens { items })
}

#[cfg(unix)]
fn word_to_os_str(word: &[u8]) -> Result<&OsStr, ShellError> {
    use std::os::unix::ffi::OsStrExt;
    Ok(OsStr::from_bytes(word))
}

#[cfg(not(unix))]
fn word_to_os_str(word: &[u8]) -> Result<&OsStr, ShellError> {
    std::str::from_utf8(word)
        .map(OsStr::new)
        .map_err(|_| ShellError::InvalidUtf8)
}
