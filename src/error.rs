use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("allocation failure while growing {what} to {capacity} slots")]
    Allocation { what: &'static str, capacity: usize },

    /// Only raised where program arguments must be Unicode.
    #[cfg(not(unix))]
    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Fatal errors end the read loop; everything else only voids the current line.
    pub fn is_fatal(&self) -> bool {
        match self {
            #[cfg(not(unix))]
            ShellError::InvalidUtf8 => false,
            ShellError::Allocation { .. } | ShellError::Io(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_and_io_are_fatal() {
        assert!(ShellError::Allocation {
            what: "line buffer",
            capacity: 2048
        }
        .is_fatal());
        assert!(ShellError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "gone")).is_fatal());
    }

    #[cfg(not(unix))]
    #[test]
    fn bad_input_is_recoverable() {
        assert!(!ShellError::InvalidUtf8.is_fatal());
    }

    #[test]
    fn allocation_message_names_the_buffer() {
        let err = ShellError::Allocation {
            what: "token list",
            capacity: 128,
        };
        assert_eq!(
            "allocation failure while growing token list to 128 slots",
            err.to_string()
        );
    }
}
