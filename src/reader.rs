use std::io::{self, Read};

use bytes::Bytes;
use log::{debug, trace};

use crate::error::ShellError;

/// One line of raw input, without its terminating newline.
#[derive(Debug, Clone)]
pub struct Line {
    text: Bytes,
    capacity: usize,
    eof: bool,
}

impl Line {
    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Size the buffer had reached when the line was complete.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when the stream ended before a newline was seen.
    pub fn at_eof(&self) -> bool {
        self.eof
    }
}

pub struct LineReader {
    increment: usize,
}

impl LineReader {
    pub fn new(increment: usize) -> Self {
        LineReader {
            increment: increment.max(1),
        }
    }

    /// Reads bytes until `\n` or end of stream. The buffer starts at `increment`
    /// bytes and grows by exactly that much whenever it fills up.
    pub fn read_line<R: Read + ?Sized>(&self, input: &mut R) -> Result<Line, ShellError> {
        let mut buffer: Vec<u8> = Vec::new();
        self.grow(&mut buffer)?;
        let mut byte = [0u8; 1];

        let eof = loop {
            match input.read(&mut byte) {
                Ok(0) => break true,
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }

            if byte[0] == b'\n' {
                break false;
            }

            if buffer.len() == buffer.capacity() {
                self.grow(&mut buffer)?;
                trace!("line buffer grown to {} bytes", buffer.capacity());
            }
            buffer.push(byte[0]);
        };

        let line = Line {
            capacity: buffer.capacity(),
            text: Bytes::from(buffer),
            eof,
        };
        debug!(
            "read {} bytes into a {} byte buffer (eof: {})",
            line.text.len(),
            line.capacity(),
            line.at_eof()
        );
        Ok(line)
    }

    fn grow(&self, buffer: &mut Vec<u8>) -> Result<(), ShellError> {
        let wanted = buffer.capacity() + self.increment;
        buffer
            .try_reserve_exact(self.increment)
            .map_err(|_| ShellError::Allocation {
                what: "line buffer",
                capacity: wanted,
            })
    }
}
