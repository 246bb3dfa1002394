use std::io::{self, Read, Write};

use log::debug;

use crate::builtins::{self, Flow};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::launcher::launch;
use crate::parser::{split, Tokens};
use crate::reader::LineReader;

pub struct Shell {
    config: ShellConfig,
    reader: LineReader,
}

impl Shell {
    pub fn new() -> Self {
        Shell::with_config(ShellConfig::default())
    }

    pub fn with_config(config: ShellConfig) -> Self {
        Shell {
            reader: LineReader::new(config.line_capacity),
            config,
        }
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.run_with(&mut stdin.lock(), &mut stdout.lock(), &mut stderr.lock())
    }

    /// Prompt, read, split, dispatch until `exit` or end of input.
    pub fn run_with(
        &mut self,
        input: &mut dyn Read,
        stdout_writer: &mut dyn Write,
        stderr_writer: &mut dyn Write,
    ) -> Result<(), ShellError> {
        loop {
            write!(stdout_writer, "{}", self.config.prompt)?;
            stdout_writer.flush()?;

            let line = self.reader.read_line(input)?;
            if line.is_empty() && line.at_eof() {
                debug!("end of input");
                return Ok(());
            }

            let tokens = match split(&line, self.config.token_capacity) {
                Ok(tokens) => tokens,
                Err(err) if !err.is_fatal() => {
                    writeln!(stderr_writer, "dsh: {}", err)?;
                    continue;
                }
                Err(err) => return Err(err),
            };

            let flow = self.execute(&tokens, stdout_writer, stderr_writer)?;
            drop(tokens);

            if flow == Flow::Stop {
                return Ok(());
            }
            if line.at_eof() {
                debug!("end of input after unterminated line");
                return Ok(());
            }
        }
    }

    /// Routes a token list to a builtin or to an external program.
    pub fn execute(
        &self,
        tokens: &Tokens<'_>,
        stdout_writer: &mut dyn Write,
        stderr_writer: &mut dyn Write,
    ) -> io::Result<Flow> {
        let Some(command_name) = tokens.command() else {
            return Ok(Flow::Continue);
        };

        if let Some(builtin) = builtins::lookup(command_name) {
            debug!("builtin {:?} {:?}", command_name, tokens.args());
            let flow = builtin(tokens.as_slice(), stdout_writer, stderr_writer)?;
            stdout_writer.flush()?;
            return Ok(flow);
        }

        // Children write straight to the inherited descriptors.
        stdout_writer.flush()?;
        launch(tokens.as_slice(), stderr_writer)
    }
}
