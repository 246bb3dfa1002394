mod builtins;
mod config;
mod error;
mod launcher;
mod parser;
mod reader;
mod shell;

use std::process::ExitCode;

use anyhow::Context;

use crate::shell::Shell;

fn run() -> anyhow::Result<()> {
    let mut shell = Shell::new();
    shell.run().context("shell loop aborted")
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dsh: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
