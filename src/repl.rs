use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};

use crate::commands::{self, Command, CliError};

#[derive(Debug, Parser)]
#[command(multicall = true)]
enum Cli {
    #[command(flatten)]
    Run(Command),

    /// Quit the shell
    #[command(name = "quit", aliases = ["q", "exit"])]
    Quit,
}

const PROMPT: &str = "(csr) ";

#[derive(thiserror::Error, Debug)]
enum ReplError {
    #[error("{0}")]
    Usage(#[from] clap::Error),
    #[error(transparent)]
    Command(#[from] CliError),
}

pub struct Repl {
    editor: DefaultEditor,
}

impl Repl {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Repl {
            editor: DefaultEditor::new()?,
        })
    }

    pub fn run(&mut self) {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Err(err) = self.editor.add_history_entry(line) {
                        log::warn!("failed to record history: {}", err);
                    }

                    match respond(line) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(err) => eprintln!("{}", err),
                    }
                }

                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    break;
                }

                Err(ex) => {
                    eprintln!("Error occurred while reading line: {}", ex);
                    break;
                }
            }
        }
    }
}

/// Returns `Ok(true)` when the shell should exit.
fn respond(line: &str) -> Result<bool, ReplError> {
    let argv = line.split_whitespace();
    match Cli::try_parse_from(argv)? {
        Cli::Run(cmd) => {
            commands::run(cmd)?;
            Ok(false)
        }
        Cli::Quit => Ok(true),
    }
}
