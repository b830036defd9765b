mod commands;
mod logging;
mod repl;

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

use crate::{
    commands::{Command, run},
    logging::LogLevel,
    repl::Repl,
};

#[derive(Parser, Debug)]
#[command(version, about = "RISC-V CSR instruction encoder and disassembler", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Switch log level.
    #[arg(value_enum, long = "loglevel", global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Also write logs to rotating files in this directory.
    #[arg(long = "log-dir", global = true)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _logger_handle = match logging::init(args.log_level, args.log_dir.as_deref()) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("failed to start logger: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let rst = match args.command {
        Command::Repl => match Repl::new() {
            Ok(mut repl) => {
                repl.run();
                Ok(())
            }
            Err(err) => {
                eprintln!("failed to create line editor: {}", err);
                return ExitCode::FAILURE;
            }
        },
        cmd => run(cmd),
    };

    match rst {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("command failed: {:?}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
