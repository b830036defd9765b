use std::path::Path;

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
    WriteMode, detailed_format,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn spec(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Initialize the logger.
/// Must keep the [`LoggerHandle`] (returned value) alive up to the very end of your program
/// to ensure that all buffered log lines are flushed out.
///
/// Without `log_dir` everything goes to stderr. With it, the full log is written to
/// rotating files and only warnings are duplicated to stderr.
pub fn init(level: LogLevel, log_dir: Option<&Path>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_str(level.spec())?;

    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(dir)
                    .basename("csrasm")
                    .suffix("log"),
            )
            .rotate(
                Criterion::Size(10_000_000), // 10 MB
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .duplicate_to_stderr(Duplicate::Warn)
            .format_for_files(detailed_format),
        None => logger.log_to_stderr(),
    };

    logger.start()
}
