//! Logging setup shared by all commands.

use crate::Result;
use camino::Utf8Path;
use clap::ValueEnum;
use ohno::IntoAppError;
use std::fs::OpenOptions;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    #[value(alias = "0")]
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    #[value(alias = "1")]
    Info,

    /// Debug, info, warning, and error messages
    #[value(alias = "2")]
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    const fn filter(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Error => Some("error"),
            Self::Warn => Some("warn"),
            Self::Info => Some("info"),
            Self::Debug => Some("debug"),
            Self::Trace => Some("trace"),
        }
    }
}

/// Install the global logger.
///
/// With a log file, records are appended to it instead of going to stderr. `RUST_LOG` refines the
/// level when set. Installing a second logger in the same process is a no-op.
pub fn init_logging(log_level: LogLevel, log_file: Option<&Utf8Path>) -> Result<()> {
    let Some(level) = log_level.filter() else {
        return Ok(());
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);
    let mut builder = env_logger::Builder::from_env(env);
    let _ = builder
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .into_app_err_with(|| format!("opening log file '{path}'"))?;

        let _ = builder.target(env_logger::Target::Pipe(Box::new(file))).write_style(env_logger::WriteStyle::Never);
    } else {
        let _ = builder.format_timestamp(None);
    }

    let _ = builder.try_init();
    Ok(())
}
