//! Logger setup for the `seo_suite` binary.

use std::io::Write;

use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies whose logs are capped regardless of the requested level.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("sqlx", LevelFilter::Info),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
];

/// Installs the global `env_logger` logger.
///
/// `RUST_LOG` is read first so per-module directives keep working; `level` then
/// sets the default and the level of this crate. Parser and HTTP internals are
/// capped (see `QUIET_MODULES`) so `--log-level trace` stays readable.
///
/// ```bash
/// RUST_LOG=seo_suite::history=trace seo_suite --log-level info bulk articles.json
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` when a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in QUIET_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module(env!("CARGO_PKG_NAME"), level);

    match format {
        LogFormat::Json => builder.format(write_json),
        LogFormat::Plain => builder.format(write_plain),
    };

    builder.try_init().map_err(InitializationError::from)
}

fn write_plain(buf: &mut Formatter, record: &Record<'_>) -> std::io::Result<()> {
    let (marker, level) = match record.level() {
        Level::Error => ("❌", "ERROR".red()),
        Level::Warn => ("⚠️", "WARN".yellow()),
        Level::Info => ("✔️", "INFO".green()),
        Level::Debug => ("🔍", "DEBUG".blue()),
        Level::Trace => ("🔬", "TRACE".purple()),
    };
    writeln!(
        buf,
        "{} {} [{}] {}",
        marker,
        record.target().cyan(),
        level,
        record.args()
    )
}

/// One JSON object per line: `ts` (ms since epoch), `level`, `target`, `msg`.
fn write_json(buf: &mut Formatter, record: &Record<'_>) -> std::io::Result<()> {
    let line = serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        // Only the first initialization in a process succeeds.
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_quiet_modules_never_exceed_requested_level() {
        for (_, cap) in QUIET_MODULES {
            assert!((*cap).min(LevelFilter::Warn) <= LevelFilter::Warn);
            assert!(*cap <= LevelFilter::Info);
        }
    }
}
