//! Structured logging and tracing for Strømvarsler
//!
//! Console output, optional daily-rolled log files, and JSON formatting on top
//! of `tracing-subscriber`. Initialization happens once per process.

mod level;
mod structured;

pub use level::{parse_log_level, rust_log_directive};
pub use structured::{LogContext, StructuredLogger, get_logger, get_logger_with_context};

use crate::config::LoggingConfig;
use crate::error::{Result, StromError};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Once;
use tracing::{Level, Subscriber, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Keep the non-blocking worker guard alive for the entire process lifetime
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();
static INIT_ONCE: Once = Once::new();
static INIT_ERROR: OnceCell<String> = OnceCell::new();

/// Initialize logging system based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    INIT_ONCE.call_once(|| {
        let init_result = (|| -> Result<()> {
            let level = parse_log_level(&config.level)?;
            let filter = build_env_filter(level);

            if should_use_console_only() || !config.file_output {
                init_console_only_logging(filter, config.json_format, level);
                return Ok(());
            }

            init_file_logging(config, filter, level)
        })();

        if let Err(e) = init_result {
            let _ = INIT_ERROR.set(e.to_string());
        }
    });

    if let Some(err) = INIT_ERROR.get() {
        return Err(StromError::config(err.clone()));
    }
    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| rust_log_directive(level).into())
}

fn should_use_console_only() -> bool {
    cfg!(test) || std::env::var_os("STROMVARSLER_DISABLE_FILE_LOG").is_some()
}

/// One formatting layer; JSON or plain text, filtered to `level`
fn fmt_layer<S, W>(
    writer: W,
    ansi: bool,
    json: bool,
    level: Level,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);
    let filter = LevelFilter::from_level(level);
    if json {
        base.json().with_filter(filter).boxed()
    } else {
        base.with_filter(filter).boxed()
    }
}

fn init_console_only_logging(filter: EnvFilter, json_format: bool, level: Level) {
    // A second init (e.g. from another test binary thread) is not fatal
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(std::io::stderr, true, json_format, level))
        .try_init();

    info!("Logging initialized - level: {:?}, console-only", level);
}

/// Directory receiving rolled files: the parent of `file` when it names a file
fn log_dir(file: &str) -> &Path {
    let p = Path::new(file);
    if p.extension().is_some() {
        p.parent().unwrap_or(p)
    } else {
        p
    }
}

fn init_file_logging(config: &LoggingConfig, filter: EnvFilter, level: Level) -> Result<()> {
    let file_appender = rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix("stromvarsler")
        .filename_suffix("log")
        .max_log_files(config.backup_count.max(1) as usize)
        .build(log_dir(&config.file))
        .map_err(|e| StromError::io(format!("Failed to create log file appender: {}", e)))?;

    let (non_blocking_appender, guard) = non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    let console = config
        .console_output
        .then(|| fmt_layer(std::io::stderr, true, config.json_format, level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(non_blocking_appender, false, config.json_format, level))
        .with(console)
        .try_init()
        .map_err(|e| StromError::config(format!("Failed to install subscriber: {}", e)))?;

    info!(
        "Logging initialized - level: {:?}, file: {}",
        level, config.file
    );
    Ok(())
}
