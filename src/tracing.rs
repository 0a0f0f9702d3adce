//! Logging setup
//!
//! The console follows `RUST_LOG` (`warn` when unset), for example
//! `RUST_LOG=clockface::render=trace`. The log file in
//! [`config_paths::logs_dir`](crate::config_paths::logs_dir) rotates daily
//! and always records clockface at debug level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE_PREFIX: &str = "clockface.log";

const CONSOLE_DEFAULT_FILTER: &str = "warn";

/// winit and softbuffer stay at warn in the file
const FILE_FILTER: &str = "warn,clockface=debug";

/// Flushes the log file when dropped; hold it for the life of the process
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(CONSOLE_DEFAULT_FILTER))
}

/// Install the console and file subscribers
pub fn init() -> LogGuard {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter());

    let (file_layer, guard, file_error) = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new(FILE_FILTER));
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("File logging disabled: {}", e);
    }
    LogGuard { _file: guard }
}
