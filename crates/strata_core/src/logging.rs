//! Logging setup
//!
//! Everything logs through the `tracing` facade. The subscriber never writes
//! to stdout, which belongs to the REPL: it goes to stderr, or to daily
//! rolling files when `log_dir` is configured. The filter comes from
//! `STRATA_LOG` (e.g. `STRATA_LOG=strata_core=debug`), defaulting to `warn`.

use crate::settings::ShellSettings;

pub const LOG_ENV: &str = "STRATA_LOG";
#[cfg(not(feature = "minimal-logging"))]
const DEFAULT_FILTER: &str = "warn";

/// Keeps the non-blocking file writer alive; hold it until the process exits.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    #[cfg(not(feature = "minimal-logging"))]
    _worker: Option<tracing_appender::non_blocking::WorkerGuard>,
}

#[cfg(feature = "minimal-logging")]
pub fn init(_settings: &ShellSettings) -> LogGuard {
    LogGuard {}
}

#[cfg(not(feature = "minimal-logging"))]
pub fn init(settings: &ShellSettings) -> LogGuard {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match &settings.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "strata.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            // A subscriber may already be installed (tests); keep the existing one.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            LogGuard { _worker: Some(guard) }
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            LogGuard { _worker: None }
        }
    }
}
