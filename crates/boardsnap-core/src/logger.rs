//! Minimal stderr logger for the `log` facade.
//!
//! Prints `[elapsed LEVEL target] message`. Install once at startup with
//! [`init_with_level`], or [`init_from_env`] to read `BOARDSNAP_LOG`.

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable read by [`init_from_env`].
pub const LOG_ENV: &str = "BOARDSNAP_LOG";

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Parse a level name (`off`, `error`, ... `trace`), falling back to `default`.
pub fn level_from_str(raw: Option<&str>, default: LevelFilter) -> LevelFilter {
    raw.and_then(|s| LevelFilter::from_str(s.trim()).ok())
        .unwrap_or(default)
}

/// Install the stderr logger at the level named by `BOARDSNAP_LOG` (default `warn`).
pub fn init_from_env() -> Result<(), log::SetLoggerError> {
    let raw = std::env::var(LOG_ENV).ok();
    init_with_level(level_from_str(raw.as_deref(), LevelFilter::Warn))
}

/// Install a `tracing` fmt subscriber on stderr, filtered by `RUST_LOG`
/// (default `info`). `json` switches to flattened JSON events.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder.finish().try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(level_from_str(Some("DEBUG"), LevelFilter::Warn), LevelFilter::Debug);
        assert_eq!(level_from_str(Some(" off "), LevelFilter::Warn), LevelFilter::Off);
        assert_eq!(level_from_str(Some("loud"), LevelFilter::Warn), LevelFilter::Warn);
        assert_eq!(level_from_str(None, LevelFilter::Info), LevelFilter::Info);
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        init_with_level(LevelFilter::Error).expect("first init");
        init_with_level(LevelFilter::Trace).expect("second init");
    }
}
