//! Console logger initialization.

use std::io::Write;
use std::time::Instant;

use once_cell::sync::Lazy;

/// The instant the process started logging; timestamps in log lines are
/// relative to this.
pub static INIT_INSTANT: Lazy<Instant> = Lazy::new(Instant::now);

/// Seconds since [`INIT_INSTANT`].
#[must_use]
pub fn uptime() -> u64 {
    INIT_INSTANT.elapsed().as_secs()
}

/// Initializes the logger.
///
/// Library crates are silenced; only `recital` crates log at the given
/// filter, unless `RUST_LOG` overrides that.
///
/// # Panics
///
/// This must only be called _once_ per process.
pub fn init_logger(filter: log::LevelFilter) {
    let now = Lazy::force(&INIT_INSTANT);

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Off)
        .filter_module("recital_engine", filter)
        .filter_module("recital_storage", filter)
        .parse_default_env()
        .format(move |buf, record| {
            let level = match record.level() {
                log::Level::Error => "E",
                log::Level::Warn => "W",
                log::Level::Info => "I",
                log::Level::Debug => "D",
                log::Level::Trace => "T",
            };
            writeln!(
                buf,
                "| {} | {:>9.3} | {:>30} @ {:<4} | {}",
                level,
                now.elapsed().as_secs_f32(),
                record.file_static().unwrap_or("???"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .init();
}
