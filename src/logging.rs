#![cfg(feature = "std")]

//! Stderr logger for the binaries. Stdout carries boards and the JSON
//! summary, so nothing here may write to it.

use std::env;
use std::io::Write;

use log::{LevelFilter, Metadata, Record};

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "BATTLESHIP_SIM_LOG";

struct SimLogger;

impl log::Log for SimLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let module = record
            .target()
            .strip_prefix("battleship_sim::")
            .unwrap_or(record.target());
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{:<5} [{}] {}", record.level(), module, record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: SimLogger = SimLogger;

/// Level for a raw `BATTLESHIP_SIM_LOG` value: `info` when unset or not a
/// level name, case-insensitive otherwise.
pub fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger at the level named by `BATTLESHIP_SIM_LOG`.
/// Returns `false` if another logger was installed first.
pub fn init_logging() -> bool {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref());
    match log::set_logger(&LOGGER) {
        Ok(()) => {
            log::set_max_level(level);
            true
        }
        Err(_) => false,
    }
}
