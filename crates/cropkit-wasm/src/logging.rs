//! `log` backend that writes to the browser console.
//!
//! cropkit-core reports recoverable failures through the `log` facade. The
//! logger is installed by `init()` at `warn` level; call
//! `set_log_level("debug")` to also see capture and crop progress.

use std::str::FromStr;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level.trim()).ok()
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn install(level: LevelFilter) {
    // set_logger fails once a logger is in place; the level still applies
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Set the console log level: "off", "error", "warn", "info", "debug" or "trace".
///
/// Returns `false` for an unknown level name.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match parse_level(level) {
        Some(filter) => {
            install(filter);
            true
        }
        None => false,
    }
}
