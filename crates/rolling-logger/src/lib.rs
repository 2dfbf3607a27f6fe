//! Rolling Logger
//!
//! A `log` backend that keeps the most recent formatted lines in a circular
//! buffer. Every line is mirrored to the browser console on wasm32 and to
//! stderr on other targets.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use thiserror::Error;

/// Number of lines kept when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

/// Logger with a bounded in-memory history
pub struct RollingLogger {
    level: LevelFilter,
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl RollingLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            level,
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Copy of the buffered lines, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    fn push(&self, line: String) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(Utc::now(), record.level(), record.target(), record.args());
        emit(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

/// Handle to the installed global logger
#[derive(Clone, Copy)]
pub struct LogHandle(&'static RollingLogger);

impl LogHandle {
    pub fn snapshot(&self) -> Vec<String> {
        self.0.snapshot()
    }
}

/// Install the global logger. Fails if another logger was installed first.
pub fn init(level: LevelFilter, capacity: usize) -> Result<LogHandle, InitError> {
    let logger: &'static RollingLogger = Box::leak(Box::new(RollingLogger::new(level, capacity)));
    log::set_logger(logger).map_err(|_| InitError::AlreadyInstalled)?;
    log::set_max_level(level);
    Ok(LogHandle(logger))
}

/// `<timestamp> <LEVEL> <target>: <message>`
pub fn format_line(at: DateTime<Utc>, level: Level, target: &str, args: &fmt::Arguments) -> String {
    format!("{} {:<5} {}: {}", at.format("%Y-%m-%dT%H:%M:%S%.3fZ"), level, target, args)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_at<'a>(level: Level, args: fmt::Arguments<'a>) -> Record<'a> {
        Record::builder()
            .level(level)
            .target("relief")
            .args(args)
            .build()
    }

    #[test]
    fn test_format_line() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let line = format_line(at, Level::Warn, "relief::api", &format_args!("[API] {} failed", "GET"));
        assert_eq!(line, "2024-03-09T14:05:07.000Z WARN  relief::api: [API] GET failed");
    }

    #[test]
    fn test_buffer_keeps_latest_lines() {
        let logger = RollingLogger::new(LevelFilter::Debug, 3);
        for i in 0..5 {
            logger.log(&record_at(Level::Info, format_args!("line {}", i)));
        }

        let lines = logger.snapshot();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("line 2"));
        assert!(lines[2].ends_with("line 4"));
    }

    #[test]
    fn test_level_filter() {
        let logger = RollingLogger::new(LevelFilter::Warn, 10);
        logger.log(&record_at(Level::Info, format_args!("ignored")));
        logger.log(&record_at(Level::Debug, format_args!("ignored too")));
        logger.log(&record_at(Level::Error, format_args!("kept")));

        let lines = logger.snapshot();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let logger = RollingLogger::new(LevelFilter::Info, 0);
        logger.log(&record_at(Level::Info, format_args!("a")));
        logger.log(&record_at(Level::Info, format_args!("b")));

        assert_eq!(logger.snapshot().len(), 1);
    }
}
