//! Logger backends and the level-filtering service in front of them
//!
//! Backends write to stderr or memory; stdout carries only the verdict.

use super::events::{LogEvent, LogLevel};
use crate::config::compile_time::logging::LOG_BUFFER_SIZE;
use crate::config::runtime::LoggingPreferences;
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Structured JSON wins over console text; otherwise events go to `log`
    pub fn from_preferences(preferences: &LoggingPreferences) -> Self {
        let logger: Arc<dyn Logger> = if preferences.use_structured_logging {
            Arc::new(StructuredLogger)
        } else if preferences.enable_console_logging {
            Arc::new(ConsoleLogger)
        } else {
            Arc::new(FacadeLogger::default())
        };
        Self::new(logger, preferences.min_log_level)
    }

    pub fn facade(min_level: LogLevel) -> Self {
        Self::new(Arc::new(FacadeLogger::default()), min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn emit(&self, event: &LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(event);
        }
    }
}

/// Plain text lines on stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event.format());
    }
}

/// One JSON object per line on stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match serde_json::to_string(event) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", event.format()),
        }
    }
}

/// Hands events to the `log` facade so the host's logger renders them
pub struct FacadeLogger {
    target: &'static str,
}

impl Default for FacadeLogger {
    fn default() -> Self {
        Self {
            target: "rna_pairing",
        }
    }
}

impl Logger for FacadeLogger {
    fn log(&self, event: &LogEvent) {
        log::log!(
            target: self.target,
            event.level.to_facade_level(),
            "{}",
            event.format()
        );
    }
}

/// Keeps the most recent events in memory
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    /// Events logged while `source` was the current input
    pub fn events_for_source(&self, source: &str) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.context.get("source").map(String::as_str) == Some(source))
            .cloned()
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        if events.len() >= LOG_BUFFER_SIZE {
            events.remove(0);
        }
        events.push(event.clone());
    }
}
