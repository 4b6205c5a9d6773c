//! Log levels and events

use super::codes::Code;
use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
use crate::interval::Interval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn to_facade_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

/// One thing that happened while classifying a sequence
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
    pub message: String,
    /// Sequence positions the event is about, e.g. an invalid base
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code: None,
            message: truncate_message(message),
            interval: None,
            context: BTreeMap::new(),
        }
    }

    pub fn with_code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_context(mut self, key: &str, value: impl Into<String>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    /// `[LEVEL] CODE message at [i, j) (k=v, ...)`
    pub fn format(&self) -> String {
        let mut line = format!("[{}]", self.level.as_str());

        if let Some(code) = self.code {
            line.push(' ');
            line.push_str(code.as_str());
        }
        line.push(' ');
        line.push_str(&self.message);

        if let Some(interval) = self.interval {
            line.push_str(&format!(" at {}", interval));
        }

        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            line.push_str(&format!(" ({})", pairs.join(", ")));
        }

        line
    }
}

fn truncate_message(message: &str) -> String {
    match message.char_indices().nth(MAX_LOG_MESSAGE_LENGTH) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_levels_order_by_severity() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(LogLevel::Warning.to_facade_level(), log::Level::Warn);
    }

    #[test]
    fn test_invalid_base_event_format() {
        let event = LogEvent::new(LogLevel::Error, "Sequence contains an invalid base")
            .with_code(codes::sequence::INVALID_BASE)
            .with_interval(Interval::new(3, 4))
            .with_context("character", "T");

        assert_eq!(
            event.format(),
            "[ERROR] E020 Sequence contains an invalid base at [3, 4) (character=T)"
        );
    }

    #[test]
    fn test_uncoded_event_format() {
        let event = LogEvent::new(LogLevel::Debug, "Agenda progress");
        assert_eq!(event.format(), "[DEBUG] Agenda progress");
    }

    #[test]
    fn test_json_omits_empty_fields() {
        let event = LogEvent::new(LogLevel::Warning, "Large sequence")
            .with_code(codes::solver::LARGE_SEQUENCE)
            .with_context("length", "5000");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["level"], "warning");
        assert_eq!(json["code"], "W040");
        assert_eq!(json["context"]["length"], "5000");
        assert!(json.get("interval").is_none());

        let bare = serde_json::to_value(LogEvent::new(LogLevel::Info, "Starting")).unwrap();
        assert!(bare.get("code").is_none());
        assert!(bare.get("context").is_none());
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let event = LogEvent::new(LogLevel::Info, &"A".repeat(MAX_LOG_MESSAGE_LENGTH + 10));
        assert_eq!(event.message.len(), MAX_LOG_MESSAGE_LENGTH + 3);
        assert!(event.message.ends_with("..."));
    }
}
