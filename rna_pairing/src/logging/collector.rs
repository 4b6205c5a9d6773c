//! Errors and warnings kept per input source for the end-of-run report

use super::events::{LogEvent, LogLevel};
use crate::config::compile_time::logging::{LOG_BUFFER_SIZE, MAX_LOG_EVENTS_PER_SOURCE};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub sources: usize,
    pub failed_sources: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Events past the per-source or total cap
    pub dropped: usize,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }
}

#[derive(Default)]
struct Collected {
    by_source: BTreeMap<String, Vec<LogEvent>>,
    stored: usize,
    dropped: usize,
}

#[derive(Default)]
pub struct ErrorCollector {
    inner: Mutex<Collected>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collected> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Keep an error or warning for `source`; other levels are ignored
    pub fn record(&self, source: &str, event: LogEvent) {
        if event.level > LogLevel::Warning {
            return;
        }

        let mut guard = self.lock();
        let collected = &mut *guard;
        let full = collected.stored >= LOG_BUFFER_SIZE;
        let events = collected.by_source.entry(source.to_string()).or_default();

        if full || events.len() >= MAX_LOG_EVENTS_PER_SOURCE {
            collected.dropped += 1;
        } else {
            events.push(event);
            collected.stored += 1;
        }
    }

    pub fn events_for(&self, source: &str) -> Vec<LogEvent> {
        self.lock().by_source.get(source).cloned().unwrap_or_default()
    }

    pub fn stored(&self) -> usize {
        self.lock().stored
    }

    pub fn summary(&self) -> ProcessingSummary {
        let collected = self.lock();
        let mut summary = ProcessingSummary {
            sources: collected.by_source.len(),
            dropped: collected.dropped,
            ..Default::default()
        };

        for events in collected.by_source.values() {
            let errors = events.iter().filter(|e| e.level == LogLevel::Error).count();
            if errors > 0 {
                summary.failed_sources += 1;
            }
            summary.errors += errors;
            summary.warnings += events.len() - errors;
        }

        summary
    }

    /// Cargo-style report, one block per source
    pub fn render(&self) -> String {
        let mut out = String::new();

        {
            let collected = self.lock();
            for (source, events) in &collected.by_source {
                for event in events {
                    render_event(&mut out, source, event);
                }
            }
        }

        let summary = self.summary();
        if summary.has_errors() || summary.has_warnings() {
            out.push_str(&format!(
                "{} error(s), {} warning(s) across {} source(s)",
                summary.errors, summary.warnings, summary.sources
            ));
            if summary.dropped > 0 {
                out.push_str(&format!("; {} more not kept", summary.dropped));
            }
            out.push('\n');
        }

        out
    }
}

fn render_event(out: &mut String, source: &str, event: &LogEvent) {
    let label = if event.level == LogLevel::Error {
        "error"
    } else {
        "warning"
    };

    match event.code {
        Some(code) => out.push_str(&format!("{}[{}]: {}\n", label, code, event.message)),
        None => out.push_str(&format!("{}: {}\n", label, event.message)),
    }

    // 1-based column of the first base involved
    match event.interval {
        Some(interval) => out.push_str(&format!("  --> {}:{}\n", source, interval.start + 1)),
        None => out.push_str(&format!("  --> {}\n", source)),
    }

    for (key, value) in event.context.iter().filter(|(key, _)| *key != "source") {
        out.push_str(&format!("  = {}: {}\n", key, value));
    }

    if let Some(hint) = event.code.and_then(|code| code.hint()) {
        out.push_str(&format!("  = help: {}\n", hint));
    }
}
