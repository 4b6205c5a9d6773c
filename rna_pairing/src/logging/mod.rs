//! Process-wide logging for the classifier
//!
//! Events go through one global [`LoggingService`]. Errors and warnings raised
//! while an input source is current are also kept by an [`ErrorCollector`]
//! for the end-of-run report. Nothing is emitted until one of the
//! `init_global_logging*` functions has run.

pub mod codes;
pub mod collector;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::compile_time::logging::{
    LOG_BUFFER_SIZE, MAX_LOG_EVENTS_PER_SOURCE, MAX_LOG_MESSAGE_LENGTH,
};
use crate::config::runtime::LoggingPreferences;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::{Code, CodeInfo, Stage};
pub use collector::{ErrorCollector, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, FacadeLogger, Logger, LoggingService, MemoryLogger, StructuredLogger,
};

struct GlobalLogging {
    service: Arc<LoggingService>,
    collector: ErrorCollector,
    tag_source: bool,
}

static GLOBAL: OnceLock<GlobalLogging> = OnceLock::new();

thread_local! {
    static CURRENT_SOURCE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Install the backend the preferences select
pub fn init_global_logging(preferences: &LoggingPreferences) -> Result<(), String> {
    init_global_logging_with_service(
        Arc::new(LoggingService::from_preferences(preferences)),
        preferences.include_source_context,
    )
}

/// Install a caller-built service; `tag_source` adds the current input as context
pub fn init_global_logging_with_service(
    service: Arc<LoggingService>,
    tag_source: bool,
) -> Result<(), String> {
    GLOBAL
        .set(GlobalLogging {
            service: service.clone(),
            collector: ErrorCollector::new(),
            tag_source,
        })
        .map_err(|_| "Global logging already initialized".to_string())?;

    service.emit(
        &LogEvent::new(LogLevel::Info, "Logging initialized").with_code(codes::system::LOGGING_READY),
    );
    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

/// Whether an event at `level` would go anywhere.
///
/// Errors and warnings always count once logging is up, since the collector
/// keeps them even when the service filters them out.
pub fn enabled(level: LogLevel) -> bool {
    GLOBAL
        .get()
        .is_some_and(|global| level <= LogLevel::Warning || global.service.should_log(level))
}

/// Input source of the classification running on this thread
pub fn current_source() -> Option<String> {
    CURRENT_SOURCE.with(|current| current.borrow().clone())
}

/// Run `f` with `source` as this thread's current input, restoring the previous one
pub fn with_source_context<F, R>(source: impl Into<String>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = CURRENT_SOURCE.with(|current| current.replace(Some(source.into())));
    let result = f();
    CURRENT_SOURCE.with(|current| *current.borrow_mut() = previous);
    result
}

/// Back end of the logging macros
pub fn emit(mut event: LogEvent) {
    let Some(global) = GLOBAL.get() else {
        return;
    };

    let source = current_source();
    if let Some(source) = &source {
        if global.tag_source {
            event = event.with_context("source", source.as_str());
        }
        if event.level <= LogLevel::Warning {
            global.collector.record(source, event.clone());
        }
    }

    global.service.emit(&event);
}

pub fn processing_summary() -> ProcessingSummary {
    GLOBAL
        .get()
        .map(|global| global.collector.summary())
        .unwrap_or_default()
}

/// Cargo-style report of the collected errors and warnings
pub fn format_error_summary() -> String {
    GLOBAL
        .get()
        .map(|global| global.collector.render())
        .unwrap_or_default()
}

pub fn system_diagnostics() -> String {
    let mut out = String::from("=== Logging ===\n");

    match GLOBAL.get() {
        Some(global) => {
            let summary = global.collector.summary();
            out.push_str(&format!("Minimum level: {:?}\n", global.service.min_level()));
            out.push_str(&format!("Source tagging: {}\n", global.tag_source));
            out.push_str(&format!(
                "Collected: {}/{} events from {} source(s), {} not kept\n",
                global.collector.stored(),
                LOG_BUFFER_SIZE,
                summary.sources,
                summary.dropped
            ));
        }
        None => out.push_str("Not initialized\n"),
    }

    out.push_str(&format!(
        "Limits: {} events per source, messages cut at {} chars\n\n",
        MAX_LOG_EVENTS_PER_SOURCE, MAX_LOG_MESSAGE_LENGTH
    ));
    out.push_str(&crate::config::build_info::source_info());
    out.push('\n');
    out
}
