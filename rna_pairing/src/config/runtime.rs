// RUNTIME PREFERENCES (User Experience)

use crate::grammar::SolverStrategy;
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputPreferences {
    /// Accept lower-case bases and normalize them to upper case
    pub accept_lowercase: bool,

    /// Whether to report per-base composition in logs
    pub log_composition: bool,
}

impl Default for InputPreferences {
    fn default() -> Self {
        Self {
            accept_lowercase: env_flag(env_vars::INPUT_ACCEPT_LOWERCASE, true),
            log_composition: env_flag(env_vars::INPUT_LOG_COMPOSITION, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverPreferences {
    /// Fixed-point strategy used to populate the derivability tables
    pub strategy: SolverStrategy,

    /// Run both strategies and fail if their tables disagree
    pub verify_strategies: bool,

    /// Whether chart sweeps log periodic progress
    pub log_progress: bool,
}

impl Default for SolverPreferences {
    fn default() -> Self {
        Self {
            strategy: env::var(env_vars::SOLVER_STRATEGY)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            verify_strategies: env_flag(env_vars::SOLVER_VERIFY, false),
            log_progress: env_flag(env_vars::SOLVER_LOG_PROGRESS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output (stderr)
    pub enable_console_logging: bool,

    /// Minimum level that reaches the configured logger
    pub min_log_level: LogLevel,

    /// Whether to tag events with the input source they belong to
    pub include_source_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_source_context: env_flag(env_vars::LOGGING_INCLUDE_SOURCE_CONTEXT, true),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub input: InputPreferences,
    pub solver: SolverPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Input
    pub const INPUT_ACCEPT_LOWERCASE: &str = "RNA_INPUT_ACCEPT_LOWERCASE";
    pub const INPUT_LOG_COMPOSITION: &str = "RNA_INPUT_LOG_COMPOSITION";

    // Solver
    pub const SOLVER_STRATEGY: &str = "RNA_SOLVER_STRATEGY";
    pub const SOLVER_VERIFY: &str = "RNA_SOLVER_VERIFY";
    pub const SOLVER_LOG_PROGRESS: &str = "RNA_SOLVER_LOG_PROGRESS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "RNA_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "RNA_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "RNA_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_SOURCE_CONTEXT: &str = "RNA_LOGGING_INCLUDE_SOURCE_CONTEXT";
}
