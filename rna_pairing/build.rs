// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    input: InputLimits,
    solver: SolverLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct InputLimits {
    max_input_bytes: u64,
    max_sequence_length: usize,
}

#[derive(serde::Deserialize)]
struct SolverLimits {
    large_sequence_threshold: usize,
    progress_log_interval: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_events_per_source: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RNA_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=RNA_CONFIG_DIR");

    let profile = env::var("RNA_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("RNA_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of rna_pairing directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_INPUT_BYTES: u64 = 100_000_000;
    const ABSOLUTE_MAX_SEQUENCE_LENGTH: usize = 100_000;

    if config.input.max_input_bytes > ABSOLUTE_MAX_INPUT_BYTES {
        panic!("LIMITS: max_input_bytes exceeds absolute maximum");
    }

    if config.input.max_sequence_length == 0 {
        panic!("LIMITS: max_sequence_length must be positive");
    }

    if config.input.max_sequence_length > ABSOLUTE_MAX_SEQUENCE_LENGTH {
        panic!("LIMITS: max_sequence_length exceeds absolute maximum");
    }

    if config.input.max_sequence_length as u64 > config.input.max_input_bytes {
        panic!("LIMITS: max_sequence_length cannot exceed max_input_bytes");
    }

    if config.solver.progress_log_interval == 0 {
        panic!("LIMITS: progress_log_interval must be positive");
    }

    if config.logging.max_log_events_per_source > config.logging.log_buffer_size {
        panic!("LIMITS: max_log_events_per_source exceeds log_buffer_size");
    }

    if profile == "production" && config.input.max_sequence_length > 20_000 {
        panic!("PRODUCTION: max_sequence_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod input {{
        pub const MAX_INPUT_BYTES: u64 = {};
        pub const MAX_SEQUENCE_LENGTH: usize = {};
    }}

    pub mod solver {{
        pub const LARGE_SEQUENCE_THRESHOLD: usize = {};
        pub const PROGRESS_LOG_INTERVAL: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_EVENTS_PER_SOURCE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        // Input
        config.input.max_input_bytes,
        config.input.max_sequence_length,
        // Solver
        config.solver.large_sequence_threshold,
        config.solver.progress_log_interval,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_events_per_source,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
