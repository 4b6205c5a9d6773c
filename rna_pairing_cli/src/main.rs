//! # RNA Pairing CLI
//!
//! Prints exactly one line on stdout: the verdict, or its JSON form with
//! `--json`. Everything else goes to stderr.

use clap::{ArgAction, Parser};
use rna_pairing::config::{LoggingPreferences, RuntimeConfig};
use rna_pairing::logging::{self, LogLevel, LoggingService};
use rna_pairing::pipeline::{self, PipelineError, PipelineOutput, PipelineResult};
use rna_pairing::SolverStrategy;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "rna-pairing", version)]
#[command(about = "Classify an RNA sequence as perfect, almost perfect or imperfect")]
struct Args {
    /// File whose first non-empty line is the sequence; omit or use `-` for stdin
    path: Option<PathBuf>,

    /// Fixed-point strategy: chart or agenda
    #[arg(long, value_name = "STRATEGY")]
    strategy: Option<SolverStrategy>,

    /// Run both strategies and fail if their tables differ
    #[arg(long)]
    verify: bool,

    /// Print the result as one line of JSON
    #[arg(long)]
    json: bool,

    /// Print logging and configuration diagnostics to stderr
    #[arg(long)]
    diagnostics: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = build_config(&args);

    if let Err(e) = init_logging(args.verbose, &config.logging) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let status = match run(&args, &config) {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error[{}]: {}", e.error_code(), e);
            ExitCode::FAILURE
        }
    };

    if args.diagnostics {
        print_diagnostics();
    }

    status
}

fn level_for(verbose: u8) -> (log::LevelFilter, LogLevel) {
    match verbose {
        0 => (log::LevelFilter::Warn, LogLevel::Warning),
        1 => (log::LevelFilter::Info, LogLevel::Info),
        _ => (log::LevelFilter::Debug, LogLevel::Debug),
    }
}

/// `env_logger` renders library events unless JSON or console output is requested
fn init_logging(verbose: u8, preferences: &LoggingPreferences) -> Result<(), String> {
    if preferences.use_structured_logging || preferences.enable_console_logging {
        return logging::init_global_logging(preferences);
    }

    let (filter, level) = level_for(verbose);
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .try_init()
        .map_err(|e| e.to_string())?;

    logging::init_global_logging_with_service(
        Arc::new(LoggingService::facade(level)),
        preferences.include_source_context,
    )
}

fn build_config(args: &Args) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    if let Some(strategy) = args.strategy {
        config.solver.strategy = strategy;
    }
    if args.verify {
        config.solver.verify_strategies = true;
    }
    config
}

fn run(args: &Args, config: &RuntimeConfig) -> Result<String, PipelineError> {
    let result = match args.path.as_deref() {
        Some(path) if path != Path::new("-") => pipeline::process_file(path, config)?,
        _ => pipeline::process_stdin(config)?,
    };

    render(&result, args.json)
}

fn render(result: &PipelineResult, json: bool) -> Result<String, PipelineError> {
    if json {
        PipelineOutput::from(result)
            .to_json()
            .map_err(|e| PipelineError::pipeline_error(&format!("JSON serialization failed: {}", e)))
    } else {
        Ok(result.verdict().to_string())
    }
}

fn print_diagnostics() {
    eprintln!("{}", pipeline::get_pipeline_info().report());
    eprintln!();

    match pipeline::validate_pipeline() {
        Ok(()) => eprintln!("Pipeline self-check: ok"),
        Err(e) => eprintln!("Pipeline self-check failed: {}", e),
    }
    eprintln!();

    eprint!("{}", logging::system_diagnostics());

    let summary = logging::processing_summary();
    if summary.has_errors() || summary.has_warnings() {
        eprint!("{}", logging::format_error_summary());
    }
}
