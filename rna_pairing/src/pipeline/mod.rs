mod error;
mod info;
pub mod output;
mod result;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::{Classification, PipelineResult};
pub use validation::validate_pipeline;

use crate::classifier::classify;
use crate::config::RuntimeConfig;
use crate::grammar::{AlmostPerfectGrammar, PerfectGrammar, Solver, SolverError};
use crate::input::{self, STDIN_SOURCE};
use crate::logging;
use crate::sequence::{Sequence, SequenceParser};
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

/// Solve both grammars in order and read the verdict.
///
/// The almost-perfect table is only built for odd lengths; the perfect table
/// is finished before the almost-perfect pass starts.
pub fn classify_sequence(seq: &Sequence, solver: &Solver) -> Result<Classification, SolverError> {
    let perfect = solver.solve(&PerfectGrammar, seq)?;

    let almost_perfect = if seq.is_even() {
        crate::log_debug!("Even length; almost-perfect pass skipped",
            "length" => seq.len());
        None
    } else {
        Some(solver.solve(&AlmostPerfectGrammar::new(&perfect.table), seq)?)
    };

    let verdict = classify(
        seq.len(),
        &perfect.table,
        almost_perfect.as_ref().map(|s| &s.table),
    );

    Ok(Classification {
        verdict,
        perfect,
        almost_perfect,
    })
}

fn run_stages(
    source: &str,
    line: &str,
    config: &RuntimeConfig,
    start_time: Instant,
) -> Result<PipelineResult, PipelineError> {
    let sequence = SequenceParser::from_preferences(&config.input).parse(line)?;
    let solver = Solver::from_preferences(&config.solver);
    let classification = classify_sequence(&sequence, &solver)?;

    let result = PipelineResult::new(source, sequence, classification, start_time.elapsed());
    result.log_success();
    Ok(result)
}

/// Classify a line of text already in memory
pub fn process_text(
    source: &str,
    text: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_source_context(source, || {
        crate::log_info!("Starting classification", "source" => source);
        run_stages(source, text.trim(), config, start_time)
    })
}

/// Classify the first non-empty line of a reader
pub fn process_reader<R: BufRead>(
    reader: R,
    source: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_source_context(source, || {
        crate::log_info!("Starting classification", "source" => source);
        let line = input::read_sequence_line(reader, source)?;
        run_stages(source, &line, config, start_time)
    })
}

/// Classify the first non-empty line of a file
pub fn process_file(path: &Path, config: &RuntimeConfig) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let source = path.display().to_string();

    logging::with_source_context(source.as_str(), || {
        crate::log_info!("Starting classification", "file" => &source);
        let line = input::read_sequence_file(path)?;
        run_stages(&source, &line, config, start_time)
    })
}

pub fn process_stdin(config: &RuntimeConfig) -> Result<PipelineResult, PipelineError> {
    let stdin = std::io::stdin();
    process_reader(stdin.lock(), STDIN_SOURCE, config)
}
