use crate::config::build_info;
use crate::config::compile_time::{input, solver};
use crate::grammar::SolverStrategy;

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub strategies: Vec<SolverStrategy>,
    pub max_input_bytes: u64,
    pub max_sequence_length: usize,
    pub large_sequence_threshold: usize,
    pub build_profile: &'static str,
    pub global_logging_enabled: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        let strategies: Vec<&str> = self.strategies.iter().map(|s| s.as_str()).collect();
        format!(
            "RNA Pairing Pipeline:\n\
             - Pipeline Stages: {}\n\
             - Solver Strategies: {}\n\
             - Max Input: {} bytes\n\
             - Max Sequence Length: {}\n\
             - Large Sequence Warning: > {}\n\
             - Build Profile: {}\n\
             - Global Logging: {}",
            self.pipeline_stages,
            strategies.join(", "),
            self.max_input_bytes,
            self.max_sequence_length,
            self.large_sequence_threshold,
            self.build_profile,
            self.global_logging_enabled
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage classifier for sequences up to {} bases ({} profile)",
            self.pipeline_stages, self.max_sequence_length, self.build_profile
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        // input, parse, solve, classify
        pipeline_stages: 4,
        strategies: vec![SolverStrategy::Chart, SolverStrategy::Agenda],
        max_input_bytes: input::MAX_INPUT_BYTES,
        max_sequence_length: input::MAX_SEQUENCE_LENGTH,
        large_sequence_threshold: solver::LARGE_SEQUENCE_THRESHOLD,
        build_profile: build_info::profile(),
        global_logging_enabled: crate::logging::is_initialized(),
    }
}
