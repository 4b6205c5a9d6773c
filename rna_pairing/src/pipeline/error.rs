use crate::grammar::SolverError;
use crate::input::InputError;
use crate::logging::{codes, Code};
use crate::sequence::SequenceError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input failed: {0}")]
    Input(#[from] InputError),

    #[error("Sequence rejected: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Solver failed: {0}")]
    Solver(#[from] SolverError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::Input(e) => e.error_code(),
            PipelineError::Sequence(e) => e.error_code(),
            PipelineError::Solver(e) => e.error_code(),
            PipelineError::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}
