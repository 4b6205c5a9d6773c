// Internal modules
pub mod classifier;
pub mod config;
pub mod grammar;
pub mod input;
pub mod interval;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod sequence;

// Re-export key types for library consumers
pub use classifier::{classify, Verdict};
pub use grammar::{Solver, SolverStrategy};
pub use interval::{Interval, IntervalTable};
pub use pipeline::{PipelineError, PipelineResult};
pub use sequence::{Base, Sequence};

// Re-export pipeline output for JSON consumers
pub use pipeline::output::PipelineOutput;
