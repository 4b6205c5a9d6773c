use super::result::PipelineResult;
use crate::classifier::Verdict;
use crate::grammar::SolveStats;
use crate::sequence::SequenceMetrics;
use serde::Serialize;

/// Machine-readable form of a [`PipelineResult`]
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub source: String,
    pub verdict: Verdict,
    pub length: usize,
    pub metrics: SequenceMetrics,
    pub perfect: SolveStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub almost_perfect: Option<SolveStats>,
    pub duration_ms: f64,
}

impl PipelineOutput {
    pub fn new(result: &PipelineResult) -> Self {
        Self {
            source: result.source.clone(),
            verdict: result.verdict(),
            length: result.sequence.len(),
            metrics: result.metrics.clone(),
            perfect: result.classification.perfect.stats.clone(),
            almost_perfect: result
                .classification
                .almost_perfect
                .as_ref()
                .map(|s| s.stats.clone()),
            duration_ms: result.processing_duration.as_secs_f64() * 1000.0,
        }
    }

    /// Single-line JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&PipelineResult> for PipelineOutput {
    fn from(result: &PipelineResult) -> Self {
        Self::new(result)
    }
}
