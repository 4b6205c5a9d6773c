use crate::classifier::Verdict;
use crate::grammar::Solution;
use crate::logging::codes;
use crate::sequence::{Sequence, SequenceMetrics};
use std::time::Duration;

/// Verdict plus the tables it was read from
#[derive(Debug, Clone)]
pub struct Classification {
    pub verdict: Verdict,
    pub perfect: Solution,
    /// Only populated for odd lengths
    pub almost_perfect: Option<Solution>,
}

/// Complete result of classifying one input
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub source: String,
    pub sequence: Sequence,
    pub metrics: SequenceMetrics,
    pub classification: Classification,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        source: impl Into<String>,
        sequence: Sequence,
        classification: Classification,
        processing_duration: Duration,
    ) -> Self {
        let metrics = SequenceMetrics::from_sequence(&sequence);
        Self {
            source: source.into(),
            sequence,
            metrics,
            classification,
            processing_duration,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.classification.verdict
    }

    /// Facts across both tables
    pub fn total_facts(&self) -> usize {
        self.classification.perfect.stats.facts
            + self
                .classification
                .almost_perfect
                .as_ref()
                .map_or(0, |s| s.stats.facts)
    }

    pub fn log_success(&self) {
        crate::log_success!(
            codes::classification::CLASSIFICATION_COMPLETE,
            "Sequence classified",
            "source" => &self.source,
            "verdict" => self.verdict(),
            "length" => self.sequence.len(),
            "facts" => self.total_facts(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
