use super::strategy::{GrammarKind, SolverStrategy};
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Work done by one solve
#[derive(Debug, Clone, Serialize)]
pub struct SolveStats {
    pub strategy: SolverStrategy,
    pub grammar: GrammarKind,
    /// Derivable intervals in the finished table
    pub facts: usize,
    /// Candidate checks (chart) or agenda pops (agenda)
    pub work: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl SolveStats {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Facts derived per unit of work
    pub fn yield_ratio(&self) -> f64 {
        if self.work == 0 {
            0.0
        } else {
            self.facts as f64 / self.work as f64
        }
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serialization() {
        let stats = SolveStats {
            strategy: SolverStrategy::Agenda,
            grammar: GrammarKind::Perfect,
            facts: 4,
            work: 8,
            elapsed: Duration::from_millis(2),
        };

        let json: serde_json::Value = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["strategy"], "agenda");
        assert_eq!(json["grammar"], "perfect");
        assert!((json["elapsed_ms"].as_f64().unwrap() - 2.0).abs() < 1e-9);
        assert!((stats.yield_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
