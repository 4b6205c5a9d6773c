use super::strategy::GrammarKind;
use crate::interval::Interval;
use crate::logging::codes;

/// Solver errors. The solvers themselves are infallible; only cross-checking fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    #[error(
        "Chart and agenda strategies disagree on the {grammar} table \
         ({chart_facts} vs {agenda_facts} facts{})",
        describe_difference(.first_difference)
    )]
    StrategyDivergence {
        grammar: GrammarKind,
        chart_facts: usize,
        agenda_facts: usize,
        first_difference: Option<Interval>,
    },
}

fn describe_difference(first_difference: &Option<Interval>) -> String {
    first_difference
        .map(|iv| format!(", first difference at {}", iv))
        .unwrap_or_default()
}

impl SolverError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SolverError::StrategyDivergence { .. } => codes::solver::STRATEGY_DIVERGENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divergence_message() {
        let error = SolverError::StrategyDivergence {
            grammar: GrammarKind::Perfect,
            chart_facts: 3,
            agenda_facts: 2,
            first_difference: Some(Interval::new(0, 4)),
        };

        assert_eq!(
            error.to_string(),
            "Chart and agenda strategies disagree on the perfect table \
             (3 vs 2 facts, first difference at [0, 4))"
        );
        assert_eq!(error.error_code(), codes::solver::STRATEGY_DIVERGENCE);
    }
}
