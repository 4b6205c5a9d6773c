use crate::classifier::Verdict;
use crate::grammar::Solver;
use crate::logging::codes;
use crate::sequence::parse_sequence;

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    for code in [
        codes::input::EMPTY_INPUT,
        codes::sequence::INVALID_BASE,
        codes::solver::STRATEGY_DIVERGENCE,
        codes::classification::CLASSIFICATION_COMPLETE,
    ] {
        if code.info().is_none() {
            return Err(format!("Code {} is not registered", code));
        }
    }

    // Both strategies, cross-checked, on one sequence of each parity
    let solver = Solver::new().with_verification(true);
    for (text, expected) in [("GAUC", Verdict::Perfect), ("GAUCA", Verdict::AlmostPerfect)] {
        let sequence = parse_sequence(text).map_err(|e| e.to_string())?;
        let classification =
            super::classify_sequence(&sequence, &solver).map_err(|e| e.to_string())?;
        if classification.verdict != expected {
            return Err(format!(
                "Self-check misclassified {}: expected {}, got {}",
                text, expected, classification.verdict
            ));
        }
    }

    crate::log_success!(
        codes::classification::SELF_CHECK_PASSED,
        "Pipeline validation succeeded",
        "self_checks" => 2,
        "strategies_verified" => true
    );

    Ok(())
}
