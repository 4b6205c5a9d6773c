//! Bases, sequences and sequence parsing

mod base;
mod metrics;
mod parser;

pub use base::Base;
pub use metrics::SequenceMetrics;
pub use parser::{Sequence, SequenceError, SequenceParser};

use crate::config::runtime::InputPreferences;

/// Parse with default settings (lower case accepted)
pub fn parse_sequence(text: &str) -> Result<Sequence, SequenceError> {
    SequenceParser::new().parse(text)
}

/// Parse honoring the runtime input preferences
pub fn parse_sequence_with_preferences(
    text: &str,
    prefs: &InputPreferences,
) -> Result<Sequence, SequenceError> {
    SequenceParser::from_preferences(prefs).parse(text)
}
