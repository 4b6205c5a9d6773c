//! Sequence type and the parser that validates raw text into it

use super::base::Base;
use crate::config::compile_time::input::MAX_SEQUENCE_LENGTH;
use crate::config::runtime::InputPreferences;
use crate::interval::Interval;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fmt;
use std::str::FromStr;

/// Sequence parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("Invalid base '{character}' at position {position}")]
    InvalidBase { character: char, position: usize },

    #[error("Sequence is empty")]
    EmptySequence,

    #[error("Sequence too long: {length} bases (max: {max})")]
    SequenceTooLong { length: usize, max: usize },
}

impl SequenceError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SequenceError::InvalidBase { .. } => codes::sequence::INVALID_BASE,
            SequenceError::EmptySequence => codes::sequence::EMPTY_SEQUENCE,
            SequenceError::SequenceTooLong { .. } => codes::sequence::SEQUENCE_TOO_LONG,
        }
    }
}

/// Immutable, non-empty list of bases
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    bases: Vec<Base>,
}

impl Sequence {
    /// Build from bases directly; `None` if empty
    pub fn from_bases(bases: Vec<Base>) -> Option<Self> {
        if bases.is_empty() {
            None
        } else {
            Some(Self { bases })
        }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    /// Positions `i` and `j` base-pair: `seq[j] = comp(seq[i])`
    pub fn pairs(&self, i: usize, j: usize) -> bool {
        match (self.bases.get(i), self.bases.get(j)) {
            (Some(a), Some(b)) => a.pairs_with(*b),
            _ => false,
        }
    }

    pub fn is_even(&self) -> bool {
        self.len() % 2 == 0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.bases {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    /// Parses with lower-case acceptance enabled
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SequenceParser::new().parse(s)
    }
}

/// Validates text into a [`Sequence`]
#[derive(Debug, Clone)]
pub struct SequenceParser {
    pub accept_lowercase: bool,
    pub log_composition: bool,
}

impl SequenceParser {
    pub fn new() -> Self {
        Self {
            accept_lowercase: true,
            log_composition: false,
        }
    }

    pub fn from_preferences(prefs: &InputPreferences) -> Self {
        Self {
            accept_lowercase: prefs.accept_lowercase,
            log_composition: prefs.log_composition,
        }
    }

    pub fn with_lowercase(mut self, accept: bool) -> Self {
        self.accept_lowercase = accept;
        self
    }

    /// The compile-time maximum sequence length
    pub fn max_length() -> usize {
        MAX_SEQUENCE_LENGTH
    }

    pub fn parse(&self, text: &str) -> Result<Sequence, SequenceError> {
        if text.is_empty() {
            let error = SequenceError::EmptySequence;
            log_error!(error.error_code(), "Sequence is empty");
            return Err(error);
        }

        let length = text.chars().count();
        if length > MAX_SEQUENCE_LENGTH {
            let error = SequenceError::SequenceTooLong {
                length,
                max: MAX_SEQUENCE_LENGTH,
            };
            log_error!(error.error_code(), "Sequence exceeds maximum length",
                "length" => length,
                "max" => MAX_SEQUENCE_LENGTH);
            return Err(error);
        }

        let mut bases = Vec::with_capacity(length);
        for (position, character) in text.chars().enumerate() {
            let symbol = if self.accept_lowercase {
                character.to_ascii_uppercase()
            } else {
                character
            };

            match Base::try_from(symbol) {
                Ok(base) => bases.push(base),
                Err(_) => {
                    let error = SequenceError::InvalidBase {
                        character,
                        position,
                    };
                    log_error!(error.error_code(), "Sequence contains an invalid base",
                        interval = Interval::new(position, position + 1),
                        "character" => character.escape_debug(),
                        "position" => position);
                    return Err(error);
                }
            }
        }

        let sequence = Sequence { bases };

        if self.log_composition {
            let metrics = super::SequenceMetrics::from_sequence(&sequence);
            log_debug!("Sequence composition",
                "A" => metrics.a,
                "C" => metrics.c,
                "G" => metrics.g,
                "U" => metrics.u,
                "gc_content" => format!("{:.3}", metrics.gc_content));
        }

        log_success!(codes::sequence::SEQUENCE_PARSED, "Sequence parsed",
            "length" => sequence.len(),
            "parity" => if sequence.is_even() { "even" } else { "odd" });

        Ok(sequence)
    }
}

impl Default for SequenceParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_valid_sequence() {
        let seq: Sequence = "AUGC".parse().unwrap();

        assert_eq!(seq.len(), 4);
        assert_eq!(seq.bases(), &[Base::A, Base::U, Base::G, Base::C]);
        assert_eq!(seq.to_string(), "AUGC");
        assert!(seq.is_even());
    }

    #[test]
    fn test_from_bases_rejects_empty() {
        assert!(Sequence::from_bases(Vec::new()).is_none());

        let seq = Sequence::from_bases(vec![Base::G]).unwrap();
        assert!(!seq.is_empty());
        assert_eq!(seq.bases(), &[Base::G]);
        assert!(!seq.is_even());
    }

    #[test]
    fn test_lowercase_is_normalized_when_accepted() {
        let seq: Sequence = "auGc".parse().unwrap();
        assert_eq!(seq.to_string(), "AUGC");

        let strict = SequenceParser::new().with_lowercase(false);
        assert_matches!(
            strict.parse("auGc"),
            Err(SequenceError::InvalidBase {
                character: 'a',
                position: 0
            })
        );
    }

    #[test]
    fn test_invalid_base_reports_position() {
        assert_matches!(
            "ACGTA".parse::<Sequence>(),
            Err(SequenceError::InvalidBase {
                character: 'T',
                position: 3
            })
        );
        assert_matches!(
            "AC U".parse::<Sequence>(),
            Err(SequenceError::InvalidBase { position: 2, .. })
        );
    }

    #[test]
    fn test_empty_and_too_long() {
        assert_matches!("".parse::<Sequence>(), Err(SequenceError::EmptySequence));

        let long = "A".repeat(SequenceParser::max_length() + 1);
        assert_matches!(
            long.parse::<Sequence>(),
            Err(SequenceError::SequenceTooLong { length, max }) if length == max + 1
        );
    }

    #[test]
    fn test_pairs() {
        let seq: Sequence = "AGCU".parse().unwrap();

        assert!(seq.pairs(0, 3));
        assert!(seq.pairs(1, 2));
        assert!(!seq.pairs(0, 1));
        assert!(!seq.pairs(0, 10));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SequenceError::EmptySequence.error_code().as_str(), "E021");
        assert_eq!(
            SequenceError::EmptySequence.error_code().info().map(|info| info.stage),
            Some(crate::logging::Stage::Sequence)
        );
    }
}
