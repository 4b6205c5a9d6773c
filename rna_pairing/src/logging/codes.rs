//! Event codes, one registry entry per code
//!
//! `E` codes are errors, `W` warnings and `I` milestones. The tens digit
//! follows the stage: `0x` input, `2x` sequence, `4x` solver, `5x`
//! classification. `E001` and `I001` belong to the process itself.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Registry entry, if the code is declared below
    pub fn info(&self) -> Option<&'static CodeInfo> {
        lookup(self.0)
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.info().and_then(|info| info.hint)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Part of the classification run a code is raised from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    System,
    Input,
    Sequence,
    Solver,
    Classification,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::System => "system",
            Stage::Input => "input",
            Stage::Sequence => "sequence",
            Stage::Solver => "solver",
            Stage::Classification => "classification",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CodeInfo {
    pub code: Code,
    pub stage: Stage,
    pub summary: &'static str,
    /// What the user can do about it; shown as `= help:` in reports
    pub hint: Option<&'static str>,
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("E001");
    pub const LOGGING_READY: Code = Code::new("I001");
}

pub mod input {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const PERMISSION_DENIED: Code = Code::new("E006");
    pub const INVALID_ENCODING: Code = Code::new("E007");
    pub const IO_ERROR: Code = Code::new("E008");
    pub const EMPTY_INPUT: Code = Code::new("E009");
    pub const INPUT_TOO_LARGE: Code = Code::new("E010");

    pub const INPUT_READ: Code = Code::new("I006");
}

pub mod sequence {
    use super::Code;

    pub const INVALID_BASE: Code = Code::new("E020");
    pub const EMPTY_SEQUENCE: Code = Code::new("E021");
    pub const SEQUENCE_TOO_LONG: Code = Code::new("E022");

    pub const SEQUENCE_PARSED: Code = Code::new("I020");
}

pub mod solver {
    use super::Code;

    pub const STRATEGY_DIVERGENCE: Code = Code::new("E040");
    pub const LARGE_SEQUENCE: Code = Code::new("W040");

    pub const PERFECT_TABLE_COMPLETE: Code = Code::new("I040");
    pub const ALMOST_PERFECT_TABLE_COMPLETE: Code = Code::new("I041");
    pub const STRATEGIES_AGREE: Code = Code::new("I042");
}

pub mod classification {
    use super::Code;

    pub const CLASSIFICATION_COMPLETE: Code = Code::new("I050");
    pub const SELF_CHECK_PASSED: Code = Code::new("I051");
}

const fn entry(code: Code, stage: Stage, summary: &'static str, hint: Option<&'static str>) -> CodeInfo {
    CodeInfo {
        code,
        stage,
        summary,
        hint,
    }
}

const REGISTRY: &[CodeInfo] = &[
    entry(
        system::INTERNAL_ERROR,
        Stage::System,
        "Internal classifier error",
        Some("Re-run with -vv and report the log"),
    ),
    entry(system::LOGGING_READY, Stage::System, "Logging initialized", None),
    entry(
        input::FILE_NOT_FOUND,
        Stage::Input,
        "Input file does not exist",
        Some("Check the path, or pipe the sequence on stdin"),
    ),
    entry(
        input::PERMISSION_DENIED,
        Stage::Input,
        "Input file is not readable",
        Some("Check the file's read permissions"),
    ),
    entry(
        input::INVALID_ENCODING,
        Stage::Input,
        "Input is not valid UTF-8",
        Some("Save the sequence as plain ASCII text"),
    ),
    entry(input::IO_ERROR, Stage::Input, "Input could not be read", None),
    entry(
        input::EMPTY_INPUT,
        Stage::Input,
        "Input has no non-blank line",
        Some("Put the sequence on the first non-empty line"),
    ),
    entry(
        input::INPUT_TOO_LARGE,
        Stage::Input,
        "Input exceeds the size limit",
        Some("Raise max_input_bytes in the build profile"),
    ),
    entry(input::INPUT_READ, Stage::Input, "Sequence line read", None),
    entry(
        sequence::INVALID_BASE,
        Stage::Sequence,
        "Character outside A, C, G, U",
        Some("Replace T with U and remove gaps or ambiguity codes"),
    ),
    entry(
        sequence::EMPTY_SEQUENCE,
        Stage::Sequence,
        "Sequence line is empty",
        Some("Provide at least one base"),
    ),
    entry(
        sequence::SEQUENCE_TOO_LONG,
        Stage::Sequence,
        "Sequence exceeds the length limit",
        Some("Raise max_sequence_length in the build profile"),
    ),
    entry(sequence::SEQUENCE_PARSED, Stage::Sequence, "Sequence parsed", None),
    entry(
        solver::STRATEGY_DIVERGENCE,
        Stage::Solver,
        "Chart and agenda tables differ",
        Some("Report the sequence; the verdict cannot be trusted"),
    ),
    entry(
        solver::LARGE_SEQUENCE,
        Stage::Solver,
        "Sequence is long enough for cubic solving to be slow",
        Some("Expect a long run, or use the agenda strategy"),
    ),
    entry(
        solver::PERFECT_TABLE_COMPLETE,
        Stage::Solver,
        "Perfect table at its fixed point",
        None,
    ),
    entry(
        solver::ALMOST_PERFECT_TABLE_COMPLETE,
        Stage::Solver,
        "Almost-perfect table at its fixed point",
        None,
    ),
    entry(solver::STRATEGIES_AGREE, Stage::Solver, "Chart and agenda tables agree", None),
    entry(
        classification::CLASSIFICATION_COMPLETE,
        Stage::Classification,
        "Verdict reached",
        None,
    ),
    entry(
        classification::SELF_CHECK_PASSED,
        Stage::Classification,
        "Known sequences classified correctly",
        None,
    ),
];

static INDEX: OnceLock<HashMap<&'static str, &'static CodeInfo>> = OnceLock::new();

pub fn lookup(code: &str) -> Option<&'static CodeInfo> {
    INDEX
        .get_or_init(|| REGISTRY.iter().map(|info| (info.code.as_str(), info)).collect())
        .get(code)
        .copied()
}

/// Every declared code, in declaration order
pub fn all() -> &'static [CodeInfo] {
    REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_indexed() {
        let mut seen = HashSet::new();
        for info in all() {
            assert!(seen.insert(info.code), "duplicate code {}", info.code);
            assert_eq!(lookup(info.code.as_str()).map(|i| i.code), Some(info.code));
        }
        assert!(lookup("E999").is_none());
    }

    #[test]
    fn test_prefix_matches_stage() {
        for info in all() {
            let tens = &info.code.as_str()[2..3];
            let expected = match tens {
                "0" if info.code.as_str().ends_with('1') => Stage::System,
                "0" | "1" => Stage::Input,
                "2" => Stage::Sequence,
                "4" => Stage::Solver,
                "5" => Stage::Classification,
                other => panic!("unexpected decade {} in {}", other, info.code),
            };
            assert_eq!(info.stage, expected, "{}", info.code);
        }
    }

    #[test]
    fn test_user_facing_errors_carry_hints() {
        for code in [
            input::FILE_NOT_FOUND,
            input::EMPTY_INPUT,
            sequence::INVALID_BASE,
            sequence::SEQUENCE_TOO_LONG,
            solver::STRATEGY_DIVERGENCE,
        ] {
            assert!(code.hint().is_some(), "{} has no hint", code);
        }
        assert!(classification::CLASSIFICATION_COMPLETE.hint().is_none());
        assert_eq!(sequence::INVALID_BASE.info().map(|i| i.stage), Some(Stage::Sequence));
    }
}
