use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a derivability table is driven to its fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverStrategy {
    /// Bottom-up sweep by increasing interval length
    #[default]
    Chart,
    /// FIFO worklist of newly derived facts
    Agenda,
}

impl SolverStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverStrategy::Chart => "chart",
            SolverStrategy::Agenda => "agenda",
        }
    }

    /// The strategy a verification run compares against
    pub fn other(&self) -> SolverStrategy {
        match self {
            SolverStrategy::Chart => SolverStrategy::Agenda,
            SolverStrategy::Agenda => SolverStrategy::Chart,
        }
    }
}

impl fmt::Display for SolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chart" | "dp" => Ok(SolverStrategy::Chart),
            "agenda" | "worklist" => Ok(SolverStrategy::Agenda),
            other => Err(format!(
                "unknown solver strategy '{}' (expected 'chart' or 'agenda')",
                other
            )),
        }
    }
}

/// Which grammar a table belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammarKind {
    Perfect,
    AlmostPerfect,
}

impl GrammarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrammarKind::Perfect => "perfect",
            GrammarKind::AlmostPerfect => "almost-perfect",
        }
    }
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
