use super::base::Base;
use super::parser::Sequence;
use serde::Serialize;

/// Per-base composition of a sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceMetrics {
    pub length: usize,
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub u: usize,
    /// Fraction of G and C bases
    pub gc_content: f64,
}

impl SequenceMetrics {
    pub fn from_sequence(sequence: &Sequence) -> Self {
        let (mut a, mut c, mut g, mut u) = (0, 0, 0, 0);
        for base in sequence.bases() {
            match base {
                Base::A => a += 1,
                Base::C => c += 1,
                Base::G => g += 1,
                Base::U => u += 1,
            }
        }

        let length = sequence.len();
        let gc_content = if length == 0 {
            0.0
        } else {
            (g + c) as f64 / length as f64
        };

        Self {
            length,
            a,
            c,
            g,
            u,
            gc_content,
        }
    }

    pub fn count(&self, base: Base) -> usize {
        match base {
            Base::A => self.a,
            Base::C => self.c,
            Base::G => self.g,
            Base::U => self.u,
        }
    }

    /// Every base has as many complements as itself.
    ///
    /// Necessary (not sufficient) for a perfect sequence.
    pub fn is_balanced(&self) -> bool {
        self.a == self.u && self.c == self.g
    }
}
