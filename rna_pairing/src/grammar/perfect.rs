//! `P ::= B B' | B P B' | P P`

use super::strategy::GrammarKind;
use super::Grammar;
use crate::interval::{Interval, IntervalTable};
use crate::sequence::Sequence;

/// Grammar of fully paired sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct PerfectGrammar;

impl Grammar for PerfectGrammar {
    fn kind(&self) -> GrammarKind {
        GrammarKind::Perfect
    }

    fn base_length(&self) -> usize {
        2
    }

    // B B'
    fn is_base_case(&self, seq: &Sequence, start: usize) -> bool {
        seq.pairs(start, start + 1)
    }

    fn min_composite_length(&self) -> usize {
        4
    }

    /// Every production consumes bases in pairs
    fn admits_length(&self, length: usize) -> bool {
        length % 2 == 0
    }

    fn derives(
        &self,
        seq: &Sequence,
        table: &IntervalTable,
        start: usize,
        end: usize,
        checks: &mut u64,
    ) -> bool {
        // B P B'
        *checks += 1;
        if seq.pairs(start, end - 1) && table.contains(start + 1, end - 1) {
            return true;
        }

        // P P, split at mid with both halves of length >= 2
        for mid in table.ends_from(start) {
            if mid + 2 > end {
                break;
            }
            *checks += 1;
            if table.contains(mid, end) {
                return true;
            }
        }

        false
    }

    fn expand(
        &self,
        seq: &Sequence,
        table: &IntervalTable,
        fact: Interval,
        derived: &mut Vec<Interval>,
    ) {
        let Interval { start, end } = fact;

        if start > 0 && end < seq.len() && seq.pairs(start - 1, end) {
            derived.push(Interval::new(start - 1, end + 1));
        }

        derived.extend(table.ends_from(end).map(|k| Interval::new(start, k)));
        derived.extend(table.starts_to(start).map(|h| Interval::new(h, end)));
    }
}
