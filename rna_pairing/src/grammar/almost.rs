//! `A ::= B C B' | B A B' | C P | P C | A P | P A`, with a lone base as `A`

use super::strategy::GrammarKind;
use super::Grammar;
use crate::interval::{Interval, IntervalTable};
use crate::sequence::Sequence;

/// Grammar of sequences with exactly one unpaired base.
///
/// Holds read-only access to the finished perfect table; the almost-perfect
/// pass never writes perfect facts.
#[derive(Debug, Clone, Copy)]
pub struct AlmostPerfectGrammar<'p> {
    perfect: &'p IntervalTable,
}

impl<'p> AlmostPerfectGrammar<'p> {
    pub fn new(perfect: &'p IntervalTable) -> Self {
        Self { perfect }
    }
}

impl Grammar for AlmostPerfectGrammar<'_> {
    fn kind(&self) -> GrammarKind {
        GrammarKind::AlmostPerfect
    }

    fn base_length(&self) -> usize {
        1
    }

    // C
    fn is_base_case(&self, _seq: &Sequence, _start: usize) -> bool {
        true
    }

    fn min_composite_length(&self) -> usize {
        3
    }

    fn admits_length(&self, _length: usize) -> bool {
        true
    }

    fn derives(
        &self,
        seq: &Sequence,
        table: &IntervalTable,
        start: usize,
        end: usize,
        checks: &mut u64,
    ) -> bool {
        // B A B' (covers B C B')
        *checks += 1;
        if seq.pairs(start, end - 1) && table.contains(start + 1, end - 1) {
            return true;
        }

        // A P (covers C P): almost prefix of length >= 1, perfect suffix
        for mid in self.perfect.starts_to(end) {
            if mid <= start {
                continue;
            }
            *checks += 1;
            if table.contains(start, mid) {
                return true;
            }
        }

        // P A (covers P C): perfect prefix, almost suffix of length >= 1
        for mid in self.perfect.ends_from(start) {
            if mid >= end {
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
        _table: &IntervalTable,
        fact: Interval,
        derived: &mut Vec<Interval>,
    ) {
        let Interval { start, end } = fact;

        if start > 0 && end < seq.len() && seq.pairs(start - 1, end) {
            derived.push(Interval::new(start - 1, end + 1));
        }

        derived.extend(self.perfect.ends_from(end).map(|k| Interval::new(start, k)));
        derived.extend(self.perfect.starts_to(start).map(|h| Interval::new(h, end)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> Sequence {
        text.parse().unwrap()
    }

    fn singletons(n: usize) -> IntervalTable {
        let mut table = IntervalTable::new(n);
        for i in 0..n {
            table.insert(i, i + 1);
        }
        table
    }

    #[test]
    fn test_lone_base_is_base_case() {
        let perfect = IntervalTable::new(1);
        let grammar = AlmostPerfectGrammar::new(&perfect);
        assert!(grammar.is_base_case(&seq("G"), 0));
        assert!(grammar.admits_length(4));
    }

    #[test]
    fn test_wrap_around_lone_base() {
        let s = seq("ACU");
        let perfect = IntervalTable::new(3);
        let grammar = AlmostPerfectGrammar::new(&perfect);
        let mut checks = 0;

        assert!(grammar.derives(&s, &singletons(3), 0, 3, &mut checks));
    }

    #[test]
    fn test_right_extension() {
        // A then perfect "CG"
        let s = seq("ACG");
        let mut perfect = IntervalTable::new(3);
        perfect.insert(1, 3);
        let grammar = AlmostPerfectGrammar::new(&perfect);
        let mut checks = 0;

        assert!(grammar.derives(&s, &singletons(3), 0, 3, &mut checks));
    }

    #[test]
    fn test_left_extension_reaches_lone_suffix() {
        // perfect "AU" then lone C
        let s = seq("AUC");
        let mut perfect = IntervalTable::new(3);
        perfect.insert(0, 2);
        let grammar = AlmostPerfectGrammar::new(&perfect);
        let mut checks = 0;

        assert!(grammar.derives(&s, &singletons(3), 0, 3, &mut checks));
    }

    #[test]
    fn test_no_rule_applies() {
        let s = seq("ACC");
        let perfect = IntervalTable::new(3);
        let grammar = AlmostPerfectGrammar::new(&perfect);
        let mut checks = 0;

        assert!(!grammar.derives(&s, &singletons(3), 0, 3, &mut checks));
        assert_eq!(checks, 1);
    }

    #[test]
    fn test_expand_uses_perfect_partners() {
        let s = seq("AUCGC");
        let mut perfect = IntervalTable::new(5);
        perfect.insert(0, 2);
        perfect.insert(2, 4);
        let grammar = AlmostPerfectGrammar::new(&perfect);

        let mut derived = Vec::new();
        grammar.expand(&s, &IntervalTable::new(5), Interval::new(4, 5), &mut derived);
        assert_eq!(derived, vec![Interval::new(2, 5)]);

        derived.clear();
        grammar.expand(&s, &IntervalTable::new(5), Interval::new(2, 5), &mut derived);
        assert_eq!(derived, vec![Interval::new(0, 5)]);
    }
}
