//! Verdict selection from the finished derivability tables

use crate::interval::IntervalTable;
use serde::Serialize;
use std::fmt;

/// Classification of a whole sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every base is paired
    Perfect,
    /// Every base but one is paired
    AlmostPerfect,
    Imperfect,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Perfect => "perfect",
            Verdict::AlmostPerfect => "almost perfect",
            Verdict::Imperfect => "imperfect",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read `(0, length)` from the table selected by length parity.
///
/// Even lengths consult only `perfect`. Odd lengths consult only `almost`;
/// a missing almost-perfect table reads as nothing derivable.
pub fn classify(
    length: usize,
    perfect: &IntervalTable,
    almost: Option<&IntervalTable>,
) -> Verdict {
    if length % 2 == 0 {
        if perfect.contains(0, length) {
            Verdict::Perfect
        } else {
            Verdict::Imperfect
        }
    } else if almost.is_some_and(|table| table.contains(0, length)) {
        Verdict::AlmostPerfect
    } else {
        Verdict::Imperfect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{solve_almost_perfect, solve_perfect};
    use crate::sequence::{Base, Sequence};
    use proptest::prelude::*;

    fn verdict(text: &str) -> Verdict {
        let seq: Sequence = text.parse().unwrap();
        let perfect = solve_perfect(&seq);
        let almost = solve_almost_perfect(&seq, &perfect);
        classify(seq.len(), &perfect, Some(&almost))
    }

    #[test]
    fn test_known_sequences() {
        assert_eq!(verdict("AU"), Verdict::Perfect);
        assert_eq!(verdict("AC"), Verdict::Imperfect);
        assert_eq!(verdict("AUAU"), Verdict::Perfect);
        assert_eq!(verdict("AAUU"), Verdict::Perfect);
        assert_eq!(verdict("A"), Verdict::AlmostPerfect);
        assert_eq!(verdict("AUA"), Verdict::AlmostPerfect);
        assert_eq!(verdict("ACG"), Verdict::AlmostPerfect);
        assert_eq!(verdict("ACC"), Verdict::Imperfect);
        assert_eq!(verdict("AUC"), Verdict::AlmostPerfect);
    }

    #[test]
    fn test_nested_and_concatenated() {
        assert_eq!(verdict("GGAUCC"), Verdict::Perfect);
        assert_eq!(verdict("GCAUGC"), Verdict::Perfect);
        assert_eq!(verdict("GGACUCC"), Verdict::AlmostPerfect);
        assert_eq!(verdict("AUGCA"), Verdict::AlmostPerfect);
        assert_eq!(verdict("AAAA"), Verdict::Imperfect);
        assert_eq!(verdict("AAA"), Verdict::Imperfect);
    }

    #[test]
    fn test_single_bases_are_almost_perfect() {
        for base in Base::ALL {
            assert_eq!(verdict(&base.to_string()), Verdict::AlmostPerfect);
        }
    }

    #[test]
    fn test_pairs_of_bases() {
        for a in Base::ALL {
            for b in Base::ALL {
                let expected = if a.pairs_with(b) {
                    Verdict::Perfect
                } else {
                    Verdict::Imperfect
                };
                assert_eq!(verdict(&format!("{}{}", a, b)), expected);
            }
        }
    }

    #[test]
    fn test_missing_almost_table_reads_as_imperfect() {
        let seq: Sequence = "A".parse().unwrap();
        let perfect = solve_perfect(&seq);
        assert_eq!(classify(1, &perfect, None), Verdict::Imperfect);
    }

    #[test]
    fn test_even_length_ignores_almost_table() {
        let seq: Sequence = "AUAU".parse().unwrap();
        let perfect = solve_perfect(&seq);
        let mut almost = IntervalTable::new(4);
        almost.insert(0, 4);

        assert_eq!(classify(4, &perfect, Some(&almost)), Verdict::Perfect);
        assert_eq!(
            classify(4, &IntervalTable::new(4), Some(&almost)),
            Verdict::Imperfect
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Verdict::Perfect.to_string(), "perfect");
        assert_eq!(Verdict::AlmostPerfect.to_string(), "almost perfect");
        assert_eq!(Verdict::Imperfect.to_string(), "imperfect");
        assert_eq!(
            serde_json::to_string(&Verdict::AlmostPerfect).unwrap(),
            "\"almost_perfect\""
        );
    }

    fn base() -> impl Strategy<Value = Base> {
        prop::sample::select(Base::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_parity_law(bases in prop::collection::vec(base(), 1..24)) {
            let text: String = bases.iter().map(|b| b.as_char()).collect();
            let v = verdict(&text);

            if bases.len() % 2 == 0 {
                prop_assert_ne!(v, Verdict::AlmostPerfect);
            } else {
                prop_assert_ne!(v, Verdict::Perfect);
            }
        }

        #[test]
        fn prop_deleting_from_perfect_end_is_almost_perfect(
            bases in prop::collection::vec(base(), 1..10),
        ) {
            // a stem: each base closed by its complement in reverse order
            let mut text: String = bases.iter().map(|b| b.as_char()).collect();
            let mirror: String = bases.iter().rev().map(|b| b.complement().as_char()).collect();
            text.push_str(&mirror);
            prop_assert_eq!(verdict(&text), Verdict::Perfect);

            text.pop();
            prop_assert_eq!(verdict(&text), Verdict::AlmostPerfect);
        }
    }
}
