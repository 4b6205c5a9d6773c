//! Interval grammars and the fixed-point solvers that populate their tables
//!
//! A [`Grammar`] describes its base case and composite productions over a
//! [`Sequence`]; the [`Solver`] drives a fresh [`IntervalTable`] to the
//! grammar's fixed point with either the chart or the agenda strategy.

mod almost;
mod error;
mod perfect;
mod solver;
mod stats;
mod strategy;

pub use almost::AlmostPerfectGrammar;
pub use error::SolverError;
pub use perfect::PerfectGrammar;
pub use solver::{solve_agenda, solve_chart, Solution, Solver};
pub use stats::SolveStats;
pub use strategy::{GrammarKind, SolverStrategy};

use crate::interval::{Interval, IntervalTable};
use crate::sequence::Sequence;

/// An interval grammar over a sequence
pub trait Grammar {
    fn kind(&self) -> GrammarKind;

    /// Length of the intervals seeded by the base case
    fn base_length(&self) -> usize;

    /// Whether `(start, start + base_length)` is a base case
    fn is_base_case(&self, seq: &Sequence, start: usize) -> bool;

    /// Shortest length a composite production can derive
    fn min_composite_length(&self) -> usize;

    /// Length filter for the chart sweep; rejected lengths are skipped
    fn admits_length(&self, length: usize) -> bool;

    /// Chart step: whether `(start, end)` follows from strictly shorter facts
    /// already in `table`. Increments `checks` per candidate examined.
    fn derives(
        &self,
        seq: &Sequence,
        table: &IntervalTable,
        start: usize,
        end: usize,
        checks: &mut u64,
    ) -> bool;

    /// Agenda step: push every interval `fact` derives in one production,
    /// given the facts currently in `table`
    fn expand(
        &self,
        seq: &Sequence,
        table: &IntervalTable,
        fact: Interval,
        derived: &mut Vec<Interval>,
    );
}

/// Perfect table with default solver settings
pub fn solve_perfect(seq: &Sequence) -> IntervalTable {
    solve_chart(&PerfectGrammar, seq).table
}

/// Almost-perfect table on top of a finished perfect table
pub fn solve_almost_perfect(seq: &Sequence, perfect: &IntervalTable) -> IntervalTable {
    solve_chart(&AlmostPerfectGrammar::new(perfect), seq).table
}
