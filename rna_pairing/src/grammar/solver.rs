//! Chart and agenda fixed-point solvers

use super::error::SolverError;
use super::stats::SolveStats;
use super::strategy::{GrammarKind, SolverStrategy};
use super::Grammar;
use crate::config::compile_time::solver::{LARGE_SEQUENCE_THRESHOLD, PROGRESS_LOG_INTERVAL};
use crate::config::runtime::SolverPreferences;
use crate::interval::{Interval, IntervalTable};
use crate::logging::codes;
use crate::sequence::Sequence;
use crate::{log_debug, log_error, log_performance, log_success, log_warning};
use std::collections::VecDeque;
use std::time::Instant;

/// A finished table and the work it took
#[derive(Debug, Clone)]
pub struct Solution {
    pub table: IntervalTable,
    pub stats: SolveStats,
}

// ============================================================================
// STRATEGIES
// ============================================================================

fn seed<G: Grammar + ?Sized>(
    grammar: &G,
    seq: &Sequence,
    table: &mut IntervalTable,
) -> Vec<Interval> {
    let n = seq.len();
    let base = grammar.base_length();
    let mut seeded = Vec::new();

    if base > n {
        return seeded;
    }

    for start in 0..=n - base {
        if grammar.is_base_case(seq, start) && table.insert(start, start + base) {
            seeded.push(Interval::new(start, start + base));
        }
    }

    seeded
}

/// Sweep lengths in increasing order; every length is complete before the next
pub fn solve_chart<G: Grammar + ?Sized>(grammar: &G, seq: &Sequence) -> Solution {
    solve_chart_inner(grammar, seq, false)
}

fn solve_chart_inner<G: Grammar + ?Sized>(
    grammar: &G,
    seq: &Sequence,
    log_progress: bool,
) -> Solution {
    let started = Instant::now();
    let n = seq.len();
    let mut table = IntervalTable::new(n);
    let mut checks: u64 = 0;

    seed(grammar, seq, &mut table);

    for length in grammar.min_composite_length()..=n {
        if !grammar.admits_length(length) {
            continue;
        }

        for start in 0..=n - length {
            let end = start + length;
            if grammar.derives(seq, &table, start, end, &mut checks) {
                table.insert(start, end);
            }
        }

        if log_progress && length % PROGRESS_LOG_INTERVAL == 0 {
            log_debug!("Chart sweep progress",
                "grammar" => grammar.kind(),
                "length" => length,
                "of" => n,
                "facts" => table.len());
        }
    }

    Solution {
        stats: SolveStats {
            strategy: SolverStrategy::Chart,
            grammar: grammar.kind(),
            facts: table.len(),
            work: checks,
            elapsed: started.elapsed(),
        },
        table,
    }
}

/// FIFO worklist: each new fact is queued once and expanded when popped
pub fn solve_agenda<G: Grammar + ?Sized>(grammar: &G, seq: &Sequence) -> Solution {
    solve_agenda_inner(grammar, seq, false)
}

fn solve_agenda_inner<G: Grammar + ?Sized>(
    grammar: &G,
    seq: &Sequence,
    log_progress: bool,
) -> Solution {
    let started = Instant::now();
    let n = seq.len();
    let mut table = IntervalTable::new(n);
    let mut agenda: VecDeque<Interval> = seed(grammar, seq, &mut table).into();
    let mut derived = Vec::new();
    let mut pops: u64 = 0;
    let progress_every = (PROGRESS_LOG_INTERVAL * n.max(1)) as u64;

    while let Some(fact) = agenda.pop_front() {
        pops += 1;

        grammar.expand(seq, &table, fact, &mut derived);
        for interval in derived.drain(..) {
            if table.insert(interval.start, interval.end) {
                agenda.push_back(interval);
            }
        }

        if log_progress && pops % progress_every == 0 {
            log_debug!("Agenda progress",
                "grammar" => grammar.kind(),
                "pops" => pops,
                "pending" => agenda.len(),
                "facts" => table.len());
        }
    }

    Solution {
        stats: SolveStats {
            strategy: SolverStrategy::Agenda,
            grammar: grammar.kind(),
            facts: table.len(),
            work: pops,
            elapsed: started.elapsed(),
        },
        table,
    }
}

// ============================================================================
// SOLVER
// ============================================================================

/// Runs a grammar to its fixed point with the configured strategy
#[derive(Debug, Clone)]
pub struct Solver {
    pub strategy: SolverStrategy,
    /// Also run the other strategy and fail if the tables differ
    pub verify_strategies: bool,
    pub log_progress: bool,
}

impl Solver {
    pub fn new() -> Self {
        Self {
            strategy: SolverStrategy::Chart,
            verify_strategies: false,
            log_progress: false,
        }
    }

    pub fn from_preferences(prefs: &SolverPreferences) -> Self {
        Self {
            strategy: prefs.strategy,
            verify_strategies: prefs.verify_strategies,
            log_progress: prefs.log_progress,
        }
    }

    pub fn with_strategy(mut self, strategy: SolverStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_verification(mut self, enabled: bool) -> Self {
        self.verify_strategies = enabled;
        self
    }

    pub fn with_progress_logging(mut self, enabled: bool) -> Self {
        self.log_progress = enabled;
        self
    }

    fn run<G: Grammar + ?Sized>(
        &self,
        strategy: SolverStrategy,
        grammar: &G,
        seq: &Sequence,
    ) -> Solution {
        match strategy {
            SolverStrategy::Chart => solve_chart_inner(grammar, seq, self.log_progress),
            SolverStrategy::Agenda => solve_agenda_inner(grammar, seq, self.log_progress),
        }
    }

    /// Populate `grammar`'s table for `seq`
    pub fn solve<G: Grammar + ?Sized>(
        &self,
        grammar: &G,
        seq: &Sequence,
    ) -> Result<Solution, SolverError> {
        if seq.len() > LARGE_SEQUENCE_THRESHOLD {
            log_warning!(code = codes::solver::LARGE_SEQUENCE,
                "Large sequence; solve is cubic in length",
                "grammar" => grammar.kind(),
                "length" => seq.len(),
                "threshold" => LARGE_SEQUENCE_THRESHOLD);
        }

        log_debug!("Solving grammar",
            "grammar" => grammar.kind(),
            "strategy" => self.strategy,
            "length" => seq.len());

        let solution = self.run(self.strategy, grammar, seq);

        if self.verify_strategies {
            let reference = self.run(self.strategy.other(), grammar, seq);
            compare_tables(grammar.kind(), &solution, &reference)?;

            log_success!(codes::solver::STRATEGIES_AGREE, "Chart and agenda tables agree",
                "grammar" => grammar.kind(),
                "facts" => solution.stats.facts,
                "chart_work" => chart_work(&solution, &reference),
                "agenda_work" => agenda_work(&solution, &reference));
        }

        let code = match grammar.kind() {
            GrammarKind::Perfect => codes::solver::PERFECT_TABLE_COMPLETE,
            GrammarKind::AlmostPerfect => codes::solver::ALMOST_PERFECT_TABLE_COMPLETE,
        };
        log_performance!(code, "Table reached its fixed point",
            duration = solution.stats.elapsed,
            "grammar" => grammar.kind(),
            "strategy" => solution.stats.strategy,
            "facts" => solution.stats.facts,
            "work" => solution.stats.work);

        Ok(solution)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

fn chart_work(a: &Solution, b: &Solution) -> u64 {
    if a.stats.strategy == SolverStrategy::Chart {
        a.stats.work
    } else {
        b.stats.work
    }
}

fn agenda_work(a: &Solution, b: &Solution) -> u64 {
    if a.stats.strategy == SolverStrategy::Agenda {
        a.stats.work
    } else {
        b.stats.work
    }
}

fn compare_tables(grammar: GrammarKind, a: &Solution, b: &Solution) -> Result<(), SolverError> {
    if a.table == b.table {
        return Ok(());
    }

    let (chart, agenda) = if a.stats.strategy == SolverStrategy::Chart {
        (a, b)
    } else {
        (b, a)
    };

    let first_difference = chart
        .table
        .difference(&agenda.table)
        .chain(agenda.table.difference(&chart.table))
        .min();

    let error = SolverError::StrategyDivergence {
        grammar,
        chart_facts: chart.table.len(),
        agenda_facts: agenda.table.len(),
        first_difference,
    };

    match first_difference {
        Some(interval) => log_error!(error.error_code(), "Solver strategies diverged",
            interval = interval,
            "grammar" => grammar,
            "chart_facts" => chart.table.len(),
            "agenda_facts" => agenda.table.len()),
        None => log_error!(error.error_code(), "Solver strategies diverged",
            "grammar" => grammar),
    }

    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{AlmostPerfectGrammar, PerfectGrammar};
    use crate::sequence::{Base, Sequence};
    use proptest::prelude::*;

    fn seq(text: &str) -> Sequence {
        text.parse().unwrap()
    }

    fn both_tables(s: &Sequence, strategy: SolverStrategy) -> (IntervalTable, IntervalTable) {
        let solver = Solver::new().with_strategy(strategy);
        let perfect = solver.solve(&PerfectGrammar, s).unwrap().table;
        let almost = solver
            .solve(&AlmostPerfectGrammar::new(&perfect), s)
            .unwrap()
            .table;
        (perfect, almost)
    }

    #[test]
    fn test_perfect_table_contents() {
        let s = seq("AAUU");
        let table = solve_chart(&PerfectGrammar, &s).table;

        assert!(table.contains(1, 3));
        assert!(table.contains(0, 4));
        assert!(!table.contains(0, 2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_perfect_split_and_nesting() {
        let s = seq("AUGCGAUC");
        let table = solve_chart(&PerfectGrammar, &s).table;

        // AU GC GAUC (GAUC wraps AU)
        assert!(table.contains(0, 2));
        assert!(table.contains(2, 4));
        assert!(table.contains(4, 8));
        assert!(table.contains(0, 8));
    }

    #[test]
    fn test_perfect_table_has_only_even_intervals() {
        let s = seq("AUAUGCGCAU");
        for strategy in [SolverStrategy::Chart, SolverStrategy::Agenda] {
            let (perfect, _) = both_tables(&s, strategy);
            assert!(perfect.iter().all(|iv| iv.len() % 2 == 0));
        }
    }

    #[test]
    fn test_almost_table_has_only_odd_intervals() {
        let s = seq("AUCGAUA");
        let (_, almost) = both_tables(&s, SolverStrategy::Chart);
        assert!(almost.iter().all(|iv| iv.len() % 2 == 1));
        assert!(almost.contains(0, 7));
    }

    #[test]
    fn test_short_sequences() {
        let single = seq("G");
        let (perfect, almost) = both_tables(&single, SolverStrategy::Chart);
        assert!(perfect.is_empty());
        assert!(almost.contains(0, 1));

        let pair = seq("CG");
        let (perfect, almost) = both_tables(&pair, SolverStrategy::Agenda);
        assert!(perfect.contains(0, 2));
        assert_eq!(almost.len(), 2);
    }

    #[test]
    fn test_chart_work_counts_checks() {
        let s = seq("AUAU");
        let solution = solve_chart(&PerfectGrammar, &s);

        assert_eq!(solution.stats.strategy, SolverStrategy::Chart);
        assert_eq!(solution.stats.grammar, GrammarKind::Perfect);
        assert_eq!(solution.stats.facts, solution.table.len());
        assert!(solution.stats.work > 0);
    }

    #[test]
    fn test_agenda_pops_every_fact_once() {
        let s = seq("AUAUAU");
        let solution = solve_agenda(&PerfectGrammar, &s);

        assert_eq!(solution.stats.work, solution.table.len() as u64);
    }

    #[test]
    fn test_verification_passes_on_agreeing_strategies() {
        let s = seq("GGAUCCAUA");
        let solver = Solver::new().with_verification(true);

        let perfect = solver.solve(&PerfectGrammar, &s).unwrap();
        let almost = solver.solve(&AlmostPerfectGrammar::new(&perfect.table), &s);
        assert!(almost.is_ok());
    }

    #[test]
    fn test_divergent_tables_are_reported() {
        let s = seq("AUAU");
        let chart = solve_chart(&PerfectGrammar, &s);
        let mut agenda = solve_agenda(&PerfectGrammar, &s);
        agenda.table = IntervalTable::new(4);
        agenda.table.insert(0, 2);

        let result = compare_tables(GrammarKind::Perfect, &chart, &agenda);
        assert_eq!(
            result,
            Err(SolverError::StrategyDivergence {
                grammar: GrammarKind::Perfect,
                chart_facts: chart.table.len(),
                agenda_facts: 1,
                first_difference: Some(Interval::new(0, 4)),
            })
        );
    }

    fn base_strategy() -> impl Strategy<Value = Base> {
        prop_oneof![Just(Base::A), Just(Base::C), Just(Base::G), Just(Base::U)]
    }

    fn sequence_strategy(max_len: usize) -> impl Strategy<Value = Sequence> {
        prop::collection::vec(base_strategy(), 1..=max_len)
            .prop_map(|bases| Sequence::from_bases(bases).unwrap())
    }

    /// Sequences built from nested and concatenated pairs, so perfect facts are common
    fn paired_sequence_strategy() -> impl Strategy<Value = Sequence> {
        prop::collection::vec((base_strategy(), any::<bool>()), 1..=8).prop_map(|pairs| {
            let mut bases = Vec::new();
            for (base, nest) in pairs {
                if nest {
                    bases.insert(0, base);
                    bases.push(base.complement());
                } else {
                    bases.push(base);
                    bases.push(base.complement());
                }
            }
            Sequence::from_bases(bases).unwrap()
        })
    }

    proptest! {
        #[test]
        fn chart_and_agenda_agree_on_random_sequences(s in sequence_strategy(24)) {
            let (chart_p, chart_a) = both_tables(&s, SolverStrategy::Chart);
            let (agenda_p, agenda_a) = both_tables(&s, SolverStrategy::Agenda);
            prop_assert_eq!(chart_p, agenda_p);
            prop_assert_eq!(chart_a, agenda_a);
        }

        #[test]
        fn chart_and_agenda_agree_on_paired_sequences(s in paired_sequence_strategy()) {
            let (chart_p, chart_a) = both_tables(&s, SolverStrategy::Chart);
            let (agenda_p, agenda_a) = both_tables(&s, SolverStrategy::Agenda);
            prop_assert!(chart_p.contains(0, s.len()));
            prop_assert_eq!(chart_p, agenda_p);
            prop_assert_eq!(chart_a, agenda_a);
        }

        #[test]
        fn solving_is_deterministic(s in sequence_strategy(20)) {
            let first = both_tables(&s, SolverStrategy::Chart);
            let second = both_tables(&s, SolverStrategy::Chart);
            prop_assert_eq!(first, second);
        }
    }
}
