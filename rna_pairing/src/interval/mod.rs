//! Half-open sequence intervals and the monotone derivability table
//!
//! An [`IntervalTable`] holds one fact set with two indexes over it: forward
//! (`start -> ends`) and backward (`end -> starts`). Facts can only be added.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Half-open interval `[start, end)` over a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Sparse derivability facts for one grammar over a sequence of length `n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTable {
    forward: Vec<BTreeSet<usize>>,
    backward: Vec<BTreeSet<usize>>,
    count: usize,
}

impl IntervalTable {
    /// Empty table for a sequence of `n` bases
    pub fn new(n: usize) -> Self {
        Self {
            forward: vec![BTreeSet::new(); n + 1],
            backward: vec![BTreeSet::new(); n + 1],
            count: 0,
        }
    }

    /// Length of the sequence this table covers
    pub fn sequence_len(&self) -> usize {
        self.forward.len() - 1
    }

    /// Record `(start, end)` as derivable. Returns `true` if the fact is new.
    ///
    /// Intervals outside `0 <= start < end <= n` are ignored and return `false`.
    pub fn insert(&mut self, start: usize, end: usize) -> bool {
        if start >= end || end > self.sequence_len() {
            return false;
        }

        if !self.forward[start].insert(end) {
            return false;
        }
        self.backward[end].insert(start);
        self.count += 1;
        true
    }

    /// Absent or out-of-range intervals read as not derivable
    pub fn contains(&self, start: usize, end: usize) -> bool {
        self.forward
            .get(start)
            .map(|ends| ends.contains(&end))
            .unwrap_or(false)
    }

    pub fn contains_interval(&self, interval: Interval) -> bool {
        self.contains(interval.start, interval.end)
    }

    /// Ends `j` with `(start, j)` derivable, ascending
    pub fn ends_from(&self, start: usize) -> impl Iterator<Item = usize> + '_ {
        self.forward.get(start).into_iter().flatten().copied()
    }

    /// Starts `i` with `(i, end)` derivable, ascending
    pub fn starts_to(&self, end: usize) -> impl Iterator<Item = usize> + '_ {
        self.backward.get(end).into_iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// All facts ordered by start, then end
    pub fn iter(&self) -> impl Iterator<Item = Interval> + '_ {
        self.forward
            .iter()
            .enumerate()
            .flat_map(|(start, ends)| ends.iter().map(move |&end| Interval::new(start, end)))
    }

    /// Facts present in `self` but not in `other`
    pub fn difference<'a>(
        &'a self,
        other: &'a IntervalTable,
    ) -> impl Iterator<Item = Interval> + 'a {
        self.iter()
            .filter(move |iv| !other.contains(iv.start, iv.end))
    }
}
