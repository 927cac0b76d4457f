//! Transition aggregation
//!
//! Counts, for every consecutive step pair, how many rows moved from each
//! class to each class. The representation is sparse: a (step, from, to)
//! combination that was never observed has no entry and weighs zero.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use crate::catalog::ClassCode;
use crate::data_source::SampleTable;

/// Count of rows transitioning `from -> to` between `step` and `step + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionCount {
    pub step: usize,
    pub from: ClassCode,
    pub to: ClassCode,
    pub count: u64,
}

/// All nonzero transition counts for a table, pair-major.
///
/// Within a step pair, counts keep the order their combination was first
/// observed in, which makes downstream node numbering deterministic for a
/// given consolidated table. The counts themselves are commutative sums and
/// do not depend on row order.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    counts: Vec<TransitionCount>,
    index: HashMap<(usize, ClassCode, ClassCode), usize>,
    pair_totals: Vec<u64>,
}

impl TransitionTable {
    /// All nonzero counts, ordered by step pair then first observation
    pub fn counts(&self) -> &[TransitionCount] {
        &self.counts
    }

    /// Nonzero counts for one step pair, in stored order
    pub fn for_step(&self, step: usize) -> impl Iterator<Item = &TransitionCount> {
        self.counts.iter().filter(move |tc| tc.step == step)
    }

    /// Weight of one transition; absent combinations weigh zero
    pub fn get(&self, step: usize, from: ClassCode, to: ClassCode) -> u64 {
        self.index
            .get(&(step, from, to))
            .map(|&i| self.counts[i].count)
            .unwrap_or(0)
    }

    /// Number of rows with both endpoints present on the given step pair
    pub fn pair_total(&self, step: usize) -> u64 {
        self.pair_totals.get(step).copied().unwrap_or(0)
    }

    /// Number of step pairs covered (step count minus one)
    pub fn step_pair_count(&self) -> usize {
        self.pair_totals.len()
    }

    /// Number of distinct nonzero transitions
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no valid transition was observed at all
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Aggregate a sample table into weighted transition counts.
///
/// For each consecutive step pair, every row with a class value on both sides
/// of the pair contributes one count. Rows missing either side of a pair are
/// skipped for that pair only.
pub fn aggregate(table: &SampleTable) -> TransitionTable {
    let pair_count = table.step_count() - 1;
    let mut counts: Vec<TransitionCount> = Vec::new();
    let mut index: HashMap<(usize, ClassCode, ClassCode), usize> = HashMap::new();
    let mut pair_totals = vec![0u64; pair_count];

    for step in 0..pair_count {
        for row in table.rows() {
            let (Some(from), Some(to)) = (row.value(step), row.value(step + 1)) else {
                continue;
            };
            pair_totals[step] += 1;
            match index.entry((step, from, to)) {
                Entry::Occupied(entry) => counts[*entry.get()].count += 1,
                Entry::Vacant(entry) => {
                    entry.insert(counts.len());
                    counts.push(TransitionCount {
                        step,
                        from,
                        to,
                        count: 1,
                    });
                }
            }
        }
    }

    tracing::debug!(
        "Aggregated {} distinct transitions across {} step pairs",
        counts.len(),
        pair_count
    );

    TransitionTable {
        counts,
        index,
        pair_totals,
    }
}
