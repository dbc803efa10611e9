//! Optimal partition of the item sequence into consecutive periods.
//!
//! Entry `k` of the table holds the cheapest way to have serviced the first
//! `k` items with a whole number of periods:
//!
//! ```text
//! best[k] = min over j in [0, k) of best[j] + segment_cost(j, k - 1, periods[j])
//! ```
//!
//! The number of periods used to reach `best[j]` is carried alongside the
//! cost, since it selects the usage cost column of the next period.
//!
//! # Complexity
//!
//! O(n²) transitions, each O(1) thanks to the prefix sums in [`CostModel`].
//! Starts that over-commit the budget are skipped up front.

use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use crate::cost::CostModel;
use crate::error::ProvisioningError;

/// Best known way to reach a prefix length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    /// Total cost of the prefix.
    pub cost: f64,
    /// Number of periods used.
    pub periods: usize,
    /// Prefix length the last period starts from. Zero for the empty prefix.
    pub predecessor: usize,
}

/// State of one prefix length in the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry {
    /// Not visited by the recurrence yet.
    Unset,
    /// Every partition of this prefix over-commits some period.
    Unreachable,
    Reached(Label),
}

impl Entry {
    /// Cost of the entry; `+inf` when unreachable, `None` when unset.
    pub fn cost(&self) -> Option<f64> {
        match self {
            Entry::Unset => None,
            Entry::Unreachable => Some(f64::INFINITY),
            Entry::Reached(label) => Some(label.cost),
        }
    }

    pub fn label(&self) -> Option<&Label> {
        match self {
            Entry::Reached(label) => Some(label),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTable {
    entries: Vec<Entry>,
}

impl PartitionTable {
    /// Runs the recurrence over every prefix of `model`'s items.
    ///
    /// Rows with at least `parallel_threshold` candidate starts are evaluated
    /// on the rayon pool. Lower cost wins and ties go to the smallest start.
    /// Candidates are folded in start order in both paths, so the table and
    /// the first error reported do not depend on the threshold.
    #[instrument(level = "debug", skip_all, fields(items = model.len()))]
    pub fn build(
        model: &CostModel,
        parallel_threshold: usize,
    ) -> Result<Self, ProvisioningError> {
        let n = model.len();
        let mut table = Self::empty(n);

        for k in 1..=n {
            let start = model.earliest_start(k - 1);

            let best = if k - start >= parallel_threshold {
                let candidates: Vec<_> = (start..k)
                    .into_par_iter()
                    .map(|j| table.candidate(model, j, k))
                    .collect();
                fold_candidates(candidates)?
            } else {
                fold_candidates((start..k).map(|j| table.candidate(model, j, k)))?
            };

            let entry = match best {
                Some(label) => Entry::Reached(label),
                None => Entry::Unreachable,
            };
            trace!(k, candidates = k - start, ?entry, "row");
            table.entries[k] = entry;
        }

        debug!(
            lowest_cost = table.lowest_cost(),
            periods = ?table.period_count(n),
            "partition complete"
        );
        Ok(table)
    }

    fn empty(n: usize) -> Self {
        let mut entries = vec![Entry::Unset; n + 1];
        entries[0] = Entry::Reached(Label {
            cost: 0.0,
            periods: 0,
            predecessor: 0,
        });
        Self { entries }
    }

    /// Label reached by appending the period `j..k` to the best prefix `j`.
    fn candidate(
        &self,
        model: &CostModel,
        j: usize,
        k: usize,
    ) -> Result<Option<Label>, ProvisioningError> {
        let Entry::Reached(from) = self.entries[j] else {
            return Ok(None);
        };
        let cost = from.cost + model.segment_cost(j, k - 1, from.periods)?;
        if !cost.is_finite() {
            return Ok(None);
        }
        Ok(Some(Label {
            cost,
            periods: from.periods + 1,
            predecessor: j,
        }))
    }

    /// Number of items the table covers.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entry(&self, k: usize) -> Option<&Entry> {
        self.entries.get(k)
    }

    /// `best[k]`.
    pub fn best(&self, k: usize) -> Option<f64> {
        self.entries.get(k).and_then(Entry::cost)
    }

    /// Periods used to reach `best[k]`, if reachable.
    pub fn period_count(&self, k: usize) -> Option<usize> {
        self.entries.get(k).and_then(Entry::label).map(|label| label.periods)
    }

    /// Start of the last period on the best path to `k`, if reachable.
    pub fn predecessor(&self, k: usize) -> Option<usize> {
        self.entries.get(k).and_then(Entry::label).map(|label| label.predecessor)
    }

    /// Minimal total cost of the whole sequence; `+inf` when infeasible.
    pub fn lowest_cost(&self) -> f64 {
        self.best(self.len()).unwrap_or(f64::INFINITY)
    }

    /// Inclusive `(first, last)` item ranges of the optimal periods, in order.
    ///
    /// Returns `None` when the sequence cannot be partitioned.
    pub fn boundaries(&self) -> Option<Vec<(usize, usize)>> {
        let mut k = self.len();
        let mut periods = Vec::new();
        while k > 0 {
            let label = self.entries[k].label()?;
            periods.push((label.predecessor, k - 1));
            k = label.predecessor;
        }
        periods.reverse();
        Some(periods)
    }
}

/// Best label of a row, or the error of the smallest failing start.
fn fold_candidates<I>(candidates: I) -> Result<Option<Label>, ProvisioningError>
where
    I: IntoIterator<Item = Result<Option<Label>, ProvisioningError>>,
{
    candidates
        .into_iter()
        .try_fold(None, |acc, candidate| candidate.map(|candidate| better(acc, candidate)))
}

/// Lower cost wins, ties go to the smaller predecessor.
fn better(a: Option<Label>, b: Option<Label>) -> Option<Label> {
    match (a, b) {
        (Some(a), Some(b)) => {
            if b.cost < a.cost || (b.cost == a.cost && b.predecessor < a.predecessor) {
                Some(b)
            } else {
                Some(a)
            }
        }
        (a, None) => a,
        (None, b) => b,
    }
}
