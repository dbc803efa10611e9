//! Schedule representation for downstream consumers.
//!
//! A schedule is the ordered list of periods found by the partition, each
//! with the cost breakdown that produced it. Rendering and persistence
//! happen outside the planner core.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::error::ProvisioningError;
use crate::partition::PartitionTable;

/// One period of the schedule, servicing items `first..=last`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// Position of the period within the schedule, starting at 0.
    pub ordinal: usize,
    pub first: usize,
    pub last: usize,
    /// Demand plus travel cost of the period's items.
    pub resource_use: u128,
    /// Budget left unused.
    pub idle_capacity: i64,
    pub idle_cost: f64,
    pub usage_cost: f64,
}

impl Period {
    pub fn items(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    /// Number of items in the period; never zero.
    pub fn item_count(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn cost(&self) -> f64 {
        self.idle_cost + self.usage_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    periods: Vec<Period>,
    total_cost: f64,
}

impl Schedule {
    /// Walks the predecessor links of `table` back from the last item.
    ///
    /// Returns `Ok(None)` when the sequence cannot be partitioned.
    pub fn reconstruct(
        table: &PartitionTable,
        model: &CostModel,
    ) -> Result<Option<Self>, ProvisioningError> {
        let Some(boundaries) = table.boundaries() else {
            return Ok(None);
        };

        let mut periods = Vec::with_capacity(boundaries.len());
        for (ordinal, (first, last)) in boundaries.into_iter().enumerate() {
            let idle_capacity = model.idle_capacity(first, last);
            periods.push(Period {
                ordinal,
                first,
                last,
                resource_use: model.segment_resource_use(first, last),
                idle_capacity,
                idle_cost: model.idle_cost(last, idle_capacity),
                usage_cost: model.usage_cost(first, last, ordinal)?,
            });
        }

        Ok(Some(Self {
            periods,
            total_cost: table.lowest_cost(),
        }))
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Inclusive `(first, last)` item ranges, in service order.
    pub fn boundaries(&self) -> Vec<(usize, usize)> {
        self.periods.iter().map(|period| (period.first, period.last)).collect()
    }

    /// Ordinal of the period servicing `item`.
    pub fn period_of(&self, item: usize) -> Option<usize> {
        self.periods
            .iter()
            .find(|period| period.items().contains(&item))
            .map(|period| period.ordinal)
    }
}
