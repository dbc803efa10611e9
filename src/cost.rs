//! Cost model for a candidate period.
//!
//! A period servicing items `first..=last` pays an idle penalty for budget it
//! leaves unused plus the usage cost of its items in its period slot.

use crate::error::ProvisioningError;
use crate::usage::{UsageColumns, UsageCostTable};

#[derive(Debug, Clone)]
pub struct CostModel {
    budget_per_period: i64,
    travel_costs: Vec<u64>,
    /// `resource_prefix[k]` is the resource use of items `[0, k)`.
    ///
    /// Kept in `u128` so sums of `u64` demands and travel costs never wrap.
    resource_prefix: Vec<u128>,
    usage: Option<UsageCostTable>,
    usage_columns: UsageColumns,
}

impl CostModel {
    /// Builds the model from per-item demands and their cached travel costs.
    ///
    /// `demands` and `travel_costs` must have the same length.
    pub fn new(
        demands: &[u64],
        travel_costs: Vec<u64>,
        budget_per_period: i64,
        usage: Option<UsageCostTable>,
        usage_columns: UsageColumns,
    ) -> Self {
        debug_assert_eq!(demands.len(), travel_costs.len());

        let mut resource_prefix = Vec::with_capacity(demands.len() + 1);
        resource_prefix.push(0u128);
        let mut running = 0u128;
        for (demand, travel) in demands.iter().zip(&travel_costs) {
            running += u128::from(*demand) + u128::from(*travel);
            resource_prefix.push(running);
        }

        Self {
            budget_per_period,
            travel_costs,
            resource_prefix,
            usage,
            usage_columns,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.travel_costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.travel_costs.is_empty()
    }

    pub fn travel_costs(&self) -> &[u64] {
        &self.travel_costs
    }

    pub fn budget_per_period(&self) -> i64 {
        self.budget_per_period
    }

    /// Total demand plus travel cost of items `first..=last`.
    pub fn segment_resource_use(&self, first: usize, last: usize) -> u128 {
        self.resource_prefix[last + 1] - self.resource_prefix[first]
    }

    /// Smallest `first` for which `first..=last` fits the budget.
    ///
    /// Resource use only grows as a period reaches further back, so every
    /// start before this one over-commits. Returns `last + 1` when even
    /// `last` alone does not fit.
    pub fn earliest_start(&self, last: usize) -> usize {
        let end = self.resource_prefix[last + 1];
        let budget = u128::try_from(self.budget_per_period).unwrap_or(0);
        self.resource_prefix[..=last].partition_point(|&start| end - start > budget)
    }

    /// Budget left over by a period servicing `first..=last`.
    ///
    /// Negative when the period over-commits the budget, clamped at
    /// `i64::MIN` for overshoots too large to represent.
    pub fn idle_capacity(&self, first: usize, last: usize) -> i64 {
        let used = i128::try_from(self.segment_resource_use(first, last)).unwrap_or(i128::MAX);
        let idle = i128::from(self.budget_per_period) - used;
        i64::try_from(idle).unwrap_or(i64::MIN)
    }

    /// Penalty for leaving `idle_capacity` unused in a period ending at `last`.
    ///
    /// The period that ends with the final item is never penalised. Any
    /// other period is forbidden when over budget and otherwise pays the cube
    /// of its leftover capacity.
    pub fn idle_cost(&self, last: usize, idle_capacity: i64) -> f64 {
        if last + 1 == self.len() {
            return 0.0;
        }
        if idle_capacity < 0 {
            return f64::INFINITY;
        }
        let idle = idle_capacity as f64;
        idle * idle * idle
    }

    /// Usage cost of items `first..=last` serviced as period `period`.
    ///
    /// Zero everywhere when no usage table was supplied.
    pub fn usage_cost(
        &self,
        first: usize,
        last: usize,
        period: usize,
    ) -> Result<f64, ProvisioningError> {
        match &self.usage {
            Some(table) => table.usage_cost(first, last, period, self.usage_columns),
            None => Ok(0.0),
        }
    }

    /// Transition cost of servicing `first..=last` as period `period`.
    ///
    /// Over-budget periods cost `+inf`, the final one included, and skip the
    /// usage lookup.
    pub fn segment_cost(
        &self,
        first: usize,
        last: usize,
        period: usize,
    ) -> Result<f64, ProvisioningError> {
        let idle_capacity = self.idle_capacity(first, last);
        if idle_capacity < 0 {
            return Ok(f64::INFINITY);
        }
        let idle_cost = self.idle_cost(last, idle_capacity);
        Ok(idle_cost + self.usage_cost(first, last, period)?)
    }
}
