//! Payload planner solver.
//!
//! [`DeliveryPlanner`] runs the planning steps in their required order:
//! travel costs first, then the partition, then result queries. Querying a
//! step before its prerequisite ran is reported as a [`PlannerError`].
//! [`solve`] runs all steps in one go.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::cost::CostModel;
use crate::error::{ConfigurationError, PlannerError};
use crate::euclidean::EuclideanTravelCost;
use crate::partition::PartitionTable;
use crate::schedule::Schedule;
use crate::traits::{Payload, TravelCostProvider};
use crate::usage::{UsageColumns, UsageCostTable};

/// A planning instance as handed over by upstream parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerInput {
    /// Start and end point of every round trip.
    pub origin: (f64, f64),
    /// Resource demand per item, in service order.
    pub demands: Vec<u64>,
    /// Location per item, same order and length as `demands`.
    pub locations: Vec<(f64, f64)>,
    pub cost_per_distance_unit: f64,
    pub budget_per_period: i64,
    /// Rows are items, columns are period slots. Absent means no usage cost.
    #[serde(default)]
    pub usage_cost: Option<Vec<Vec<f64>>>,
}

impl PlannerInput {
    /// Builds an input from caller-side payloads.
    pub fn from_payloads<P: Payload>(
        origin: (f64, f64),
        payloads: &[P],
        cost_per_distance_unit: f64,
        budget_per_period: i64,
        usage_cost: Option<Vec<Vec<f64>>>,
    ) -> Self {
        Self {
            origin,
            demands: payloads.iter().map(Payload::demand).collect(),
            locations: payloads.iter().map(Payload::location).collect(),
            cost_per_distance_unit,
            budget_per_period,
            usage_cost,
        }
    }

    /// Checks everything that can be checked without computing.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.demands.len() != self.locations.len() {
            return Err(ConfigurationError::LengthMismatch {
                demands: self.demands.len(),
                locations: self.locations.len(),
            });
        }
        if self.budget_per_period < 0 {
            return Err(ConfigurationError::NegativeBudget(self.budget_per_period));
        }
        if !self.cost_per_distance_unit.is_finite() || self.cost_per_distance_unit < 0.0 {
            return Err(ConfigurationError::InvalidCostPerDistanceUnit(
                self.cost_per_distance_unit,
            ));
        }
        check_coordinate("origin".to_string(), self.origin)?;
        for (index, location) in self.locations.iter().enumerate() {
            check_coordinate(format!("item {index}"), *location)?;
        }
        Ok(())
    }
}

fn check_coordinate(what: String, (x, y): (f64, f64)) -> Result<(), ConfigurationError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::NonFiniteCoordinate { what, x, y })
    }
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// How periods pick their usage cost column.
    pub usage_columns: UsageColumns,
    /// Rows of the partition with at least this many candidate starts are
    /// evaluated in parallel. Results do not depend on it.
    pub parallel_threshold: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            usage_columns: UsageColumns::PeriodOrdinal,
            parallel_threshold: 1024,
        }
    }
}

/// Step-ordered planning engine owning its caches and tables.
#[derive(Debug, Clone)]
pub struct DeliveryPlanner {
    input: PlannerInput,
    options: SolveOptions,
    usage: Option<UsageCostTable>,
    model: Option<CostModel>,
    table: Option<PartitionTable>,
}

impl DeliveryPlanner {
    /// Validates `input`; nothing is computed yet.
    pub fn new(input: PlannerInput, options: SolveOptions) -> Result<Self, ConfigurationError> {
        input.validate()?;
        let usage = input
            .usage_cost
            .as_deref()
            .map(UsageCostTable::new)
            .transpose()?;

        Ok(Self {
            input,
            options,
            usage,
            model: None,
            table: None,
        })
    }

    pub fn input(&self) -> &PlannerInput {
        &self.input
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Computes and caches the Euclidean round-trip cost of every item.
    pub fn fill_travel_costs(&mut self) {
        let provider = EuclideanTravelCost::new(self.input.cost_per_distance_unit);
        let costs = provider.travel_costs_for(self.input.origin, &self.input.locations);
        self.install_travel_costs(costs);
    }

    /// Computes and caches travel costs using a custom provider.
    pub fn fill_travel_costs_with<P: TravelCostProvider>(
        &mut self,
        provider: &P,
    ) -> Result<(), ConfigurationError> {
        let costs = provider.travel_costs_for(self.input.origin, &self.input.locations);
        if costs.len() != self.input.demands.len() {
            return Err(ConfigurationError::TravelCostMismatch {
                items: self.input.demands.len(),
                costs: costs.len(),
            });
        }
        self.install_travel_costs(costs);
        Ok(())
    }

    fn install_travel_costs(&mut self, costs: Vec<u64>) {
        debug!(items = costs.len(), total = costs.iter().sum::<u64>(), "travel costs cached");
        self.model = Some(CostModel::new(
            &self.input.demands,
            costs,
            self.input.budget_per_period,
            self.usage.clone(),
            self.options.usage_columns,
        ));
        // a previous partition was computed against other travel costs
        self.table = None;
    }

    pub fn travel_costs(&self) -> Option<&[u64]> {
        self.model.as_ref().map(CostModel::travel_costs)
    }

    /// Cost model over the cached travel costs.
    pub fn cost_model(&self) -> Result<&CostModel, PlannerError> {
        self.model.as_ref().ok_or(PlannerError::TravelCostsMissing)
    }

    /// Usage cost of items `first..=last` serviced as period `period`.
    ///
    /// Only reads the usage table, so travel costs are not required.
    pub fn sequence_usage_cost(
        &self,
        first: usize,
        last: usize,
        period: usize,
    ) -> Result<f64, PlannerError> {
        match &self.usage {
            Some(table) => Ok(table.usage_cost(first, last, period, self.options.usage_columns)?),
            None => Ok(0.0),
        }
    }

    /// Runs the partition over the cached travel costs.
    #[instrument(skip_all, fields(items = self.input.demands.len()))]
    pub fn run_partition(&mut self) -> Result<(), PlannerError> {
        let model = self.cost_model()?;
        let table = PartitionTable::build(model, self.options.parallel_threshold)?;

        if table.lowest_cost().is_infinite() {
            warn!(
                budget = self.input.budget_per_period,
                "no partition keeps every period within budget"
            );
        }
        self.table = Some(table);
        Ok(())
    }

    pub fn partition(&self) -> Result<&PartitionTable, PlannerError> {
        self.table.as_ref().ok_or(PlannerError::NotSolved)
    }

    /// Minimal total cost over all partitions; `+inf` when infeasible.
    pub fn lowest_cost(&self) -> Result<f64, PlannerError> {
        Ok(self.partition()?.lowest_cost())
    }

    /// Number of periods in the optimal schedule, if feasible.
    pub fn period_count(&self) -> Result<Option<usize>, PlannerError> {
        let table = self.partition()?;
        Ok(table.period_count(table.len()))
    }

    /// Optimal schedule, or `None` when the instance is infeasible.
    pub fn reconstruct_schedule(&self) -> Result<Option<Schedule>, PlannerError> {
        let table = self.partition()?;
        Ok(Schedule::reconstruct(table, self.cost_model()?)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult {
    pub lowest_cost: f64,
    pub travel_costs: Vec<u64>,
    pub schedule: Option<Schedule>,
}

/// Runs every planning step on `input`.
#[instrument(skip_all, fields(items = input.demands.len()))]
pub fn solve(input: PlannerInput, options: SolveOptions) -> Result<PlanResult, PlannerError> {
    let mut planner = DeliveryPlanner::new(input, options)?;
    planner.fill_travel_costs();
    planner.run_partition()?;

    Ok(PlanResult {
        lowest_cost: planner.lowest_cost()?,
        travel_costs: planner.travel_costs().unwrap_or_default().to_vec(),
        schedule: planner.reconstruct_schedule()?,
    })
}
