//! Test fixtures for payload-planner.
//!
//! Provides builders for payloads and planning instances with sensible
//! defaults: origin at (0, 0), one distance unit costs one resource unit,
//! no usage cost table.

#![allow(dead_code)]

use payload_planner::traits::Payload;
use payload_planner::PlannerInput;

/// Builder for test payloads.
#[derive(Clone, Debug)]
pub struct TestPayload {
    pub demand: u64,
    pub location: (f64, f64),
}

impl TestPayload {
    pub fn new(demand: u64) -> Self {
        Self {
            demand,
            location: (0.0, 0.0),
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.location = (x, y);
        self
    }
}

impl Payload for TestPayload {
    fn demand(&self) -> u64 {
        self.demand
    }

    fn location(&self) -> (f64, f64) {
        self.location
    }
}

/// Builder for planning instances.
#[derive(Clone, Debug)]
pub struct Instance {
    origin: (f64, f64),
    payloads: Vec<TestPayload>,
    cost_per_distance_unit: f64,
    budget_per_period: i64,
    usage_cost: Option<Vec<Vec<f64>>>,
}

impl Instance {
    pub fn new(budget_per_period: i64) -> Self {
        Self {
            origin: (0.0, 0.0),
            payloads: Vec::new(),
            cost_per_distance_unit: 1.0,
            budget_per_period,
            usage_cost: None,
        }
    }

    /// Payloads co-located with the origin, so travel is free.
    pub fn demands(self, demands: &[u64]) -> Self {
        let (x, y) = self.origin;
        self.demands_at(demands, x, y)
    }

    /// Payloads that all sit at the same location.
    pub fn demands_at(mut self, demands: &[u64], x: f64, y: f64) -> Self {
        self.payloads
            .extend(demands.iter().map(|demand| TestPayload::new(*demand).at(x, y)));
        self
    }

    pub fn payload(mut self, payload: TestPayload) -> Self {
        self.payloads.push(payload);
        self
    }

    pub fn cost_per_distance_unit(mut self, cost: f64) -> Self {
        self.cost_per_distance_unit = cost;
        self
    }

    /// Usage table where every item has the same row.
    pub fn uniform_usage(mut self, row: &[f64]) -> Self {
        self.usage_cost = Some(vec![row.to_vec(); self.payloads.len()]);
        self
    }

    pub fn usage(mut self, table: Vec<Vec<f64>>) -> Self {
        self.usage_cost = Some(table);
        self
    }

    pub fn build(self) -> PlannerInput {
        PlannerInput::from_payloads(
            self.origin,
            &self.payloads,
            self.cost_per_distance_unit,
            self.budget_per_period,
            self.usage_cost,
        )
    }
}
