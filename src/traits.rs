//! Core domain traits for the payload planner.
//!
//! These are intentionally minimal. Concrete apps implement them for their
//! own data models and hand the result to [`crate::solver::PlannerInput`].

/// A payload is a single item to be delivered from the origin.
pub trait Payload {
    /// Resource units the payload itself consumes.
    fn demand(&self) -> u64;

    /// Location coordinates (x, y).
    fn location(&self) -> (f64, f64);
}

/// Provides the round-trip resource cost of visiting each location.
///
/// The returned vector is indexed by the provided location order and holds
/// one non-negative, rounded-up cost per location.
pub trait TravelCostProvider {
    fn travel_costs_for(&self, origin: (f64, f64), locations: &[(f64, f64)]) -> Vec<u64>;
}
