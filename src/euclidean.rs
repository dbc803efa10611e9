//! Euclidean travel cost provider.
//!
//! Every payload is served by its own round trip from the origin, so the
//! cost of an item only depends on its straight-line distance to the origin.

use crate::traits::TravelCostProvider;

/// Straight-line distance between two points.
pub fn euclidean_distance(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean round-trip cost provider.
///
/// Converts the out-and-back distance into resource units and rounds up,
/// since a resource that is only fractionally available cannot be spent.
#[derive(Debug, Clone)]
pub struct EuclideanTravelCost {
    /// Resource units consumed per unit of distance travelled.
    pub cost_per_distance_unit: f64,
}

impl EuclideanTravelCost {
    pub fn new(cost_per_distance_unit: f64) -> Self {
        Self {
            cost_per_distance_unit,
        }
    }

    /// Round-trip cost from `origin` to `location` and back.
    pub fn round_trip(&self, origin: (f64, f64), location: (f64, f64)) -> u64 {
        let exact = 2.0 * self.cost_per_distance_unit * euclidean_distance(origin, location);
        exact.ceil() as u64
    }
}

impl TravelCostProvider for EuclideanTravelCost {
    fn travel_costs_for(&self, origin: (f64, f64), locations: &[(f64, f64)]) -> Vec<u64> {
        locations
            .iter()
            .map(|location| self.round_trip(origin, *location))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_point() {
        assert_eq!(euclidean_distance((1.5, -2.0), (1.5, -2.0)), 0.0);
    }

    #[test]
    fn test_distance_known_triangle() {
        assert_eq!(euclidean_distance((0.0, 0.0), (3.0, 4.0)), 5.0);
        assert_eq!(euclidean_distance((3.0, 4.0), (0.0, 0.0)), 5.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let points = [(0.0, 0.0), (2.3, 1.0), (-7.0, 2.7), (1e3, -4.5)];
        for p in points {
            for q in points {
                assert_eq!(euclidean_distance(p, q), euclidean_distance(q, p));
            }
        }
    }

    #[test]
    fn test_round_trip_exact_distances() {
        let provider = EuclideanTravelCost::new(2.0);
        let costs = provider.travel_costs_for((0.0, 0.0), &[(3.0, 4.0), (6.0, 8.0)]);
        assert_eq!(costs, vec![20, 40]);
    }

    #[test]
    fn test_round_trip_rounds_up() {
        // 4 * 2.5080 = 10.03 and 4 * 7.5027 = 30.01
        let provider = EuclideanTravelCost::new(2.0);
        let costs = provider.travel_costs_for((0.0, 0.0), &[(2.3, 1.0), (7.0, 2.7)]);
        assert_eq!(costs, vec![11, 31]);
    }

    #[test]
    fn test_round_trip_fractional_rate() {
        let provider = EuclideanTravelCost::new(0.1);
        assert_eq!(provider.round_trip((0.0, 0.0), (3.0, 4.0)), 1);
    }

    #[test]
    fn test_co_located_item_is_free() {
        let provider = EuclideanTravelCost::new(7.0);
        assert_eq!(provider.round_trip((2.0, 2.0), (2.0, 2.0)), 0);
    }

    #[test]
    fn test_empty_locations() {
        let provider = EuclideanTravelCost::new(1.0);
        assert!(provider.travel_costs_for((0.0, 0.0), &[]).is_empty());
    }
}
