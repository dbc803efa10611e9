//! Error types for planner construction and evaluation.

use thiserror::Error;

/// Rejections raised while validating a [`crate::solver::PlannerInput`].
///
/// All of these are detected before any computation happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("got {demands} demands but {locations} locations")]
    LengthMismatch { demands: usize, locations: usize },

    #[error("budget per period must be non-negative, got {0}")]
    NegativeBudget(i64),

    #[error("cost per distance unit must be finite and non-negative, got {0}")]
    InvalidCostPerDistanceUnit(f64),

    #[error("coordinate ({x}, {y}) of {what} is not finite")]
    NonFiniteCoordinate { what: String, x: f64, y: f64 },

    #[error("usage cost row {row} has {found} columns, expected {expected}")]
    RaggedUsageTable {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("usage cost table rows have no columns")]
    EmptyUsageColumns,

    #[error("usage cost at row {row}, column {column} is not finite")]
    NonFiniteUsageCost { row: usize, column: usize },

    #[error("travel cost provider returned {costs} costs for {items} items")]
    TravelCostMismatch { items: usize, costs: usize },
}

/// The usage cost table is too small for a lookup the partition needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    /// A period ordinal beyond the table's column count was requested.
    #[error("usage cost table has {columns} period columns, period {period} requested")]
    PeriodOutOfRange { period: usize, columns: usize },

    /// An item index beyond the table's row count was requested.
    #[error("usage cost table has {rows} rows, item {item} requested")]
    ItemOutOfRange { item: usize, rows: usize },
}

/// Errors from [`crate::solver::DeliveryPlanner`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),

    /// The partition was requested before travel costs were computed.
    #[error("travel costs have not been computed")]
    TravelCostsMissing,

    /// A result was queried before the partition ran.
    #[error("partition has not been run")]
    NotSolved,
}
