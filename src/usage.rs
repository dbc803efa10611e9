//! Usage cost table backed by per-column prefix sums.
//!
//! Rows are items in service order, columns are period slots. Range sums
//! over a column are answered in O(1).

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ProvisioningError};

/// How a period picks its column in the usage cost table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageColumns {
    /// Column = period ordinal within the schedule.
    ///
    /// A single-column table applies to every period. Wider tables must
    /// cover every ordinal the partition evaluates.
    #[default]
    PeriodOrdinal,
    /// Columns are interchangeable service units; a period is charged the
    /// cheapest column over its item range.
    CheapestUnit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageCostTable {
    rows: usize,
    columns: usize,
    /// `prefix[c][r]` is the sum of column `c` over rows `[0, r)`.
    prefix: Vec<Vec<f64>>,
}

impl UsageCostTable {
    /// Builds the table from row-major cells.
    ///
    /// Every row must have the same, non-zero number of columns, and every
    /// cell must be finite.
    pub fn new(cells: &[Vec<f64>]) -> Result<Self, ConfigurationError> {
        let columns = cells.first().map_or(0, Vec::len);
        if !cells.is_empty() && columns == 0 {
            return Err(ConfigurationError::EmptyUsageColumns);
        }

        let mut prefix = vec![Vec::with_capacity(cells.len() + 1); columns];
        for column in prefix.iter_mut() {
            column.push(0.0);
        }

        for (row, values) in cells.iter().enumerate() {
            if values.len() != columns {
                return Err(ConfigurationError::RaggedUsageTable {
                    row,
                    found: values.len(),
                    expected: columns,
                });
            }
            for (column, (sums, value)) in prefix.iter_mut().zip(values).enumerate() {
                if !value.is_finite() {
                    return Err(ConfigurationError::NonFiniteUsageCost { row, column });
                }
                let running = sums[row];
                sums.push(running + value);
            }
        }

        Ok(Self {
            rows: cells.len(),
            columns,
            prefix,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Sum of `column` over rows `first..=last`.
    pub fn range_sum(
        &self,
        first: usize,
        last: usize,
        column: usize,
    ) -> Result<f64, ProvisioningError> {
        self.check_rows(last)?;
        let sums = self.prefix.get(column).ok_or(ProvisioningError::PeriodOutOfRange {
            period: column,
            columns: self.columns,
        })?;
        Ok(sums[last + 1] - sums[first])
    }

    /// Usage cost of servicing items `first..=last` as period `period`.
    pub fn usage_cost(
        &self,
        first: usize,
        last: usize,
        period: usize,
        policy: UsageColumns,
    ) -> Result<f64, ProvisioningError> {
        match policy {
            UsageColumns::PeriodOrdinal => {
                let column = if self.columns == 1 { 0 } else { period };
                self.range_sum(first, last, column)
            }
            UsageColumns::CheapestUnit => {
                self.check_rows(last)?;
                self.prefix
                    .iter()
                    .map(|sums| sums[last + 1] - sums[first])
                    .min_by(f64::total_cmp)
                    .ok_or(ProvisioningError::PeriodOutOfRange {
                        period,
                        columns: self.columns,
                    })
            }
        }
    }

    fn check_rows(&self, last: usize) -> Result<(), ProvisioningError> {
        if last >= self.rows {
            return Err(ProvisioningError::ItemOutOfRange {
                item: last,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> UsageCostTable {
        UsageCostTable::new(&[vec![10.0, 20.0, 30.0], vec![5.0, 25.0, 16.0]]).expect("valid table")
    }

    #[rstest]
    #[case(0, 15.0)]
    #[case(1, 45.0)]
    #[case(2, 46.0)]
    fn test_column_sums(#[case] column: usize, #[case] expected: f64) {
        assert_eq!(sample().range_sum(0, 1, column), Ok(expected));
    }

    #[test]
    fn test_single_row_range() {
        let table = sample();
        assert_eq!(table.range_sum(1, 1, 2), Ok(16.0));
        assert_eq!(table.range_sum(0, 0, 1), Ok(20.0));
    }

    #[test]
    fn test_period_ordinal_selects_column() {
        let table = sample();
        assert_eq!(table.usage_cost(0, 1, 1, UsageColumns::PeriodOrdinal), Ok(45.0));
    }

    #[test]
    fn test_period_beyond_columns_is_rejected() {
        let table = sample();
        assert_eq!(
            table.usage_cost(0, 1, 3, UsageColumns::PeriodOrdinal),
            Err(ProvisioningError::PeriodOutOfRange { period: 3, columns: 3 })
        );
    }

    #[test]
    fn test_single_column_applies_to_every_period() {
        let table = UsageCostTable::new(&[vec![1.0], vec![2.0], vec![4.0]]).expect("valid table");
        for period in 0..5 {
            assert_eq!(table.usage_cost(1, 2, period, UsageColumns::PeriodOrdinal), Ok(6.0));
        }
    }

    #[test]
    fn test_cheapest_unit_takes_minimum_column() {
        let table = sample();
        assert_eq!(table.usage_cost(0, 1, 7, UsageColumns::CheapestUnit), Ok(15.0));
        assert_eq!(table.usage_cost(1, 1, 0, UsageColumns::CheapestUnit), Ok(5.0));
    }

    #[test]
    fn test_missing_row_is_rejected() {
        let table = sample();
        assert_eq!(
            table.range_sum(0, 2, 0),
            Err(ProvisioningError::ItemOutOfRange { item: 2, rows: 2 })
        );
        assert_eq!(
            table.usage_cost(2, 2, 0, UsageColumns::CheapestUnit),
            Err(ProvisioningError::ItemOutOfRange { item: 2, rows: 2 })
        );
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = UsageCostTable::new(&[vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(
            result,
            Err(ConfigurationError::RaggedUsageTable {
                row: 1,
                found: 1,
                expected: 2,
            })
        );
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_non_finite_cells_are_rejected(#[case] bad: f64) {
        let result = UsageCostTable::new(&[vec![0.0, 1.0], vec![2.0, bad], vec![0.0, 0.0]]);
        assert_eq!(
            result,
            Err(ConfigurationError::NonFiniteUsageCost { row: 1, column: 1 })
        );
    }

    #[test]
    fn test_rows_without_columns_are_rejected() {
        assert_eq!(
            UsageCostTable::new(&[vec![], vec![]]),
            Err(ConfigurationError::EmptyUsageColumns)
        );
    }

    #[test]
    fn test_empty_table() {
        let table = UsageCostTable::new(&[]).expect("empty table is valid");
        assert_eq!(table.rows(), 0);
        assert_eq!(table.columns(), 0);
    }
}
