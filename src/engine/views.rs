//! Derived aggregate views
//!
//! Pure functions that turn synthesized series into the composite records
//! consumed by charts: revenue vs profit, monthly performance and period
//! totals.

use super::error::{EngineError, EngineResult};
use super::types::{
    AnalyticsTotals, MonthlyPerformance, RevenueBreakdown, SalesOverTime, TimeSeriesPoint,
};

/// Fixed split of revenue into profit and expenses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitSplit {
    ratio: f64,
}

impl Default for ProfitSplit {
    fn default() -> Self {
        Self { ratio: 0.35 }
    }
}

impl ProfitSplit {
    /// Create a split keeping `ratio` of revenue as profit
    pub fn new(ratio: f64) -> EngineResult<Self> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(EngineError::InvalidProfitRatio(ratio));
        }
        Ok(Self { ratio })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Split revenue into `(profit, expenses)`
    ///
    /// Profit is rounded to whole units and expenses take the remainder, so
    /// the two always add back up to `revenue`.
    pub fn split(&self, revenue: u64) -> (u64, u64) {
        let profit = ((revenue as f64 * self.ratio).round() as u64).min(revenue);
        (profit, revenue - profit)
    }

    /// Profit margin in percent, to two decimals
    pub fn margin_percent(&self) -> f64 {
        (self.ratio * 10_000.0).round() / 100.0
    }
}

/// Revenue, profit and expenses per month of a revenue series
pub fn revenue_breakdown(
    revenue: &[TimeSeriesPoint],
    split: &ProfitSplit,
) -> Vec<RevenueBreakdown> {
    revenue
        .iter()
        .map(|point| {
            let (profit, expenses) = split.split(point.value);
            RevenueBreakdown {
                month: point.month(),
                date: point.date,
                revenue: point.value,
                profit,
                expenses,
            }
        })
        .collect()
}

/// Monthly composite of revenue split and order count
pub fn monthly_performance(sales: &SalesOverTime, split: &ProfitSplit) -> Vec<MonthlyPerformance> {
    let margin = split.margin_percent();

    sales
        .months()
        .map(|(revenue, orders)| {
            let (profit, expenses) = split.split(revenue.value);
            MonthlyPerformance {
                month: revenue.month(),
                revenue: revenue.value,
                profit,
                expenses,
                orders: orders.value,
                profit_margin: margin,
            }
        })
        .collect()
}

/// Revenue and profit summed over a breakdown
pub fn analytics_totals(breakdown: &[RevenueBreakdown]) -> AnalyticsTotals {
    breakdown
        .iter()
        .fold(AnalyticsTotals::default(), |totals, row| AnalyticsTotals {
            revenue: totals.revenue.saturating_add(row.revenue),
            profit: totals.profit.saturating_add(row.profit),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[u64]) -> Vec<TimeSeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                TimeSeriesPoint::new(NaiveDate::from_ymd_opt(2024, i as u32 + 1, 1).unwrap(), *v)
            })
            .collect()
    }

    #[test]
    fn test_split_reproduces_revenue() {
        let split = ProfitSplit::default();
        // 10 * 0.35 = 3.5 and 10 * 0.65 = 6.5 would both round up to 11
        assert_eq!(split.split(10), (4, 6));

        for revenue in [0, 1, 7, 10, 30, 125_000, 187_321, 999_999] {
            let (profit, expenses) = split.split(revenue);
            assert_eq!(profit + expenses, revenue);
        }
    }

    #[test]
    fn test_profit_ratio_bounds() {
        assert!(ProfitSplit::new(1.0).is_ok());
        assert_eq!(
            ProfitSplit::new(1.2).unwrap_err(),
            EngineError::InvalidProfitRatio(1.2)
        );
        assert!(ProfitSplit::new(f64::NAN).is_err());
    }

    #[test]
    fn test_margin_follows_ratio() {
        assert_eq!(ProfitSplit::default().margin_percent(), 35.0);
        assert_eq!(ProfitSplit::new(0.4).unwrap().margin_percent(), 40.0);
    }

    #[test]
    fn test_breakdown_rows() {
        let rows = revenue_breakdown(&series(&[100_000, 120_000]), &ProfitSplit::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "Jan");
        assert_eq!(rows[0].profit, 35_000);
        assert_eq!(rows[0].expenses, 65_000);
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

        let totals = analytics_totals(&rows);
        assert_eq!(totals.revenue, 220_000);
        assert_eq!(totals.profit, 77_000);
    }

    #[test]
    fn test_performance_joins_orders() {
        let revenue = series(&[100_000, 110_000, 90_000]);
        let sales = SalesOverTime::new(revenue, series(&[800, 850, 900])).unwrap();
        let rows = monthly_performance(&sales, &ProfitSplit::default());

        let orders: Vec<u64> = rows.iter().map(|r| r.orders).collect();
        assert_eq!(orders, vec![800, 850, 900]);
        assert!(rows.iter().all(|r| r.profit + r.expenses == r.revenue));
        assert!(rows.iter().all(|r| r.profit_margin == 35.0));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(revenue_breakdown(&[], &ProfitSplit::default()).is_empty());
        assert_eq!(analytics_totals(&[]), AnalyticsTotals::default());
    }
}
