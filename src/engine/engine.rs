//! Metrics engine
//!
//! Orchestrates synthesis and aggregation for a dashboard session:
//! - Owns the random source (seedable) and the clock (injectable)
//! - Shares one seed catalog with every view it builds
//! - Stamps each view with a strictly increasing `lastUpdated`
//!
//! # Example
//!
//! ```rust
//! use pulseboard::engine::{MetricsEngine, Period};
//!
//! let mut engine = MetricsEngine::seeded(42);
//! let dashboard = engine.build_dashboard_view(Period::Quarter)?;
//! assert_eq!(dashboard.sales_over_time.len(), 3);
//! # Ok::<(), pulseboard::engine::EngineError>(())
//! ```

use super::catalog::Catalog;
use super::clock::{Clock, SystemClock};
use super::error::EngineResult;
use super::period::Period;
use super::synth::{synthesize, synthesize_sales, SeriesParams};
use super::types::{AnalyticsView, DashboardData, SalesOverTime, TimeSeries};
use super::views::{analytics_totals, monthly_performance, revenue_breakdown, ProfitSplit};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Tunable parameters of a `MetricsEngine`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub revenue: SeriesParams,
    pub orders: SeriesParams,
    pub profit_split: ProfitSplit,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            revenue: SeriesParams::REVENUE,
            orders: SeriesParams::ORDERS,
            profit_split: ProfitSplit::default(),
        }
    }
}

impl EngineSettings {
    /// Check both series parameter sets
    pub fn validate(&self) -> EngineResult<()> {
        self.revenue.validate()?;
        self.orders.validate()
    }
}

/// Synthetic metrics engine
pub struct MetricsEngine<R: Rng = StdRng> {
    rng: R,
    clock: Arc<dyn Clock>,
    catalog: Arc<Catalog>,
    settings: EngineSettings,
    last_stamp: Option<DateTime<Utc>>,
}

impl MetricsEngine<StdRng> {
    /// Engine with an entropy-seeded random source and the system clock
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy(), Arc::new(SystemClock))
    }

    /// Engine whose series repeat for the same seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), Arc::new(SystemClock))
    }

    /// Engine seeded when `seed` is given, entropy-seeded otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for MetricsEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MetricsEngine<R> {
    /// Engine over an explicit random source and clock
    pub fn with_rng(rng: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng,
            clock,
            catalog: Arc::new(Catalog::standard()),
            settings: EngineSettings::default(),
            last_stamp: None,
        }
    }

    /// Builder: replace the clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builder: replace the seed catalog
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Builder: replace the series and split settings
    pub fn settings(mut self, settings: EngineSettings) -> EngineResult<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    pub fn get_catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn get_settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Month the newest synthesized point falls in
    fn anchor(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// Current time, bumped past the previous stamp when the clock stalls
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = self.clock.now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    /// Synthesize a single series ending in the current month
    pub fn synthesize(&mut self, params: &SeriesParams, months: u32) -> EngineResult<TimeSeries> {
        let anchor = self.anchor();
        synthesize(params, months, anchor, &mut self.rng)
    }

    /// Synthesize revenue and orders for a period
    pub fn sales_over_time(&mut self, period: Period) -> EngineResult<SalesOverTime> {
        let anchor = self.anchor();
        synthesize_sales(
            &self.settings.revenue,
            &self.settings.orders,
            period.months(),
            anchor,
            &mut self.rng,
        )
    }

    /// Build the full dashboard payload for a period
    pub fn build_dashboard_view(&mut self, period: Period) -> EngineResult<DashboardData> {
        let metrics = self.catalog.headline.metrics()?;
        let sales_over_time = self.sales_over_time(period)?;
        let last_updated = self.stamp();

        tracing::debug!(
            period = %period,
            months = sales_over_time.len(),
            last_updated = %last_updated,
            "Built dashboard view"
        );

        Ok(DashboardData {
            metrics,
            sales_over_time,
            product_categories: Arc::clone(&self.catalog.product_categories),
            top_products: Arc::clone(&self.catalog.top_products),
            user_statistics: Arc::clone(&self.catalog.user_statistics),
            user_demographics: Arc::clone(&self.catalog.user_demographics),
            last_updated,
        })
    }

    /// Build the analytics payload for a period
    pub fn build_analytics_view(&mut self, period: Period) -> EngineResult<AnalyticsView> {
        let sales = self.sales_over_time(period)?;
        let split = self.settings.profit_split;

        let revenue_vs_profit = revenue_breakdown(sales.revenue(), &split);
        let performance = monthly_performance(&sales, &split);
        let totals = analytics_totals(&revenue_vs_profit);

        tracing::debug!(
            period = %period,
            months = sales.len(),
            revenue = totals.revenue,
            profit = totals.profit,
            "Built analytics view"
        );

        Ok(AnalyticsView {
            revenue_vs_profit,
            performance,
            sales_by_region: Arc::clone(&self.catalog.sales_by_region),
            totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::{FixedClock, SteppingClock};
    use chrono::TimeZone;

    fn fixed_engine(seed: u64) -> MetricsEngine {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        MetricsEngine::seeded(seed).clock(Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_dashboard_horizon_follows_period() {
        let mut engine = fixed_engine(1);
        for period in Period::all() {
            let view = engine.build_dashboard_view(*period).unwrap();
            assert_eq!(view.sales_over_time.len(), period.months() as usize);
            assert_eq!(view.sales_over_time.orders().len(), period.months() as usize);
        }
    }

    #[test]
    fn test_series_end_in_clock_month() {
        let mut engine = fixed_engine(1);
        let view = engine.build_dashboard_view(Period::Year).unwrap();

        let last = view.sales_over_time.revenue().last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(last.label, "Mar 2024");
        assert_eq!(view.sales_over_time.revenue()[0].label, "Apr 2023");
    }

    #[test]
    fn test_repeated_builds_share_catalog() {
        let mut engine = fixed_engine(5);
        let first = engine.build_dashboard_view(Period::Year).unwrap();
        let second = engine.build_dashboard_view(Period::Year).unwrap();

        assert!(Arc::ptr_eq(&first.product_categories, &second.product_categories));
        assert!(Arc::ptr_eq(&first.top_products, &second.top_products));
        assert!(Arc::ptr_eq(&first.user_demographics, &second.user_demographics));
        assert_eq!(first.metrics, second.metrics);
        assert_ne!(first.sales_over_time, second.sales_over_time);
        assert!(second.last_updated > first.last_updated);
    }

    #[test]
    fn test_stamps_follow_advancing_clock() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let clock = SteppingClock::new(start, Duration::seconds(1));
        let mut engine = MetricsEngine::seeded(2).clock(Arc::new(clock));

        // anchor read, then stamp read
        let view = engine.build_dashboard_view(Period::Month).unwrap();
        assert_eq!(view.last_updated, start + Duration::seconds(1));
    }

    #[test]
    fn test_same_seed_same_views() {
        let a = fixed_engine(42).build_analytics_view(Period::Year).unwrap();
        let b = fixed_engine(42).build_analytics_view(Period::Year).unwrap();
        assert_eq!(a.revenue_vs_profit, b.revenue_vs_profit);
        assert_eq!(a.performance, b.performance);
    }

    #[test]
    fn test_analytics_decomposition() {
        let mut engine = fixed_engine(9);
        let view = engine.build_analytics_view(Period::Year).unwrap();

        assert_eq!(view.revenue_vs_profit.len(), 12);
        assert_eq!(view.performance.len(), 12);
        assert!(view
            .performance
            .iter()
            .all(|row| row.profit + row.expenses == row.revenue && row.profit_margin == 35.0));

        let revenue: u64 = view.revenue_vs_profit.iter().map(|r| r.revenue).sum();
        assert_eq!(view.totals.revenue, revenue);
        assert_eq!(view.sales_by_region.len(), 5);
    }

    #[test]
    fn test_performance_matches_breakdown_months() {
        let mut engine = fixed_engine(4);
        let view = engine.build_analytics_view(Period::Quarter).unwrap();

        for (breakdown, performance) in view.revenue_vs_profit.iter().zip(&view.performance) {
            assert_eq!(breakdown.month, performance.month);
            assert_eq!(breakdown.revenue, performance.revenue);
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = EngineSettings {
            revenue: SeriesParams::new(-1.0, 0.0, 0.0),
            ..EngineSettings::default()
        };
        assert!(MetricsEngine::seeded(1).settings(settings).is_err());
    }

    #[test]
    fn test_dashboard_json_shape() {
        let mut engine = fixed_engine(3);
        let view = engine.build_dashboard_view(Period::Quarter).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert!(json["lastUpdated"].is_string());
        assert_eq!(json["salesOverTime"]["revenue"].as_array().unwrap().len(), 3);
        assert_eq!(json["metrics"]["averageOrderValue"]["trend"], "up");
        assert_eq!(json["topProducts"][0]["imageUrl"], "/products/iphone.jpg");
        assert_eq!(json["userDemographics"]["devices"][0]["type"], "desktop");
    }
}
