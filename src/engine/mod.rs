//! Pulseboard Metrics Engine
//!
//! This module provides the synthetic metrics functionality:
//!
//! - **types**: Value objects (MetricValue, TimeSeriesPoint, DashboardData)
//! - **synth**: Seasonal, compounding, noisy monthly series
//! - **delta**: Previous-period values and trends from growth percentages
//! - **period**: Period selectors and their month horizons
//! - **views**: Revenue splits and monthly composites
//! - **catalog**: Shared seed tables
//! - **clock**: Injectable wall clock
//! - **engine**: Orchestrates all of the above
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Period → months ─┐
//! Clock  → anchor ─┼→ synthesize(revenue) ─┐
//! Rng    → noise  ─┘  synthesize(orders)  ─┴→ SalesOverTime → views
//!                                                    Catalog ─┘
//! ```

pub mod catalog;
pub mod clock;
pub mod delta;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod error;
pub mod period;
pub mod synth;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use catalog::{Catalog, HeadlineFigures};
pub use clock::{Clock, FixedClock, SteppingClock, SystemClock};
pub use delta::calculate_metric;
pub use engine::{EngineSettings, MetricsEngine};
pub use error::{EngineError, EngineResult};
pub use period::{resolve_period, Period};
pub use synth::{seasonal_factor, synthesize, synthesize_sales, SeriesParams};
pub use types::{
    AnalyticsTotals, AnalyticsView, CategoryShare, DashboardData, DashboardMetrics,
    DashboardStats, DemographicGroup, DeviceData, DeviceType, GrowthTier, LocationData,
    MetricValue, MonthlyPerformance, Product, ProductCategory, ProductSummary, RegionSales,
    RevenueBreakdown, SalesOverTime, TimeSeries, TimeSeriesPoint, Trend, UserDemographics,
    UserStatistics,
};
pub use views::{analytics_totals, monthly_performance, revenue_breakdown, ProfitSplit};
