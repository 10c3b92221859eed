//! # Pulseboard
//!
//! Synthetic metrics engine for an e-commerce analytics dashboard. Produces
//! believable monthly revenue and order series, headline metric cards with
//! period-over-period deltas, and the aggregate views a dashboard renders.
//!
//! ## Features
//!
//! - **Series synthesis**: Compounding growth, yearly seasonality and bounded noise
//! - **Repeatable runs**: Inject a seeded random source and a fixed clock
//! - **Shared catalogs**: Every view borrows the same seed tables
//! - **Table helpers**: Sorting and pagination for product listings
//! - **Export**: CSV output for spreadsheets
//!
//! ## Modules
//!
//! - [`engine`]: Synthesizer, delta calculator, period resolver and view builder
//! - [`table`]: Sort and page state for tabular views
//! - [`format`]: Currency, number and percentage display strings
//! - [`export`]: CSV export
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use pulseboard::engine::{calculate_metric, MetricsEngine, Period, Trend};
//!
//! let revenue = calculate_metric(1_847_520.0, 23.5)?;
//! assert_eq!(revenue.trend, Trend::Up);
//!
//! let mut engine = MetricsEngine::seeded(7);
//! let period: Period = "90d".parse()?;
//! let analytics = engine.build_analytics_view(period)?;
//! assert_eq!(analytics.performance.len(), 3);
//! # Ok::<(), pulseboard::engine::EngineError>(())
//! ```

pub mod config;
pub mod engine;
pub mod export;
pub mod format;
pub mod table;

// Re-export top-level types for convenience
pub use engine::{
    calculate_metric, resolve_period, AnalyticsView, Catalog, Clock, DashboardData, EngineError,
    EngineResult, EngineSettings, MetricValue, MetricsEngine, Period, SalesOverTime, SeriesParams,
    TimeSeriesPoint, Trend,
};

pub use table::{Page, SortDirection, SortState, TableError, TableRow, TableState};

pub use export::{ExportError, ExportResult};

pub use config::{Config, ConfigError, EngineConfig, LoggingConfig, TableConfig};
