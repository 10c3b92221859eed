//! Core data types for the Pulseboard metrics engine
//!
//! This module defines the value objects produced by the engine:
//! - `MetricValue`: a headline figure with its prior-period value and trend
//! - `TimeSeriesPoint` / `TimeSeries`: monthly synthesized values
//! - `SalesOverTime`: revenue and order series of equal length
//! - Catalog records: categories, products, user statistics, demographics
//! - `DashboardData` and `AnalyticsView`: the aggregate roots
//!
//! All types serialize with camelCase field names so they can be handed
//! straight to a chart or table renderer.

use super::error::{EngineError, EngineResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Direction of change between two periods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Classify a growth figure by its sign
    pub fn from_growth(growth: f64) -> Self {
        if growth > 0.0 {
            Trend::Up
        } else if growth < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        };
        f.pad(name)
    }
}

/// A headline metric with growth against the previous period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricValue {
    pub current: f64,
    pub previous: f64,
    /// Growth in percent (23.5 means +23.5%)
    pub growth: f64,
    pub trend: Trend,
}

/// One monthly point of a synthesized series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    /// First day of the month
    pub date: NaiveDate,
    pub value: u64,
    /// Human-readable month, e.g. "Jan 2024"
    pub label: String,
}

impl TimeSeriesPoint {
    /// Create a point for the month starting at `date`
    pub fn new(date: NaiveDate, value: u64) -> Self {
        Self {
            date,
            value,
            label: date.format("%b %Y").to_string(),
        }
    }

    /// Month abbreviation without the year ("Jan")
    pub fn month(&self) -> String {
        self.date.format("%b").to_string()
    }
}

/// Chronologically ascending monthly series
pub type TimeSeries = Vec<TimeSeriesPoint>;

/// Revenue and order series over the same months
///
/// Both series always have the same length, so records built by zipping
/// them position by position never under- or overrun.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SalesOverTime {
    revenue: TimeSeries,
    orders: TimeSeries,
}

impl SalesOverTime {
    /// Pair two series, rejecting mismatched horizons
    pub fn new(revenue: TimeSeries, orders: TimeSeries) -> EngineResult<Self> {
        if revenue.len() != orders.len() {
            return Err(EngineError::SeriesLengthMismatch {
                revenue: revenue.len(),
                orders: orders.len(),
            });
        }
        Ok(Self { revenue, orders })
    }

    pub fn revenue(&self) -> &[TimeSeriesPoint] {
        &self.revenue
    }

    pub fn orders(&self) -> &[TimeSeriesPoint] {
        &self.orders
    }

    /// Number of months covered
    pub fn len(&self) -> usize {
        self.revenue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revenue.is_empty()
    }

    /// Iterate revenue and order points of the same month together
    pub fn months(&self) -> impl Iterator<Item = (&TimeSeriesPoint, &TimeSeriesPoint)> {
        self.revenue.iter().zip(self.orders.iter())
    }
}

/// Headline metrics shown on the dashboard cards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub revenue: MetricValue,
    pub orders: MetricValue,
    pub customers: MetricValue,
    pub average_order_value: MetricValue,
}

/// Sales for one product category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    /// Sales amount
    pub value: u64,
    pub percentage: f64,
    /// Hex color used by chart renderers
    pub color: String,
    pub growth: f64,
}

/// A single product in the top sellers table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Sales amount
    pub sales: u64,
    /// Units sold
    pub units: u64,
    pub growth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Growth bucket used to highlight fast movers
    pub fn growth_tier(&self) -> GrowthTier {
        GrowthTier::classify(self.growth)
    }
}

/// Growth bucket for a product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum GrowthTier {
    /// Growth of 20% or less
    Low,
    /// Growth above 20%
    Medium,
    /// Growth above 30%
    High,
}

impl std::fmt::Display for GrowthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GrowthTier::Low => "low",
            GrowthTier::Medium => "medium",
            GrowthTier::High => "high",
        };
        f.pad(name)
    }
}

impl GrowthTier {
    pub fn classify(growth: f64) -> Self {
        if growth > 30.0 {
            GrowthTier::High
        } else if growth > 20.0 {
            GrowthTier::Medium
        } else {
            GrowthTier::Low
        }
    }
}

/// Aggregate figures over a list of products
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub total_sales: u64,
    pub total_units: u64,
    /// Mean growth in percent, 0 for an empty list
    pub average_growth: f64,
}

impl ProductSummary {
    pub fn from_products(products: &[Product]) -> Self {
        let total_sales = products.iter().map(|p| p.sales).sum();
        let total_units = products.iter().map(|p| p.units).sum();
        let average_growth = if products.is_empty() {
            0.0
        } else {
            products.iter().map(|p| p.growth).sum::<f64>() / products.len() as f64
        };

        Self {
            total_sales,
            total_units,
            average_growth,
        }
    }
}

/// User engagement statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub total_users: u64,
    pub active_users: u64,
    pub new_users: u64,
    pub retention_rate: f64,
    pub churn_rate: f64,
    /// Minutes
    pub average_session_duration: f64,
    pub conversion_rate: f64,
}

/// Users in one age bracket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemographicGroup {
    pub label: String,
    pub value: u64,
    pub percentage: f64,
}

/// Users and revenue for one country
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationData {
    pub country: String,
    pub users: u64,
    pub percentage: f64,
    pub revenue: u64,
}

/// Device family used to access the shop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
}

/// Users and sessions for one device family
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceData {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub users: u64,
    pub percentage: f64,
    pub sessions: u64,
}

/// User breakdowns by age, location and device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDemographics {
    pub age_groups: Vec<DemographicGroup>,
    pub locations: Vec<LocationData>,
    pub devices: Vec<DeviceData>,
}

/// Sales attributed to a world region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionSales {
    pub region: String,
    pub sales: u64,
    pub percentage: f64,
    pub color: String,
}

/// Category name with its share of sales (pie chart input)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub value: f64,
}

/// Legacy top-line counters
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub total_orders: f64,
    pub total_customers: f64,
    pub conversion_rate: f64,
}

/// Complete dashboard payload
///
/// The catalog collections are shared with the engine that built this value;
/// only the sales series and the timestamp differ between builds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub metrics: DashboardMetrics,
    pub sales_over_time: SalesOverTime,
    pub product_categories: Arc<Vec<ProductCategory>>,
    pub top_products: Arc<Vec<Product>>,
    pub user_statistics: Arc<UserStatistics>,
    pub user_demographics: Arc<UserDemographics>,
    pub last_updated: DateTime<Utc>,
}

impl DashboardData {
    /// Legacy top-line counters derived from the headline metrics
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_revenue: self.metrics.revenue.current,
            total_orders: self.metrics.orders.current,
            total_customers: self.metrics.customers.current,
            conversion_rate: self.user_statistics.conversion_rate,
        }
    }

    /// Category shares for pie charts
    pub fn category_shares(&self) -> Vec<CategoryShare> {
        self.product_categories
            .iter()
            .map(|c| CategoryShare {
                name: c.name.clone(),
                value: c.percentage,
            })
            .collect()
    }

    /// Summary over the top products table
    pub fn product_summary(&self) -> ProductSummary {
        ProductSummary::from_products(&self.top_products)
    }
}

/// Revenue split into profit and expenses for one month
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RevenueBreakdown {
    /// Month abbreviation ("Jan")
    pub month: String,
    pub date: NaiveDate,
    pub revenue: u64,
    pub profit: u64,
    pub expenses: u64,
}

/// Composite monthly record for the performance chart
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPerformance {
    pub month: String,
    pub revenue: u64,
    pub profit: u64,
    pub expenses: u64,
    pub orders: u64,
    /// Percent of revenue kept as profit
    pub profit_margin: f64,
}

/// Period totals shown above the analytics charts
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct AnalyticsTotals {
    pub revenue: u64,
    pub profit: u64,
}

/// Complete analytics payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub revenue_vs_profit: Vec<RevenueBreakdown>,
    pub performance: Vec<MonthlyPerformance>,
    pub sales_by_region: Arc<Vec<RegionSales>>,
    pub totals: AnalyticsTotals,
}
