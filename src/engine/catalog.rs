//! Seed catalog
//!
//! Static reference tables the dashboard shows next to the synthesized
//! series: product categories, top products, user statistics, demographics
//! and regional sales. The catalog is built once per engine and shared with
//! every view it produces.

use super::delta::calculate_metric;
use super::error::EngineResult;
use super::types::{
    DashboardMetrics, DemographicGroup, DeviceData, DeviceType, LocationData, Product,
    ProductCategory, RegionSales, UserDemographics, UserStatistics,
};
use std::sync::Arc;

/// Current headline figures and their growth in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlineFigures {
    pub revenue: f64,
    pub revenue_growth: f64,
    pub orders: f64,
    pub orders_growth: f64,
    pub customers: f64,
    pub customers_growth: f64,
    pub average_order_value_growth: f64,
}

impl Default for HeadlineFigures {
    fn default() -> Self {
        Self {
            revenue: 1_847_520.0,
            revenue_growth: 23.5,
            orders: 12_847.0,
            orders_growth: 18.2,
            customers: 8_942.0,
            customers_growth: 12.7,
            average_order_value_growth: 4.4,
        }
    }
}

impl HeadlineFigures {
    /// Revenue per order, rounded to whole dollars
    pub fn average_order_value(&self) -> f64 {
        if self.orders == 0.0 {
            return 0.0;
        }
        (self.revenue / self.orders).round()
    }

    /// Dashboard card metrics with their previous-period values
    pub fn metrics(&self) -> EngineResult<DashboardMetrics> {
        Ok(DashboardMetrics {
            revenue: calculate_metric(self.revenue, self.revenue_growth)?,
            orders: calculate_metric(self.orders, self.orders_growth)?,
            customers: calculate_metric(self.customers, self.customers_growth)?,
            average_order_value: calculate_metric(
                self.average_order_value(),
                self.average_order_value_growth,
            )?,
        })
    }
}

/// Shared reference tables
#[derive(Debug, Clone)]
pub struct Catalog {
    pub headline: HeadlineFigures,
    pub product_categories: Arc<Vec<ProductCategory>>,
    pub top_products: Arc<Vec<Product>>,
    pub user_statistics: Arc<UserStatistics>,
    pub user_demographics: Arc<UserDemographics>,
    pub sales_by_region: Arc<Vec<RegionSales>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The stock catalog of an online retailer
    pub fn standard() -> Self {
        Self {
            headline: HeadlineFigures::default(),
            product_categories: Arc::new(standard_categories()),
            top_products: Arc::new(standard_products()),
            user_statistics: Arc::new(UserStatistics {
                total_users: 47_892,
                active_users: 28_456,
                new_users: 4_237,
                retention_rate: 68.5,
                churn_rate: 8.3,
                average_session_duration: 12.4,
                conversion_rate: 3.87,
            }),
            user_demographics: Arc::new(standard_demographics()),
            sales_by_region: Arc::new(standard_regions()),
        }
    }
}

fn category(
    id: &str,
    name: &str,
    value: u64,
    percentage: f64,
    color: &str,
    growth: f64,
) -> ProductCategory {
    ProductCategory {
        id: id.to_string(),
        name: name.to_string(),
        value,
        percentage,
        color: color.to_string(),
        growth,
    }
}

fn standard_categories() -> Vec<ProductCategory> {
    vec![
        category("electronics", "Electronics", 647_850, 35.1, "#3B82F6", 28.4),
        category("fashion", "Fashion & Apparel", 516_230, 27.9, "#8B5CF6", 22.1),
        category("home", "Home & Living", 368_500, 19.9, "#EC4899", 19.8),
        category("beauty", "Beauty & Care", 203_870, 11.0, "#F59E0B", 31.2),
        category("sports", "Sports & Outdoors", 111_070, 6.1, "#10B981", 15.7),
    ]
}

fn product(
    n: u32,
    name: &str,
    category: &str,
    sales: u64,
    units: u64,
    growth: f64,
    image: &str,
) -> Product {
    Product {
        id: format!("prod-{n:03}"),
        name: name.to_string(),
        category: category.to_string(),
        sales,
        units,
        growth,
        image_url: Some(format!("/products/{image}.jpg")),
    }
}

fn standard_products() -> Vec<Product> {
    vec![
        product(1, "iPhone 15 Pro", "Electronics", 284_750, 1_245, 42.3, "iphone"),
        product(2, "Sony WH-1000XM5 Headphones", "Electronics", 167_890, 2_847, 35.8, "headphones"),
        product(3, "Nike Air Max 2024", "Fashion & Apparel", 145_620, 1_876, 28.4, "sneakers"),
        product(4, "Samsung 55\" OLED TV", "Electronics", 132_450, 456, 24.1, "tv"),
        product(5, "Dyson V15 Vacuum", "Home & Living", 118_340, 892, 31.9, "vacuum"),
        product(6, "MacBook Air M3", "Electronics", 98_750, 234, 19.6, "macbook"),
        product(7, "Lululemon Yoga Set", "Fashion & Apparel", 87_650, 1_543, 26.7, "yoga"),
        product(8, "La Prairie Skin Serum", "Beauty & Care", 76_340, 1_289, 44.2, "serum"),
        product(9, "Peloton Bike+", "Sports & Outdoors", 65_890, 178, 15.3, "bike"),
        product(10, "KitchenAid Stand Mixer", "Home & Living", 54_230, 687, 21.8, "mixer"),
    ]
}

fn standard_demographics() -> UserDemographics {
    let age = |label: &str, value, percentage| DemographicGroup {
        label: label.to_string(),
        value,
        percentage,
    };
    let location = |country: &str, users, percentage, revenue| LocationData {
        country: country.to_string(),
        users,
        percentage,
        revenue,
    };
    let device = |device_type, users, percentage, sessions| DeviceData {
        device_type,
        users,
        percentage,
        sessions,
    };

    UserDemographics {
        age_groups: vec![
            age("18-24", 7_184, 15.0),
            age("25-34", 16_756, 35.0),
            age("35-44", 13_158, 27.5),
            age("45-54", 7_184, 15.0),
            age("55+", 3_610, 7.5),
        ],
        locations: vec![
            location("United States", 18_915, 39.5, 729_630),
            location("United Kingdom", 7_184, 15.0, 277_128),
            location("Germany", 5_751, 12.0, 221_703),
            location("France", 4_789, 10.0, 184_752),
            location("Canada", 3_832, 8.0, 147_802),
            location("Australia", 2_873, 6.0, 110_851),
            location("Japan", 2_394, 5.0, 92_376),
            location("Others", 2_154, 4.5, 83_138),
        ],
        devices: vec![
            device(DeviceType::Desktop, 22_099, 46.2, 142_567),
            device(DeviceType::Mobile, 20_963, 43.8, 187_234),
            device(DeviceType::Tablet, 4_830, 10.0, 31_456),
        ],
    }
}

fn standard_regions() -> Vec<RegionSales> {
    let region = |name: &str, sales, percentage, color: &str| RegionSales {
        region: name.to_string(),
        sales,
        percentage,
        color: color.to_string(),
    };

    vec![
        region("North America", 729_630, 39.5, "#3B82F6"),
        region("Europe", 683_583, 37.0, "#8B5CF6"),
        region("Latin America", 92_376, 5.0, "#F59E0B"),
        region("Asia Pacific", 313_916, 17.0, "#EC4899"),
        region("Middle East", 27_926, 1.5, "#10B981"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Trend;

    fn assert_sums_to_hundred(label: &str, percentages: impl Iterator<Item = f64>) {
        let total: f64 = percentages.sum();
        assert!((total - 100.0).abs() < 0.5, "{label} shares sum to {total}");
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let catalog = Catalog::standard();
        assert_sums_to_hundred("category", catalog.product_categories.iter().map(|c| c.percentage));
        assert_sums_to_hundred("region", catalog.sales_by_region.iter().map(|r| r.percentage));

        let demographics = &catalog.user_demographics;
        assert_sums_to_hundred("age", demographics.age_groups.iter().map(|g| g.percentage));
        assert_sums_to_hundred("location", demographics.locations.iter().map(|l| l.percentage));
        assert_sums_to_hundred("device", demographics.devices.iter().map(|d| d.percentage));
    }

    #[test]
    fn test_headline_metrics() {
        let headline = HeadlineFigures::default();
        assert_eq!(headline.average_order_value(), 144.0);

        let metrics = headline.metrics().unwrap();
        assert_eq!(metrics.revenue.current, 1_847_520.0);
        assert_eq!(metrics.revenue.previous, 1_495_968.0);
        assert_eq!(metrics.orders.trend, Trend::Up);
        assert_eq!(metrics.average_order_value.current, 144.0);
    }

    #[test]
    fn test_products_are_ranked_by_sales() {
        let catalog = Catalog::standard();
        let products = &catalog.top_products;

        assert_eq!(products.len(), 10);
        assert_eq!(products[0].id, "prod-001");
        assert_eq!(products[9].image_url.as_deref(), Some("/products/mixer.jpg"));
        assert!(products.windows(2).all(|w| w[0].sales >= w[1].sales));
    }
}
