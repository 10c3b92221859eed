//! Metric delta calculation
//!
//! Given the current value of a metric and its growth against the previous
//! period, back-computes the previous value and classifies the trend.

use super::error::{EngineError, EngineResult};
use super::types::{MetricValue, Trend};

/// Build a `MetricValue` from the current value and a growth percentage
///
/// `previous = round(current / (1 + growth_percent / 100))`. A growth of
/// -100% or below has no prior value and is rejected.
pub fn calculate_metric(current: f64, growth_percent: f64) -> EngineResult<MetricValue> {
    if !current.is_finite() {
        return Err(EngineError::NumericOverflow(format!(
            "metric value {current} is not finite"
        )));
    }
    if !growth_percent.is_finite() || growth_percent <= -100.0 {
        return Err(EngineError::InvalidGrowthPercent(growth_percent));
    }

    let previous = (current / (1.0 + growth_percent / 100.0)).round();

    Ok(MetricValue {
        current,
        previous,
        growth: growth_percent,
        trend: Trend::from_growth(growth_percent),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_revenue() {
        let m = calculate_metric(1_847_520.0, 23.5).unwrap();
        assert_eq!(m.previous, 1_495_968.0);
        assert_eq!(m.trend, Trend::Up);
        assert_eq!(m.growth, 23.5);
    }

    #[test]
    fn test_trend_follows_sign() {
        assert_eq!(calculate_metric(500.0, 4.4).unwrap().trend, Trend::Up);
        assert_eq!(calculate_metric(500.0, -12.0).unwrap().trend, Trend::Down);

        let flat = calculate_metric(500.0, 0.0).unwrap();
        assert_eq!(flat.trend, Trend::Stable);
        assert_eq!(flat.previous, 500.0);
    }

    #[test]
    fn test_previous_recomputes_current() {
        for (current, growth) in [(12_847.0, 18.2), (8_942.0, 12.7), (144.0, 4.4), (999.0, -37.5)] {
            let m = calculate_metric(current, growth).unwrap();
            let recomputed = (m.previous * (1.0 + growth / 100.0)).round();
            assert!(
                (recomputed - current).abs() <= 1.0,
                "{current} @ {growth}% recomputed as {recomputed}"
            );
        }
    }

    #[test]
    fn test_rejects_total_loss() {
        assert_eq!(
            calculate_metric(100.0, -100.0).unwrap_err(),
            EngineError::InvalidGrowthPercent(-100.0)
        );
        assert!(calculate_metric(100.0, -150.0).is_err());
        assert!(calculate_metric(100.0, f64::NAN).is_err());
        assert!(calculate_metric(f64::INFINITY, 5.0).is_err());
    }
}
