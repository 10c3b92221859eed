//! Engine error types
//!
//! Defines all domain errors the metrics engine can raise. Every failure is a
//! contract violation at the call site; nothing here is retried.

use thiserror::Error;

/// Errors that can occur while synthesizing or aggregating metrics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Series base value must be finite and strictly positive
    #[error("Invalid base value: {0} (must be finite and > 0)")]
    InvalidBaseValue(f64),

    /// Monthly growth rate must be finite and greater than -1
    #[error("Invalid growth rate: {0} (must be finite and > -1)")]
    InvalidGrowthRate(f64),

    /// Growth percentage must be finite and greater than -100
    #[error("Invalid growth percentage: {0} (must be finite and > -100)")]
    InvalidGrowthPercent(f64),

    /// Variance factor must lie in [0, 1)
    #[error("Invalid variance: {0} (must be in [0, 1))")]
    InvalidVariance(f64),

    /// Horizon must be at least one month
    #[error("Invalid horizon: {0} months (must be >= 1)")]
    InvalidHorizon(u32),

    /// Period selector outside the supported set
    #[error("Unknown period: {0} (expected one of 7d, 30d, 90d, 12m)")]
    UnknownPeriod(String),

    /// Parallel series that must be joined have different lengths
    #[error("Series length mismatch: revenue has {revenue} points, orders has {orders}")]
    SeriesLengthMismatch { revenue: usize, orders: usize },

    /// Profit share of revenue must lie in [0, 1]
    #[error("Invalid profit ratio: {0} (must be in [0, 1])")]
    InvalidProfitRatio(f64),

    /// A computed value was not finite or did not fit the output type
    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),

    /// Calendar arithmetic left chrono's supported range
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::UnknownPeriod("1y".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown period: 1y (expected one of 7d, 30d, 90d, 12m)"
        );

        let err = EngineError::SeriesLengthMismatch {
            revenue: 12,
            orders: 3,
        };
        assert_eq!(
            err.to_string(),
            "Series length mismatch: revenue has 12 points, orders has 3"
        );
    }

    #[test]
    fn test_growth_percent_message() {
        let err = EngineError::InvalidGrowthPercent(-100.0);
        assert!(err.to_string().contains("-100"));
    }
}
