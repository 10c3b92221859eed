//! Period selectors
//!
//! Maps the coarse period filter shown on a dashboard to the number of
//! monthly points the synthesizer produces. The synthesizer has no
//! sub-month resolution, so both `7d` and `30d` degrade to a single month.

use super::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse reporting period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Last 7 days
    #[serde(rename = "7d")]
    Week,
    /// Last 30 days
    #[serde(rename = "30d")]
    Month,
    /// Last 90 days
    #[serde(rename = "90d")]
    Quarter,
    /// Last 12 months
    #[default]
    #[serde(rename = "12m")]
    Year,
}

impl Period {
    /// Get all periods for iteration
    pub fn all() -> &'static [Period] {
        &[Period::Week, Period::Month, Period::Quarter, Period::Year]
    }

    /// Number of monthly points to synthesize for this period
    pub fn months(&self) -> u32 {
        match self {
            Period::Week | Period::Month => 1,
            Period::Quarter => 3,
            Period::Year => 12,
        }
    }

    /// Selector string as used in filters and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "7d",
            Period::Month => "30d",
            Period::Quarter => "90d",
            Period::Year => "12m",
        }
    }
}

/// Resolve a period selector string to a month count
pub fn resolve_period(selector: &str) -> EngineResult<u32> {
    selector.parse::<Period>().map(|p| p.months())
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(Period::Week),
            "30d" => Ok(Period::Month),
            "90d" => Ok(Period::Quarter),
            "12m" => Ok(Period::Year),
            other => Err(EngineError::UnknownPeriod(other.to_string())),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution() {
        assert_eq!(resolve_period("12m").unwrap(), 12);
        assert_eq!(resolve_period("90d").unwrap(), 3);
        assert_eq!(resolve_period("7d").unwrap(), 1);
        assert_eq!(resolve_period("30d").unwrap(), 1);
    }

    #[test]
    fn test_unknown_selector() {
        let err = resolve_period("ytd").unwrap_err();
        assert_eq!(err, EngineError::UnknownPeriod("ytd".to_string()));
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(" 12M ".parse::<Period>().unwrap(), Period::Year);
        assert_eq!(Period::Quarter.to_string(), "90d");
    }

    #[test]
    fn test_serde_uses_selector_strings() {
        let json = serde_json::to_string(&Period::Quarter).unwrap();
        assert_eq!(json, "\"90d\"");

        let period: Period = serde_json::from_str("\"7d\"").unwrap();
        assert_eq!(period, Period::Week);
        assert_eq!(Period::default(), Period::Year);
    }
}
