//! Time-series synthesis
//!
//! Produces plausible monthly business series by multiplying three
//! independent factors:
//!
//! ```text
//! value = base * (1 + growth)^age * seasonal(month) * noise
//!
//! seasonal(m) = 1 + sin(m / 12 * 2π) * 0.15      m in 0..12
//! noise       = 1 + (uniform[0, 1) - 0.5) * variance
//! ```
//!
//! The oldest point has age 0; the newest point falls in the anchor month.
//! Noise is uniform, not Gaussian: the output is illustrative, not a
//! statistical model.

use super::error::{EngineError, EngineResult};
use super::types::{SalesOverTime, TimeSeries, TimeSeriesPoint};
use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Peak seasonal swing around the trend (±15%)
pub const SEASONAL_AMPLITUDE: f64 = 0.15;

/// Parameters of one synthesized series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesParams {
    /// Value of the oldest month before seasonality and noise
    pub base_value: f64,
    /// Compound growth per month (0.035 = +3.5%)
    pub growth_rate: f64,
    /// Full width of the noise band (0.12 = ±6%)
    pub variance: f64,
}

impl SeriesParams {
    /// Monthly revenue in dollars
    pub const REVENUE: SeriesParams = SeriesParams::new(125_000.0, 0.035, 0.12);

    /// Monthly order count
    pub const ORDERS: SeriesParams = SeriesParams::new(850.0, 0.03, 0.15);

    pub const fn new(base_value: f64, growth_rate: f64, variance: f64) -> Self {
        Self {
            base_value,
            growth_rate,
            variance,
        }
    }

    /// Check every parameter against its domain
    pub fn validate(&self) -> EngineResult<()> {
        if !self.base_value.is_finite() || self.base_value <= 0.0 {
            return Err(EngineError::InvalidBaseValue(self.base_value));
        }
        if !self.growth_rate.is_finite() || self.growth_rate <= -1.0 {
            return Err(EngineError::InvalidGrowthRate(self.growth_rate));
        }
        if !(0.0..1.0).contains(&self.variance) {
            return Err(EngineError::InvalidVariance(self.variance));
        }
        Ok(())
    }
}

/// Seasonal multiplier for a zero-based month index (0 = January)
pub fn seasonal_factor(month_index: u32) -> f64 {
    1.0 + (month_index as f64 / 12.0 * std::f64::consts::TAU).sin() * SEASONAL_AMPLITUDE
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Synthesize `months` monthly points ending in the month of `anchor`
///
/// Draws exactly one uniform sample per point from `rng`, even when the
/// variance is zero, so that two series drawn from the same seeded source
/// stay aligned regardless of their parameters.
pub fn synthesize<R: Rng + ?Sized>(
    params: &SeriesParams,
    months: u32,
    anchor: NaiveDate,
    rng: &mut R,
) -> EngineResult<TimeSeries> {
    params.validate()?;
    if months == 0 {
        return Err(EngineError::InvalidHorizon(months));
    }

    let anchor = month_start(anchor);
    anchor
        .checked_sub_months(Months::new(months - 1))
        .ok_or_else(|| {
            EngineError::DateOutOfRange(format!("{} months before {anchor}", months - 1))
        })?;

    let mut series = Vec::with_capacity(months as usize);

    for i in (0..months).rev() {
        let date = anchor.checked_sub_months(Months::new(i)).ok_or_else(|| {
            EngineError::DateOutOfRange(format!("{i} months before {anchor}"))
        })?;

        let seasonal = seasonal_factor(date.month0());
        let noise = 1.0 + (rng.gen::<f64>() - 0.5) * params.variance;
        let growth = (1.0 + params.growth_rate).powf((months - 1 - i) as f64);

        let raw = (params.base_value * growth * seasonal * noise).round();
        if !raw.is_finite() || raw >= u64::MAX as f64 {
            return Err(EngineError::NumericOverflow(format!(
                "series value for {date} does not fit (base {}, growth {})",
                params.base_value, params.growth_rate
            )));
        }

        series.push(TimeSeriesPoint::new(date, raw as u64));
    }

    Ok(series)
}

/// Synthesize revenue and order series over the same horizon
///
/// Revenue is drawn first, then orders, from the same random source.
pub fn synthesize_sales<R: Rng + ?Sized>(
    revenue: &SeriesParams,
    orders: &SeriesParams,
    months: u32,
    anchor: NaiveDate,
    rng: &mut R,
) -> EngineResult<SalesOverTime> {
    let revenue = synthesize(revenue, months, anchor, rng)?;
    let orders = synthesize(orders, months, anchor, rng)?;
    SalesOverTime::new(revenue, orders)
}
