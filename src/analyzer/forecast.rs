//! Linear revenue forecast
//!
//! Ordinary least squares of revenue against a 1-based row index, evaluated
//! one step past the last row. No seasonality and no outlier handling.

/// Fitted line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit against x = 1..=n. Needs at least two points.
    pub fn fit(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }
        let count = n as f64;
        let mean_x = (count + 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / count;

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (i, y) in values.iter().enumerate() {
            let dx = (i + 1) as f64 - mean_x;
            sxy += dx * (y - mean_y);
            sxx += dx * dx;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Revenue projected for the period after the last row.
///
/// Returns 0 without fitting when there is no revenue column or fewer than
/// two rows.
pub fn forecast_next(revenue: Option<&[f64]>) -> f64 {
    let Some(values) = revenue else {
        return 0.0;
    };
    match LinearTrend::fit(values) {
        Some(trend) => trend.predict((values.len() + 1) as f64),
        None => 0.0,
    }
}
