// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// of the trailing `period`-long window.

use crate::series::{mean, population_variance, window_ending_at};

/// Full-length Bollinger Band series. Indices before `period - 1` hold the
/// NaN sentinel in all three bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub sma: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Calculate Bollinger Bands over the full closing-price series.
///
/// For each index `i >= period - 1`:
/// - `sma[i]`   = mean of `closes[i-period+1..=i]`
/// - `upper[i]` = sma + `std_dev_mult` * σ
/// - `lower[i]` = sma - `std_dev_mult` * σ
///
/// σ uses population variance (divide by `period`, not `period - 1`).
/// Earlier indices, or every index when `period == 0` or the input is too
/// short, hold NaN — never an error.
pub fn calculate_bollinger(closes: &[f64], period: usize, std_dev_mult: f64) -> BollingerSeries {
    let mut bands = BollingerSeries {
        upper: vec![f64::NAN; closes.len()],
        sma: vec![f64::NAN; closes.len()],
        lower: vec![f64::NAN; closes.len()],
    };

    for i in 0..closes.len() {
        let Some(window) = window_ending_at(closes, i, period) else {
            continue;
        };
        let middle = mean(window);
        let std_dev = population_variance(window).sqrt();

        bands.sma[i] = middle;
        bands.upper[i] = middle + std_dev_mult * std_dev;
        bands.lower[i] = middle - std_dev_mult * std_dev;
    }

    bands
}
