// =============================================================================
// Moving Average Convergence / Divergence (MACD)
// =============================================================================
//
// MACD line  = EMA(closes, fast) - EMA(closes, slow)
// Signal     = EMA(macd_line, signal)
// Histogram  = macd_line - signal_line
//
// Both component EMAs are seeded from the first close and therefore defined
// at every index, so all three MACD series are full-length with no warm-up
// gap.

use super::ema::calculate_ema;

/// The three MACD output series, each the same length as the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Calculate MACD for the given closes with the given fast/slow/signal
/// periods (conventionally 12/26/9).
pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = calculate_ema(&macd_line, signal);

    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MacdSeries {
        macd_line,
        signal_line,
        histogram,
    }
}
