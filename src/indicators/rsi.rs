// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the simple mean of the first
//          `period` gains / losses; the first RSI value lands at index
//          `period`.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// When the average loss is zero the ratio saturates: RSI = 100. This single
// guard covers both the seed and the smoothed recurrence.

/// Compute the full RSI series for the given `closes` and `period`.
///
/// The result has the same length as `closes`; indices `0..period` hold the
/// NaN sentinel (the first `period` deltas are consumed seeding the
/// averages), and every later index holds an RSI value in `[0, 100]`.
///
/// # Edge cases
/// - `period == 0` or `closes.len() < period + 1` => all-NaN vec, never an
///   error.
/// - `avg_loss == 0` (no down moves in the window) => RSI saturates to 100.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return result;
    }

    // --- Seed averages with the simple mean of the first `period` deltas ----
    let (sum_gain, sum_loss) = closes[..=period]
        .windows(2)
        .fold((0.0_f64, 0.0_f64), |(g, l), w| {
            let delta = w[1] - w[0];
            if delta > 0.0 {
                (g + delta, l)
            } else {
                (g, l + delta.abs())
            }
        });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    result[period] = rsi_from_averages(avg_gain, avg_loss);

    // --- Wilder's smoothing for subsequent values ----------------------------
    for i in period + 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { delta.abs() } else { 0.0 };

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        result[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    result
}

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// When `avg_loss` is zero the gain/loss ratio is treated as saturating and
/// RSI is exactly 100.0.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    match crate::series::safe_div(avg_gain, avg_loss) {
        Some(rs) => 100.0 - 100.0 / (1.0 + rs),
        None => 100.0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::is_defined;

    #[test]
    fn rsi_empty_input() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_period_zero_all_undefined() {
        let series = calculate_rsi(&[1.0, 2.0, 3.0], 0);
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_insufficient_data_all_undefined() {
        // Need period+1 closes (period deltas). 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14);
        assert_eq!(series.len(), 14);
        assert!(series.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_warm_up_prefix_is_undefined() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14);
        assert_eq!(series.len(), 30);
        for &v in &series[..14] {
            assert!(!is_defined(v));
        }
        for &v in &series[14..] {
            assert!(is_defined(v));
        }
    }

    #[test]
    fn rsi_all_gains_saturates_to_100() {
        // Strictly ascending prices: avg_loss stays 0, the guard engages.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14);
        for &v in &series[14..] {
            assert!((v - 100.0).abs() < 1e-12, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14);
        for &v in &series[14..] {
            assert!(v.abs() < 1e-12, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let series = calculate_rsi(&closes, 14);
        for &v in &series[14..] {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn rsi_regression_fixture() {
        // First Wilder value, computed by hand: over the first 14 deltas the
        // gains sum to 19 and the losses to 11, so RS = 19/11 and
        // RSI = 100 - 100/(1 + 19/11) = 190/3.
        let closes = [
            100.0, 102.0, 101.0, 105.0, 103.0, 98.0, 97.0, 99.0, 101.0, 100.0, 102.0, 104.0,
            103.0, 106.0, 108.0, 107.0, 105.0, 104.0, 103.0, 102.0, 100.0, 99.0, 98.0, 97.0, 96.0,
        ];
        let series = calculate_rsi(&closes, 14);
        assert_eq!(series.len(), 25);
        assert!(
            (series[14] - 190.0 / 3.0).abs() < 1e-9,
            "got {}, expected {}",
            series[14],
            190.0 / 3.0
        );
    }
}
