// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The series is seeded with the very first close (`ema[0] = closes[0]`), not
// an SMA, so every index has a defined value — there is no warm-up gap. Chart
// overlays and the MACD construction both rely on this exact seeding, so it
// must not be changed to an SMA seed.

/// Compute the EMA series for the given `closes` slice and look-back `period`.
///
/// The result has the same length as `closes`, one EMA value per close,
/// defined from index 0.
///
/// # Edge cases
/// - Empty input => empty vec (length equality holds trivially).
/// - `period == 0` => all-NaN vec (precondition violation, surfaced as the
///   undefined sentinel rather than silently coerced).
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; closes.len()];
    }
    if closes.is_empty() {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    let mut result = Vec::with_capacity(closes.len());
    result.push(closes[0]);

    let mut prev_ema = closes[0];
    for &close in &closes[1..] {
        let ema = close * multiplier + prev_ema * (1.0 - multiplier);
        result.push(ema);
        prev_ema = ema;
    }

    result
}
