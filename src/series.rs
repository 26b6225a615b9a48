// =============================================================================
// Series Utilities
// =============================================================================
//
// Small numeric helpers shared by the indicator implementations: fixed-window
// slicing, mean / population variance, guarded division, and the NaN-sentinel
// convention.
//
// Indicator series are full-length: the output has one entry per input close,
// and entries the indicator cannot compute yet hold `f64::NAN`. Callers must
// check `is_defined` before using a value — NaN means "not yet available",
// never zero.

/// Whether a series entry holds an actual value (finite) rather than the
/// "not yet available" NaN sentinel.
pub fn is_defined(value: f64) -> bool {
    value.is_finite()
}

/// Arithmetic mean. Returns NaN on an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divide by `n`, not `n - 1`). Returns NaN on an empty
/// slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Divide, returning `None` when the denominator is zero or the quotient is
/// non-finite.
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        Some(quotient)
    } else {
        None
    }
}

/// The `period`-long window ending at (and including) index `end`.
///
/// Returns `None` when the window would reach past the start of the slice or
/// when `period` is zero.
pub fn window_ending_at(values: &[f64], end: usize, period: usize) -> Option<&[f64]> {
    if period == 0 || end >= values.len() || end + 1 < period {
        return None;
    }
    Some(&values[end + 1 - period..=end])
}
