// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator transforms over an ordered closing-price
// series. Every function returns a series the same length as its input, with
// `f64::NAN` marking entries before the indicator's minimum window — callers
// check `series::is_defined` rather than handling errors.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use bollinger::{calculate_bollinger, BollingerSeries};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, MacdSeries};
pub use rsi::calculate_rsi;
