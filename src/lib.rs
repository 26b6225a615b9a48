// =============================================================================
// screener-core — streaming technical-indicator engine
// =============================================================================
//
// The deterministic core of a market screener, in three layers:
//
// - `indicators` — pure, full-length EMA / RSI / MACD / Bollinger transforms
//   over an ordered closing-price series, with NaN marking not-yet-available
//   entries.
// - `signals` — a rule table that turns the latest readings into buy/sell
//   votes, a 0-100 composite score, and a discrete rating.
// - `market_data` + `engine` — candle types, live-feed message parsing, and
//   the aggregator that merges live prices into the in-progress tail candle
//   of a historical series.
//
// The crate owns no connectivity, storage, or UI; it consumes candle series
// and price updates as plain data and hands derived series back the same way.

pub mod engine;
pub mod indicators;
pub mod market_data;
pub mod series;
pub mod signals;

pub use engine::{compute_indicators, IndicatorBundle, ScreenerEngine};
pub use market_data::{apply_live_price, Candle, LiveTick, LiveUpdate, SeriesKey, Timeframe};
pub use signals::{score_signals, IndicatorSnapshot, Rating, SignalScore};
