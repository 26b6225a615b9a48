// =============================================================================
// Screener Engine — indicator bundle + per-symbol series state
// =============================================================================
//
// Ties the pure pieces together: computes the full indicator bundle at the
// screener's standard periods, extracts the latest readings into a snapshot
// for the scorer, and owns the per-(symbol, timeframe) candle series that the
// live feed updates. Indicator computation is stateless and recomputed from
// scratch on every evaluation, so it can never desync from the series.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::indicators::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, BollingerSeries, MacdSeries,
};
use crate::market_data::{aggregator, closes, Candle, LiveUpdate, SeriesKey};
use crate::series::is_defined;
use crate::signals::{score_signals, IndicatorSnapshot, SignalScore};

// Standard periods used across the screener.
pub const EMA_TREND_PERIOD: usize = 50;
pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;

/// Every derived indicator series for one closing-price series, all
/// index-aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorBundle {
    pub ema_trend: Vec<f64>,
    pub rsi: Vec<f64>,
    pub macd: MacdSeries,
    pub bollinger: BollingerSeries,
}

/// Compute the full indicator bundle at the standard periods.
pub fn compute_indicators(closes: &[f64]) -> IndicatorBundle {
    IndicatorBundle {
        ema_trend: calculate_ema(closes, EMA_TREND_PERIOD),
        rsi: calculate_rsi(closes, RSI_PERIOD),
        macd: calculate_macd(closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
        bollinger: calculate_bollinger(closes, BOLLINGER_PERIOD, BOLLINGER_STD_DEV),
    }
}

impl IndicatorBundle {
    /// The latest reading of each series, with NaN sentinels mapped to
    /// `None`. `close` is the latest close of the underlying series.
    pub fn latest(&self, close: Option<f64>) -> IndicatorSnapshot {
        IndicatorSnapshot {
            close,
            rsi: last_defined(&self.rsi),
            macd_line: last_defined(&self.macd.macd_line),
            macd_signal: last_defined(&self.macd.signal_line),
            ema_trend: last_defined(&self.ema_trend),
            bollinger_upper: last_defined(&self.bollinger.upper),
            bollinger_lower: last_defined(&self.bollinger.lower),
        }
    }
}

fn last_defined(series: &[f64]) -> Option<f64> {
    series.last().copied().filter(|v| is_defined(*v))
}

// ---------------------------------------------------------------------------
// ScreenerEngine — per-(symbol, timeframe) candle series store
// ---------------------------------------------------------------------------

/// Thread-safe store of candle series keyed by (symbol, timeframe). One
/// logical owner per key must serialize live updates; the lock only protects
/// the map across keys.
#[derive(Default)]
pub struct ScreenerEngine {
    series: RwLock<HashMap<SeriesKey, Vec<Candle>>>,
}

impl ScreenerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or replace) the historical series for a key. Must happen before
    /// live updates for that key; on reconnect, callers refetch history and
    /// call this again rather than resuming into a stale bucket.
    pub fn load_history(&self, key: SeriesKey, candles: Vec<Candle>) {
        info!(key = %key, count = candles.len(), "loading historical series");
        self.series.write().insert(key, candles);
    }

    /// Merge one live price into the key's in-progress candle. Returns
    /// `Ignored` when the key has no history loaded.
    pub fn apply_live_price(&self, key: &SeriesKey, price: f64, now: i64) -> LiveUpdate {
        let mut map = self.series.write();
        match map.get_mut(key) {
            Some(series) => aggregator::apply_live_price(series, key.timeframe, price, now),
            None => {
                debug!(key = %key, price, "live price for untracked series, ignoring");
                LiveUpdate::Ignored
            }
        }
    }

    /// Snapshot of the key's candle series (empty when untracked).
    pub fn candles(&self, key: &SeriesKey) -> Vec<Candle> {
        self.series.read().get(key).cloned().unwrap_or_default()
    }

    /// Snapshot of the key's closing-price series (empty when untracked).
    pub fn closes(&self, key: &SeriesKey) -> Vec<f64> {
        self.series
            .read()
            .get(key)
            .map(|series| closes(series))
            .unwrap_or_default()
    }

    /// Recompute the indicator bundle on the current closes and score the
    /// latest readings. `None` when no history is loaded for the key.
    pub fn evaluate(&self, key: &SeriesKey) -> Option<SignalScore> {
        let closes = self.closes(key);
        if closes.is_empty() {
            return None;
        }
        let bundle = compute_indicators(&closes);
        let snapshot = bundle.latest(closes.last().copied());
        Some(score_signals(&snapshot))
    }
}
