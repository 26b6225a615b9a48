// =============================================================================
// Candle types
// =============================================================================

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// A single OHLC candle. `time` is the bucket-start timestamp in epoch
/// seconds, aligned to the timeframe's bucket boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// OHLC coherence: `low <= open,close <= high`.
    pub fn is_coherent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.high >= self.open.max(self.close)
    }
}

impl std::fmt::Display for Candle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match DateTime::from_timestamp(self.time, 0) {
            Some(ts) => write!(
                f,
                "{} o:{} h:{} l:{} c:{}",
                ts.format("%Y-%m-%d %H:%M:%S"),
                self.open,
                self.high,
                self.low,
                self.close
            ),
            None => write!(
                f,
                "t:{} o:{} h:{} l:{} c:{}",
                self.time, self.open, self.high, self.low, self.close
            ),
        }
    }
}

/// Composite key that identifies one tracked candle series.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeriesKey {
    pub symbol: String,
    pub timeframe: super::aggregator::Timeframe,
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.symbol, self.timeframe)
    }
}

/// Extract the closing-price series from a candle series, preserving order.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::aggregator::Timeframe;

    #[test]
    fn coherence_check() {
        let ok = Candle {
            time: 0,
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
        };
        assert!(ok.is_coherent());

        let bad = Candle {
            time: 0,
            open: 10.0,
            high: 9.5, // high below open
            low: 9.0,
            close: 9.2,
        };
        assert!(!bad.is_coherent());
    }

    #[test]
    fn closes_preserve_order() {
        let series = [
            Candle { time: 0, open: 1.0, high: 2.0, low: 0.5, close: 1.5 },
            Candle { time: 60, open: 1.5, high: 3.0, low: 1.0, close: 2.5 },
        ];
        assert_eq!(closes(&series), vec![1.5, 2.5]);
    }

    #[test]
    fn key_display() {
        let key = SeriesKey {
            symbol: "BTCUSDT".into(),
            timeframe: Timeframe::parse("1h").unwrap(),
        };
        assert_eq!(key.to_string(), "BTCUSDT@1h");
    }

    #[test]
    fn display_formats_timestamp() {
        let candle = Candle {
            time: 0,
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
        };
        assert!(candle.to_string().starts_with("1970-01-01 00:00:00"));
    }
}
