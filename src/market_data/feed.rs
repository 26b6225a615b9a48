// =============================================================================
// Live-feed message parsing
// =============================================================================
//
// The market-data feed delivers one JSON message per price update, in one of
// two shapes:
//
// ```json
// { "s": "BTCUSDT", "p": "37020.5" }
// { "s": "BTC/USDT", "k": [1700000000, 37000.0, 37050.0, 36990.0, 37020.5, 123.4] }
// ```
//
// The `k` form is an OHLCV tuple `[time, open, high, low, close, volume]`;
// its close (index 4) is the live price. Numeric values may arrive as JSON
// numbers or as strings. This module only parses messages — opening and
// maintaining the connection belongs to the surrounding system.

use anyhow::{bail, Context, Result};

/// One parsed live price update.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveTick {
    pub symbol: String,
    pub price: f64,
}

/// Index of the close price inside the OHLCV tuple form.
const TUPLE_CLOSE_INDEX: usize = 4;

/// Parse one feed message into a [`LiveTick`].
///
/// Symbols are normalized to uppercase with any quote suffix after `/`
/// stripped (`"btc/usdt"` becomes `"BTC"`). Non-finite prices are rejected.
pub fn parse_feed_message(text: &str) -> Result<LiveTick> {
    let root: serde_json::Value =
        serde_json::from_str(text).context("failed to parse feed JSON")?;

    let raw_symbol = root["s"].as_str().context("missing field s")?;
    let symbol = raw_symbol
        .split('/')
        .next()
        .unwrap_or(raw_symbol)
        .to_uppercase();
    if symbol.is_empty() {
        bail!("empty symbol in feed message");
    }

    let price = if let Some(p) = root.get("p") {
        parse_number(p, "p")?
    } else {
        let tuple = root["k"].as_array().context("missing field p or k")?;
        let close = tuple
            .get(TUPLE_CLOSE_INDEX)
            .with_context(|| format!("field k has {} elements, expected at least 6", tuple.len()))?;
        parse_number(close, "k[4]")?
    };

    if !price.is_finite() {
        bail!("non-finite price in feed message for {symbol}");
    }

    Ok(LiveTick { symbol, price })
}

/// Feeds send numeric values either as JSON numbers or as strings.
fn parse_number(val: &serde_json::Value, name: &str) -> Result<f64> {
    match val {
        serde_json::Value::String(s) => s
            .parse::<f64>()
            .with_context(|| format!("failed to parse {name} as f64: {s}")),
        serde_json::Value::Number(n) => n
            .as_f64()
            .with_context(|| format!("field {name} is not a valid f64")),
        _ => bail!("field {name} has unexpected JSON type"),
    }
}
