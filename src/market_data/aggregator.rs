// =============================================================================
// Live-Candle Aggregator
// =============================================================================
//
// Merges a stream of live prices into the in-progress tail candle of an
// existing historical series. The series itself is the only state: the
// "current" candle is always the last element. Historical (non-last) candles
// are never rewritten.
//
// Callers must apply live prices in nondecreasing time order and must load
// history before starting live updates; violations are surfaced as
// `LiveUpdate::Ignored` (plus a warning for out-of-order ticks), never as
// mutated history or a fabricated candle.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::candle::Candle;

/// A fixed candle duration, parsed from interval strings like `1m`, `5m`,
/// `4h`, `1d`, `1w` (numeric prefix times unit seconds; units m/h/d/w).
///
/// Serializes as the raw number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeframe {
    secs: i64,
}

impl Timeframe {
    /// Parse an interval string. Fails on a missing/zero count, a missing
    /// unit, or an unsupported unit suffix.
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        let unit_at = s
            .find(|c: char| !c.is_ascii_digit())
            .with_context(|| format!("timeframe {s:?} has no unit suffix"))?;
        let (count, unit) = s.split_at(unit_at);

        let count: i64 = count
            .parse()
            .with_context(|| format!("timeframe {s:?} has no numeric prefix"))?;
        if count == 0 {
            bail!("timeframe {s:?} has a zero count");
        }

        let unit_secs = match unit {
            "m" => 60,
            "h" => 3_600,
            "d" => 86_400,
            "w" => 604_800,
            other => bail!("unsupported timeframe unit {other:?} (expected m, h, d or w)"),
        };

        Ok(Self {
            secs: count * unit_secs,
        })
    }

    /// Bucket duration in seconds.
    pub fn seconds(self) -> i64 {
        self.secs
    }

    /// The bucket-start timestamp containing `now`:
    /// `floor(now / secs) * secs`.
    pub fn bucket_start(self, now: i64) -> i64 {
        now.div_euclid(self.secs) * self.secs
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (unit_secs, suffix) in [(604_800, 'w'), (86_400, 'd'), (3_600, 'h'), (60, 'm')] {
            if self.secs % unit_secs == 0 {
                return write!(f, "{}{}", self.secs / unit_secs, suffix);
            }
        }
        write!(f, "{}s", self.secs)
    }
}

/// Outcome of applying one live price to a candle series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiveUpdate {
    /// The price landed in the still-open current bucket; the last candle was
    /// updated in place.
    CurrentUpdated,
    /// The price crossed a bucket boundary; a new tail candle was appended.
    BucketOpened,
    /// Nothing changed: the series was empty, or the tick mapped to an
    /// already-closed bucket (out-of-order feed event).
    Ignored,
}

/// Merge one live price into the series' in-progress tail candle.
///
/// - Same bucket as the last candle: update close, stretch high/low, keep
///   open.
/// - Newer bucket: append a candle opening at the previous close (so
///   consecutive candles stay gap-free even though ticks are discrete).
/// - Older bucket: out-of-order tick; warn and leave the series untouched.
/// - Empty series: the caller has not loaded history yet; nothing to update.
pub fn apply_live_price(
    series: &mut Vec<Candle>,
    timeframe: Timeframe,
    price: f64,
    now: i64,
) -> LiveUpdate {
    let bucket = timeframe.bucket_start(now);

    let len = series.len();
    if len == 0 {
        debug!(bucket, price, "live price before any history was loaded, ignoring");
        return LiveUpdate::Ignored;
    }
    let last = series[len - 1];

    if bucket == last.time {
        let current = &mut series[len - 1];
        current.close = price;
        current.high = current.high.max(price);
        current.low = current.low.min(price);
        LiveUpdate::CurrentUpdated
    } else if bucket > last.time {
        let open = last.close;
        series.push(Candle {
            time: bucket,
            open,
            high: open.max(price),
            low: open.min(price),
            close: price,
        });
        LiveUpdate::BucketOpened
    } else {
        warn!(
            bucket,
            current_bucket = last.time,
            price,
            "out-of-order live price, leaving history untouched"
        );
        LiveUpdate::Ignored
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Opt-in log output for debugging test runs (`RUST_LOG=debug cargo test`).
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn candle(time: i64, open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            time,
            open,
            high,
            low,
            close,
        }
    }

    // ---- Timeframe ---------------------------------------------------------

    #[test]
    fn parse_supported_intervals() {
        let cases = [
            ("1m", 60),
            ("3m", 180),
            ("5m", 300),
            ("15m", 900),
            ("30m", 1_800),
            ("1h", 3_600),
            ("4h", 14_400),
            ("1d", 86_400),
            ("1w", 604_800),
        ];
        for (input, secs) in cases {
            let tf = Timeframe::parse(input).unwrap();
            assert_eq!(tf.seconds(), secs, "interval {input}");
            assert_eq!(tf.to_string(), input);
        }
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Timeframe::parse("").is_err());
        assert!(Timeframe::parse("m").is_err());
        assert!(Timeframe::parse("15").is_err());
        assert!(Timeframe::parse("0m").is_err());
        assert!(Timeframe::parse("10x").is_err());
    }

    #[test]
    fn from_str_round_trip() {
        let tf: Timeframe = "4h".parse().unwrap();
        assert_eq!(tf.seconds(), 14_400);
    }

    #[test]
    fn bucket_start_floors_to_boundary() {
        let tf = Timeframe::parse("1m").unwrap();
        assert_eq!(tf.bucket_start(1_059), 1_020);
        assert_eq!(tf.bucket_start(1_080), 1_080);
        assert_eq!(tf.bucket_start(1_139), 1_080);

        let hourly = Timeframe::parse("1h").unwrap();
        assert_eq!(hourly.bucket_start(7_250), 7_200);
    }

    // ---- apply_live_price --------------------------------------------------

    #[test]
    fn empty_series_is_a_no_op() {
        let mut series: Vec<Candle> = Vec::new();
        let tf = Timeframe::parse("1m").unwrap();
        let outcome = apply_live_price(&mut series, tf, 100.0, 1_000);
        assert_eq!(outcome, LiveUpdate::Ignored);
        assert!(series.is_empty());
    }

    #[test]
    fn in_bucket_tick_updates_last_candle() {
        let tf = Timeframe::parse("1m").unwrap();
        let mut series = vec![candle(1_020, 10.0, 12.0, 9.0, 11.0)];

        // now = 1_050 is still inside the [1_020, 1_080) bucket.
        let outcome = apply_live_price(&mut series, tf, 13.0, 1_050);
        assert_eq!(outcome, LiveUpdate::CurrentUpdated);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0], candle(1_020, 10.0, 13.0, 9.0, 13.0));

        // A tick below the current low stretches the low, not the high.
        let outcome = apply_live_price(&mut series, tf, 8.5, 1_055);
        assert_eq!(outcome, LiveUpdate::CurrentUpdated);
        assert_eq!(series[0], candle(1_020, 10.0, 13.0, 8.5, 8.5));
        assert!(series[0].is_coherent());
    }

    #[test]
    fn same_price_twice_is_idempotent() {
        let tf = Timeframe::parse("1m").unwrap();
        let mut once = vec![candle(1_020, 10.0, 12.0, 9.0, 11.0)];
        let mut twice = once.clone();

        apply_live_price(&mut once, tf, 11.7, 1_030);
        apply_live_price(&mut twice, tf, 11.7, 1_030);
        apply_live_price(&mut twice, tf, 11.7, 1_040);

        assert_eq!(once, twice);
    }

    #[test]
    fn boundary_crossing_appends_continuous_candle() {
        // 60s buckets, last candle at 1_000, a tick landing in the next
        // bucket (1_020) at price 15: a new candle opens at the prior close.
        let tf = Timeframe::parse("1m").unwrap();
        let mut series = vec![candle(1_000, 10.0, 12.0, 9.0, 11.0)];

        let outcome = apply_live_price(&mut series, tf, 15.0, 1_070);
        assert_eq!(outcome, LiveUpdate::BucketOpened);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1], candle(1_020, 11.0, 15.0, 11.0, 15.0));
        // History untouched.
        assert_eq!(series[0], candle(1_000, 10.0, 12.0, 9.0, 11.0));
    }

    #[test]
    fn new_bucket_opening_below_previous_close() {
        let tf = Timeframe::parse("1m").unwrap();
        let mut series = vec![candle(1_020, 10.0, 12.0, 9.0, 11.0)];

        apply_live_price(&mut series, tf, 10.2, 1_085);
        let opened = series[1];
        assert_eq!(opened.open, 11.0);
        assert_eq!(opened.high, 11.0); // open is the extreme on a down-tick
        assert_eq!(opened.low, 10.2);
        assert_eq!(opened.close, 10.2);
        assert!(opened.is_coherent());
    }

    #[test]
    fn continuity_holds_across_many_buckets() {
        let tf = Timeframe::parse("1m").unwrap();
        let mut series = vec![candle(0, 100.0, 101.0, 99.0, 100.5)];

        let ticks = [
            (30, 100.8),
            (65, 99.7),   // opens bucket 60
            (90, 100.2),
            (130, 101.5), // opens bucket 120
            (250, 98.9),  // skips a bucket entirely, opens bucket 240
            (260, 99.4),
        ];
        for (now, price) in ticks {
            apply_live_price(&mut series, tf, price, now);
        }

        assert_eq!(series.len(), 4);
        for pair in series.windows(2) {
            assert_eq!(pair[1].open, pair[0].close, "open must equal prior close");
            assert!(pair[1].time > pair[0].time);
            assert!(pair[1].is_coherent());
        }
    }

    #[test]
    fn out_of_order_tick_is_ignored() {
        init_tracing();
        let tf = Timeframe::parse("1m").unwrap();
        let original = vec![
            candle(960, 9.0, 10.5, 8.5, 10.0),
            candle(1_020, 10.0, 12.0, 9.0, 11.0),
        ];
        let mut series = original.clone();

        // now = 970 maps to bucket 960, before the current last bucket.
        let outcome = apply_live_price(&mut series, tf, 50.0, 970);
        assert_eq!(outcome, LiveUpdate::Ignored);
        assert_eq!(series, original);
    }
}
