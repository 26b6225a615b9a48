// =============================================================================
// Composite Signal Scorer
// =============================================================================
//
// Combines the latest indicator readings into buy/sell vote counts, a
// normalized 0-100 composite score, and a discrete rating. Stateless: the
// score is recomputed from scratch on every call, so it is always consistent
// with the series it was derived from.

use serde::{Deserialize, Serialize};

/// Latest available value of each indicator feeding the scorer. Any field may
/// be `None` when the underlying series has not warmed up yet; absent inputs
/// simply keep their rules from voting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    /// Trend EMA (EMA-50 at the standard periods).
    pub ema_trend: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

/// Discrete rating derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl Rating {
    /// Map a composite score in [0, 100] to its rating tier. Boundaries are
    /// inclusive (80/60 on the buy side, 20/40 on the sell side) and the
    /// STRONG tiers are checked first.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::StrongBuy
        } else if score >= 60.0 {
            Self::Buy
        } else if score <= 20.0 {
            Self::StrongSell
        } else if score <= 40.0 {
            Self::Sell
        } else {
            Self::Neutral
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongBuy => write!(f, "STRONG_BUY"),
            Self::Buy => write!(f, "BUY"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Sell => write!(f, "SELL"),
            Self::StrongSell => write!(f, "STRONG_SELL"),
        }
    }
}

/// Direction of a single rule's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Buy,
    Sell,
}

/// A rule that fired, reported alongside the aggregate counts so consumers
/// can show which conditions drove the rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleVote {
    pub rule: &'static str,
    pub vote: Vote,
}

/// Result of scoring one indicator snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalScore {
    pub buy_signals: u32,
    pub sell_signals: u32,
    /// 100 * buy / (buy + sell); 50.0 when nothing voted.
    pub composite_score: f64,
    pub rating: Rating,
    pub votes: Vec<RuleVote>,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

struct Rule {
    name: &'static str,
    eval: fn(&IndicatorSnapshot) -> Option<Vote>,
}

/// Each rule contributes at most one vote; rules whose inputs are absent stay
/// silent. New rules only need a new entry here.
const RULES: &[Rule] = &[
    Rule {
        name: "rsi_oversold",
        eval: |s| match s.rsi {
            Some(rsi) if rsi < 35.0 => Some(Vote::Buy),
            _ => None,
        },
    },
    Rule {
        name: "rsi_overbought",
        eval: |s| match s.rsi {
            Some(rsi) if rsi > 65.0 => Some(Vote::Sell),
            _ => None,
        },
    },
    Rule {
        // Always votes when both lines are present.
        name: "macd_cross",
        eval: |s| match (s.macd_line, s.macd_signal) {
            (Some(macd), Some(signal)) if macd > signal => Some(Vote::Buy),
            (Some(_), Some(_)) => Some(Vote::Sell),
            _ => None,
        },
    },
    Rule {
        // Always votes when both the close and the trend EMA are present.
        name: "ema_trend",
        eval: |s| match (s.close, s.ema_trend) {
            (Some(close), Some(ema)) if close > ema => Some(Vote::Buy),
            (Some(_), Some(_)) => Some(Vote::Sell),
            _ => None,
        },
    },
    Rule {
        name: "bollinger_breakdown",
        eval: |s| match (s.close, s.bollinger_lower) {
            (Some(close), Some(lower)) if close < lower => Some(Vote::Buy),
            _ => None,
        },
    },
    Rule {
        name: "bollinger_breakout",
        eval: |s| match (s.close, s.bollinger_upper) {
            (Some(close), Some(upper)) if close > upper => Some(Vote::Sell),
            _ => None,
        },
    },
];

/// Evaluate every rule against the snapshot and aggregate the votes.
pub fn score_signals(snapshot: &IndicatorSnapshot) -> SignalScore {
    let mut buy_signals = 0u32;
    let mut sell_signals = 0u32;
    let mut votes = Vec::new();

    for rule in RULES {
        if let Some(vote) = (rule.eval)(snapshot) {
            match vote {
                Vote::Buy => buy_signals += 1,
                Vote::Sell => sell_signals += 1,
            }
            votes.push(RuleVote {
                rule: rule.name,
                vote,
            });
        }
    }

    let total = buy_signals + sell_signals;
    let composite_score = if total == 0 {
        50.0
    } else {
        100.0 * buy_signals as f64 / total as f64
    };

    SignalScore {
        buy_signals,
        sell_signals,
        composite_score,
        rating: Rating::from_score(composite_score),
        votes,
    }
}
