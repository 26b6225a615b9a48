// =============================================================================
// Signals Module
// =============================================================================
//
// Turns the latest indicator readings into a composite Buy/Sell rating via a
// table of independent voting rules.

pub mod score;

pub use score::{score_signals, IndicatorSnapshot, Rating, RuleVote, SignalScore, Vote};
