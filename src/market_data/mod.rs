pub mod aggregator;
pub mod candle;
pub mod feed;

// Re-export the core types for convenient access (e.g. `use crate::market_data::Candle`).
pub use aggregator::{apply_live_price, LiveUpdate, Timeframe};
pub use candle::{closes, Candle, SeriesKey};
pub use feed::{parse_feed_message, LiveTick};
