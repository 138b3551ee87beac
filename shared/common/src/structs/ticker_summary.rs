use serde::{Deserialize, Serialize};

/// Exchange-agnostic view of a ticker, as reported by the polling loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TickerSummary {
    pub pair: String,
    pub last: f64,
    pub high: f64,
    pub low: f64,
    pub bid: f64,
    pub ask: f64,
    pub volume: f64,
}
