use super::PriceLevel;
use serde::{Deserialize, Serialize};

/// Exchange-agnostic order book, best levels first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OrderBookSummary {
    pub pair: String,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl OrderBookSummary {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_levels() {
        let summary = OrderBookSummary {
            pair: String::from("XBTUSD"),
            bids: vec![
                PriceLevel { price: 600.0, amount: 1.0 },
                PriceLevel { price: 599.5, amount: 2.0 },
            ],
            asks: vec![],
        };
        assert_eq!(summary.best_bid().map(|level| level.price), Some(600.0));
        assert_eq!(summary.best_ask(), None);
    }
}
