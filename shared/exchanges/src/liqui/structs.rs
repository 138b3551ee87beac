use crate::{
    shared::deserializers::{deserialize_boolean, parse_price_levels},
    structs::PriceLevel,
};
use common::{
    enums::side::Side,
    structs::{OrderBookSummary, TickerSummary},
};
use glint_error::GlintError;
use serde::Deserialize;
use std::collections::HashMap;

/// Envelope of every `/tapi` reply.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LiquiResponse<T> {
    pub success: i32,
    #[serde(rename = "return")]
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> LiquiResponse<T> {
    pub fn into_result(self, exchange: &str) -> Result<T, GlintError> {
        if self.success == 0 {
            return Err(GlintError::new_exchange_error(
                exchange,
                self.error.unwrap_or_else(|| String::from("request was not successful")),
            ));
        }
        self.data.ok_or_else(|| {
            GlintError::new_exchange_error(exchange, String::from("response has no return value"))
        })
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LiquiPairData {
    pub decimal_places: u32,
    pub min_price: f64,
    pub max_price: f64,
    pub min_amount: f64,
    #[serde(deserialize_with = "deserialize_boolean")]
    pub hidden: bool,
    pub fee: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LiquiInfo {
    pub server_time: i64,
    pub pairs: HashMap<String, LiquiPairData>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LiquiTicker {
    pub high: f64,
    pub low: f64,
    pub avg: f64,
    pub vol: f64,
    pub vol_cur: f64,
    pub last: f64,
    pub buy: f64,
    pub sell: f64,
    pub updated: i64,
}

impl LiquiTicker {
    pub fn into_summary(self, pair: &str) -> TickerSummary {
        TickerSummary {
            pair: pair.to_string(),
            last: self.last,
            high: self.high,
            low: self.low,
            bid: self.buy,
            ask: self.sell,
            volume: self.vol_cur,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LiquiDepth {
    #[serde(deserialize_with = "parse_price_levels")]
    pub asks: Vec<PriceLevel>,
    #[serde(deserialize_with = "parse_price_levels")]
    pub bids: Vec<PriceLevel>,
}

impl LiquiDepth {
    pub fn into_summary(self, pair: &str) -> OrderBookSummary {
        OrderBookSummary {
            pair: pair.to_string(),
            bids: self.bids,
            asks: self.asks,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LiquiTrade {
    #[serde(rename = "type")]
    pub trade_type: String,
    pub price: f64,
    pub amount: f64,
    pub tid: i64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LiquiRights {
    #[serde(deserialize_with = "deserialize_boolean")]
    pub info: bool,
    #[serde(deserialize_with = "deserialize_boolean")]
    pub trade: bool,
    #[serde(deserialize_with = "deserialize_boolean")]
    pub withdraw: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LiquiAccountInfo {
    pub funds: HashMap<String, f64>,
    pub rights: LiquiRights,
    #[serde(default)]
    pub transaction_count: i64,
    #[serde(default)]
    pub open_orders: i64,
    pub server_time: i64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LiquiTradeResult {
    pub received: f64,
    pub remains: f64,
    pub order_id: i64,
    pub funds: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LiquiActiveOrder {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub amount: f64,
    pub rate: f64,
    pub timestamp_created: f64,
    pub status: i32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LiquiOrderInfo {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub start_amount: f64,
    pub amount: f64,
    pub rate: f64,
    pub timestamp_created: f64,
    pub status: i32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LiquiCancelOrder {
    pub order_id: i64,
    pub funds: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LiquiTradeHistory {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub amount: f64,
    pub rate: f64,
    pub order_id: f64,
    #[serde(deserialize_with = "deserialize_boolean")]
    pub is_your_order: bool,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LiquiWithdrawCoins {
    #[serde(rename = "tID")]
    pub transaction_id: i64,
    #[serde(rename = "amountSent")]
    pub amount_sent: f64,
    pub funds: HashMap<String, f64>,
}

/// Pairs listed in `info`, sorted. With `non_hidden` set, pairs flagged hidden are left out.
pub fn available_pairs(info: &LiquiInfo, non_hidden: bool) -> Vec<String> {
    let mut pairs: Vec<String> = info
        .pairs
        .iter()
        .filter(|(_, data)| !(non_hidden && data.hidden))
        .map(|(pair, _)| pair.clone())
        .collect();
    pairs.sort();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::from_str;

    const INFO: &str = r#"{
        "server_time": 1500000000,
        "pairs": {
            "ltc_btc": {"decimal_places":8,"min_price":0.0001,"max_price":10,"min_amount":0.01,"hidden":0,"fee":0.25},
            "eth_btc": {"decimal_places":8,"min_price":0.0001,"max_price":10,"min_amount":0.01,"hidden":0,"fee":0.25},
            "old_btc": {"decimal_places":8,"min_price":0.0001,"max_price":10,"min_amount":0.01,"hidden":1,"fee":0.25}
        }
    }"#;

    #[test]
    fn test_available_pairs() {
        let info: LiquiInfo = from_str(INFO).unwrap();
        assert_eq!(
            available_pairs(&info, false),
            vec!["eth_btc", "ltc_btc", "old_btc"]
        );
        assert_eq!(available_pairs(&info, true), vec!["eth_btc", "ltc_btc"]);
        assert!(available_pairs(&LiquiInfo::default(), false).is_empty());
    }

    #[test]
    fn test_success_envelope_unwraps() {
        let response: LiquiResponse<LiquiCancelOrder> =
            from_str(r#"{"success":1,"return":{"order_id":1337,"funds":{"btc":1.5}}}"#).unwrap();
        let cancelled = response.into_result("Liqui").unwrap();
        assert_eq!(cancelled.order_id, 1337);
        assert_eq!(cancelled.funds["btc"], 1.5);
    }

    #[test]
    fn test_failure_envelope_is_exchange_error() {
        let response: LiquiResponse<LiquiCancelOrder> =
            from_str(r#"{"success":0,"error":"invalid api key"}"#).unwrap();
        let error = response.into_result("Liqui").unwrap_err();
        assert_eq!(error.title, "Liqui Exchange Error");
        assert_eq!(error.description, "invalid api key");
    }

    #[test]
    fn test_ticker_summary() {
        let tickers: HashMap<String, LiquiTicker> = from_str(
            r#"{"eth_btc":{"high":0.08,"low":0.07,"avg":0.075,"vol":120.5,"vol_cur":1600.2,
            "last":0.0751,"buy":0.075,"sell":0.0752,"updated":1500000000}}"#,
        )
        .unwrap();
        let summary = tickers["eth_btc"].clone().into_summary("eth_btc");
        assert_eq!(summary.bid, 0.075);
        assert_eq!(summary.ask, 0.0752);
        assert_eq!(summary.volume, 1600.2);
    }

    #[test]
    fn test_depth_levels() {
        let depth: LiquiDepth =
            from_str(r#"{"asks":[[0.0752,2.5]],"bids":[[0.075,1.0],[0.0749,3.25]]}"#).unwrap();
        assert_eq!(depth.asks[0].amount, 2.5);
        assert_eq!(depth.bids[1].price, 0.0749);

        let summary = depth.into_summary("eth_btc");
        assert_eq!(summary.best_ask().map(|level| level.price), Some(0.0752));
        assert_eq!(summary.bids.len(), 2);
    }
}
