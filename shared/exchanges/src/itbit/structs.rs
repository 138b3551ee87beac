use crate::{
    shared::{
        deserializers::{parse_f64, parse_f64_option, parse_price_levels},
        serializers::{amount_as_string, price_as_string},
    },
    structs::PriceLevel,
};
use common::{
    enums::{order_type::OrderType, side::Side},
    structs::{OrderBookSummary, OrderSubmission, TickerSummary},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItBitTicker {
    pub pair: String,
    #[serde(deserialize_with = "parse_f64")]
    pub bid: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub bid_amt: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub ask: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub ask_amt: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub last_price: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub last_amt: f64,
    #[serde(rename = "volume24h", deserialize_with = "parse_f64")]
    pub volume_24h: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub volume_today: f64,
    #[serde(rename = "high24h", deserialize_with = "parse_f64")]
    pub high_24h: f64,
    #[serde(rename = "low24h", deserialize_with = "parse_f64")]
    pub low_24h: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub high_today: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub low_today: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub open_today: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub vwap_today: f64,
    #[serde(rename = "vwap24h", deserialize_with = "parse_f64")]
    pub vwap_24h: f64,
    #[serde(rename = "serverTimeUTC", default)]
    pub server_time_utc: String,
}

impl From<ItBitTicker> for TickerSummary {
    fn from(ticker: ItBitTicker) -> Self {
        TickerSummary {
            pair: ticker.pair,
            last: ticker.last_price,
            high: ticker.high_24h,
            low: ticker.low_24h,
            bid: ticker.bid,
            ask: ticker.ask,
            volume: ticker.volume_24h,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ItBitOrderBook {
    #[serde(deserialize_with = "parse_price_levels")]
    pub bids: Vec<PriceLevel>,
    #[serde(deserialize_with = "parse_price_levels")]
    pub asks: Vec<PriceLevel>,
}

impl ItBitOrderBook {
    pub fn into_summary(self, pair: &str) -> OrderBookSummary {
        OrderBookSummary {
            pair: pair.to_string(),
            bids: self.bids,
            asks: self.asks,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitRecentTrade {
    pub timestamp: String,
    pub match_number: String,
    #[serde(deserialize_with = "parse_f64")]
    pub price: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitTrades {
    pub count: u64,
    pub recent_trades: Vec<ItBitRecentTrade>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitBalance {
    pub currency: String,
    #[serde(deserialize_with = "parse_f64")]
    pub available_balance: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub total_balance: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitWallet {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub balances: Vec<ItBitBalance>,
}

impl ItBitWallet {
    pub fn available(&self, currency: &str) -> f64 {
        self.balances
            .iter()
            .filter(|balance| balance.currency == currency)
            .map(|balance| balance.available_balance)
            .sum()
    }
}

/// First wallet holding at least `amount` of `currency` available.
pub fn select_wallet<'a>(
    wallets: &'a [ItBitWallet],
    currency: &str,
    amount: f64,
) -> Option<&'a ItBitWallet> {
    wallets
        .iter()
        .find(|wallet| wallet.available(currency) >= amount)
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitOrder {
    pub id: String,
    pub wallet_id: String,
    pub side: Side,
    pub instrument: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub currency: String,
    #[serde(deserialize_with = "parse_f64")]
    pub amount: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub amount_filled: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub volume_weighted_average_price: Option<f64>,
    pub created_time: String,
    pub status: String,
    pub client_order_identifier: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitWalletTrade {
    pub order_id: String,
    pub timestamp: String,
    pub instrument: String,
    pub direction: Side,
    pub currency1: String,
    #[serde(deserialize_with = "parse_f64")]
    pub currency1_amount: f64,
    pub currency2: String,
    #[serde(deserialize_with = "parse_f64")]
    pub currency2_amount: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub rate: f64,
    #[serde(deserialize_with = "parse_f64")]
    pub commission_paid: f64,
    pub commission_currency: String,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub rebates_applied: Option<f64>,
    pub rebate_currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitWalletTrades {
    pub total_number_of_records: u64,
    pub current_page_number: u64,
    pub records_per_page: u64,
    pub latest_execution_id: Option<String>,
    pub trading_history: Vec<ItBitWalletTrade>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitWithdrawal {
    pub withdrawal_id: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitDepositAddress {
    pub id: u64,
    #[serde(rename = "walletID")]
    pub wallet_id: String,
    pub deposit_address: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItBitWalletTransfer {
    pub source_wallet_id: String,
    pub destination_wallet_id: String,
    #[serde(deserialize_with = "parse_f64")]
    pub amount: f64,
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchWalletsDto {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FetchWalletOrdersDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FetchWalletTradesDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletDto {
    pub user_id: String,
    pub name: String,
}

impl CreateWalletDto {
    pub fn new(user_id: &str, name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderDto {
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub currency: String,
    #[serde(serialize_with = "amount_as_string")]
    pub amount: f64,
    #[serde(serialize_with = "price_as_string")]
    pub price: f64,
    pub instrument: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_identifier: Option<String>,
}

impl From<&OrderSubmission> for PlaceOrderDto {
    fn from(order: &OrderSubmission) -> Self {
        Self {
            side: order.side,
            order_type: order.order_type,
            currency: order.pair.first_currency.clone(),
            amount: order.amount,
            price: order.price,
            instrument: order.pair.to_string(),
            client_order_identifier: order
                .client_id
                .clone()
                .filter(|client_id| !client_id.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalDto {
    pub currency: String,
    #[serde(serialize_with = "amount_as_string")]
    pub amount: f64,
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositAddressDto {
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransferDto {
    pub source_wallet_id: String,
    pub destination_wallet_id: String,
    #[serde(serialize_with = "amount_as_string")]
    pub amount: f64,
    pub currency_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, to_string};

    #[test]
    fn test_ticker_deserializes_string_numbers() {
        let json = r#"{
            "pair":"XBTUSD","bid":"622","bidAmt":"0.0006","ask":"641.29","askAmt":"0.5",
            "lastPrice":"618.00000000","lastAmt":"0.00040000","volume24h":"0.00040000",
            "volumeToday":"0.00040000","high24h":"618.00000000","low24h":"618.00000000",
            "highToday":"618.00000000","lowToday":"618.00000000","openToday":"618.00000000",
            "vwapToday":"618.00000000","vwap24h":"618.00000000",
            "serverTimeUTC":"2014-06-24T20:42:35.6160000Z"
        }"#;
        let ticker: ItBitTicker = from_str(json).unwrap();
        assert_eq!(ticker.bid, 622.0);
        assert_eq!(ticker.ask, 641.29);
        assert_eq!(ticker.volume_24h, 0.0004);

        let summary: TickerSummary = ticker.into();
        assert_eq!(summary.pair, "XBTUSD");
        assert_eq!(summary.last, 618.0);
    }

    #[test]
    fn test_place_order_body_layout() {
        let payload = PlaceOrderDto {
            side: Side::Buy,
            order_type: OrderType::Limit,
            currency: String::from("XBT"),
            amount: 1.5,
            price: 350.123,
            instrument: String::from("XBTUSD"),
            client_order_identifier: None,
        };
        assert_eq!(
            to_string(&payload).unwrap(),
            r#"{"side":"buy","type":"limit","currency":"XBT","amount":"1.50000000","price":"350.12","instrument":"XBTUSD"}"#
        );
    }

    #[test]
    fn test_order_deserializes() {
        let json = r#"{
            "id":"13d6af57-8b0b-41e5-af30-becf0bcc574d","walletId":"7e037345-1288-4c39-12fe-d0f99a475a98",
            "side":"buy","instrument":"XBTUSD","type":"limit","currency":"XBT","amount":"2.50000000",
            "displayAmount":"2.50000000","price":"650.00000000","volumeWeightedAveragePrice":"0.00000000",
            "amountFilled":"0.00000000","createdTime":"2014-02-11T17:05:15Z","status":"submitted",
            "clientOrderIdentifier":null
        }"#;
        let order: ItBitOrder = from_str(json).unwrap();
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.amount, 2.5);
        assert_eq!(order.amount_filled, Some(0.0));
        assert_eq!(order.client_order_identifier, None);
    }

    #[test]
    fn test_order_book_deserializes() {
        let book: ItBitOrderBook =
            from_str(r#"{"bids":[["621.99","0.1"]],"asks":[["622.5","2"],["623","1.5"]]}"#)
                .unwrap();
        assert_eq!(book.bids.len(), 1);
        assert_eq!(book.asks[1].price, 623.0);
    }

    #[test]
    fn test_order_book_summary_keeps_levels() {
        let book: ItBitOrderBook =
            from_str(r#"{"bids":[["621.99","0.1"]],"asks":[["622.5","2"]]}"#).unwrap();
        let summary = book.into_summary("XBTUSD");
        assert_eq!(summary.pair, "XBTUSD");
        assert_eq!(summary.best_bid(), Some(&PriceLevel { price: 621.99, amount: 0.1 }));
        assert_eq!(summary.best_ask(), Some(&PriceLevel { price: 622.5, amount: 2.0 }));
    }

    #[test]
    fn test_select_wallet_by_available_balance() {
        let wallets: Vec<ItBitWallet> = from_str(
            r#"[
                {"id":"w-1","userId":"u-1","name":"empty","balances":[
                    {"currency":"XBT","availableBalance":"0.5","totalBalance":"2.0"}]},
                {"id":"w-2","userId":"u-1","name":"fiat","balances":[
                    {"currency":"USD","availableBalance":"900","totalBalance":"900"}]},
                {"id":"w-3","userId":"u-1","name":"main","balances":[
                    {"currency":"XBT","availableBalance":"1.5","totalBalance":"1.5"}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(select_wallet(&wallets, "XBT", 1.0).map(|w| w.id.as_str()), Some("w-3"));
        assert_eq!(select_wallet(&wallets, "XBT", 0.25).map(|w| w.id.as_str()), Some("w-1"));
        assert_eq!(select_wallet(&wallets, "XBT", 2.0), None);
        assert_eq!(select_wallet(&wallets, "EUR", 0.1), None);
    }

    #[test]
    fn test_place_order_from_submission() {
        let order = OrderSubmission::new(
            common::structs::CurrencyPair::new("XBT", "USD"),
            Side::Sell,
            OrderType::Market,
            0.25,
            610.0,
        )
        .with_client_id("");
        let payload = PlaceOrderDto::from(&order);
        assert_eq!(payload.currency, "XBT");
        assert_eq!(payload.instrument, "XBTUSD");
        assert_eq!(payload.client_order_identifier, None);
        assert_eq!(
            to_string(&payload).unwrap(),
            r#"{"side":"sell","type":"market","currency":"XBT","amount":"0.25000000","price":"610.00","instrument":"XBTUSD"}"#
        );
    }
}
