pub mod structs;

use self::structs::{
    available_pairs, LiquiAccountInfo, LiquiActiveOrder, LiquiCancelOrder, LiquiDepth, LiquiInfo,
    LiquiOrderInfo, LiquiResponse, LiquiTicker, LiquiTrade, LiquiTradeHistory, LiquiTradeResult,
    LiquiWithdrawCoins,
};
use crate::{
    config::ExchangeConfig,
    fees::{compute_fee, FeeSchedule},
    shared::http::try_parse_response,
    signing::{
        BodyFormat, CanonicalForm, Digest, HeaderLayout, MacInput, MessageEncoding, MessageField,
        NonceCounter, NonceLedger, NonceStyle, RequestSigner, SignatureEncoding, SignatureScheme,
    },
    structs::{ApiEndpoints, ExchangeContext},
};
use async_trait::async_trait;
use common::{
    constants::CONTENT_TYPE_FORM,
    enums::{
        http_method::HttpMethod, order_type::OrderType, side::Side,
        withdraw_permission::WithdrawPermission,
    },
    functions::format_withdraw_permissions,
    structs::{
        Credentials, CurrencyPair, FeeQuery, OrderBookSummary, OrderSubmission,
        SubmitOrderResponse, TickerSummary,
    },
    traits::exchange::ExchangeHandler,
};
use glint_error::GlintError;
use log::{debug, info};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::{collections::HashMap, sync::Arc, time::Duration};

pub const LIQUI_PUBLIC_API_PATH: &str = "/api/3";
pub const LIQUI_TRADE_API_PATH: &str = "/tapi";

/// `hex(HMAC-SHA512(secret, form_body))`, with the nonce as the last form field.
pub const LIQUI_SIGNATURE_SCHEME: SignatureScheme = SignatureScheme {
    canonical: CanonicalForm {
        fields: &[MessageField::Body],
        encoding: MessageEncoding::Joined(""),
    },
    body_format: BodyFormat::FormWithNonce {
        nonce_field: "nonce",
    },
    digest: Digest::None,
    mac_input: MacInput::Message,
    encoding: SignatureEncoding::Hex,
    headers: HeaderLayout::KeyAndSign {
        key_header: "Key",
        sign_header: "Sign",
    },
    content_type: CONTENT_TYPE_FORM,
};

pub const LIQUI_NONCE_STYLE: NonceStyle = NonceStyle::Counter;

pub const LIQUI_METHOD_ACCOUNT_INFO: &str = "getInfo";
pub const LIQUI_METHOD_TRADE: &str = "Trade";
pub const LIQUI_METHOD_ACTIVE_ORDERS: &str = "ActiveOrders";
pub const LIQUI_METHOD_ORDER_INFO: &str = "OrderInfo";
pub const LIQUI_METHOD_CANCEL_ORDER: &str = "CancelOrder";
pub const LIQUI_METHOD_TRADE_HISTORY: &str = "TradeHistory";
pub const LIQUI_METHOD_WITHDRAW_COIN: &str = "WithdrawCoin";

type FormParams = Vec<(&'static str, String)>;

#[derive(Clone)]
pub struct Liqui {
    pub name: &'static str,
    enabled: bool,
    verbose: bool,
    polling_delay: Duration,
    credentials: Option<Credentials>,
    endpoints: ApiEndpoints,
    fee_schedule: FeeSchedule,
    http: Client,
    nonce_ledger: NonceLedger,
    nonces: Arc<NonceCounter>,
    pairs: Vec<CurrencyPair>,
    signer: RequestSigner,
    withdraw_permissions: &'static [WithdrawPermission],
}

impl Liqui {
    pub fn new(config: &ExchangeConfig, context: &ExchangeContext) -> Result<Self, GlintError> {
        let mut nonce_ledger = NonceLedger::new(LIQUI_NONCE_STYLE);
        let nonces = nonce_ledger.counter_for(
            config
                .credentials
                .as_ref()
                .map(|credentials| credentials.key.as_str())
                .unwrap_or_default(),
        );
        Ok(Self {
            name: "Liqui",
            enabled: config.enabled,
            verbose: config.verbose,
            polling_delay: config.polling_delay,
            credentials: config.credentials.clone(),
            endpoints: config.endpoints.clone(),
            fee_schedule: context.fee_schedule.clone(),
            http: Client::builder().build()?,
            nonce_ledger,
            nonces,
            pairs: config.pairs.clone(),
            signer: RequestSigner::new(LIQUI_SIGNATURE_SCHEME),
            withdraw_permissions: context.withdraw_permissions,
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}{}{}", self.endpoints.http, LIQUI_PUBLIC_API_PATH, path)
    }

    fn trade_url(&self) -> String {
        format!("{}{}", self.endpoints.http, LIQUI_TRADE_API_PATH)
    }

    fn depth_path(pair: &CurrencyPair) -> String {
        format!("/depth/{}", pair.to_lowercase())
    }

    /// Form fields of a `Trade` call, in the order they are signed.
    fn trade_params(pair: &CurrencyPair, side: Side, amount: f64, price: f64) -> FormParams {
        vec![
            ("pair", pair.to_lowercase()),
            ("type", side.as_str().to_string()),
            ("amount", amount.to_string()),
            ("rate", price.to_string()),
        ]
    }

    pub fn public_request(&self, path: &str) -> RequestBuilder {
        let url = self.public_url(path);
        if self.verbose {
            debug!("{} public request {}", self.name, url);
        }
        self.http.get(url)
    }

    async fn send_public_request<T: DeserializeOwned>(&self, path: &str) -> Result<T, GlintError> {
        let result = self.public_request(path).send().await;
        try_parse_response::<T>(result).await
    }

    /// Builds the signed `POST /tapi` call for `method`. The form body is `method`, then
    /// `params` in order, then `nonce`.
    pub fn prepare_request_builder(
        &self,
        method: &str,
        params: FormParams,
    ) -> Result<RequestBuilder, GlintError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            GlintError::new_signing_error(format!("{} has no API credentials set", self.name))
        })?;

        let mut form = vec![("method", method.to_string())];
        form.extend(params);

        let url = self.trade_url();
        let signed = self
            .signer
            .sign(HttpMethod::Post, &url, Some(&form), credentials, &self.nonces)?;

        if self.verbose {
            debug!("{} {} request body: {}", self.name, method, signed.request.body);
        }

        let request_builder = self.http.post(url).body(signed.request.body.clone());
        Ok(signed.headers.append_to(request_builder))
    }

    async fn send_authenticated_request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: FormParams,
    ) -> Result<T, GlintError> {
        let request_builder = self.prepare_request_builder(method, params)?;
        let result = request_builder.send().await;
        let response: LiquiResponse<T> = try_parse_response(result).await?;
        response.into_result(self.name)
    }

    pub async fn fetch_info(&self) -> Result<LiquiInfo, GlintError> {
        self.send_public_request("/info").await
    }

    /// Tickers keyed by lower-case pair, e.g. `eth_btc`.
    pub async fn fetch_ticker(
        &self,
        pairs: &[CurrencyPair],
    ) -> Result<HashMap<String, LiquiTicker>, GlintError> {
        let joined = pairs
            .iter()
            .map(|pair| pair.to_lowercase())
            .collect::<Vec<String>>()
            .join("-");
        self.send_public_request(&format!("/ticker/{}", joined))
            .await
    }

    pub async fn fetch_depth(&self, pair: &CurrencyPair) -> Result<LiquiDepth, GlintError> {
        let path = Self::depth_path(pair);
        let pair = pair.to_lowercase();
        let mut depth: HashMap<String, LiquiDepth> = self.send_public_request(&path).await?;
        depth.remove(&pair).ok_or_else(|| {
            GlintError::new_exchange_error(self.name, format!("no depth returned for {}", pair))
        })
    }

    pub async fn fetch_trades(&self, pair: &CurrencyPair) -> Result<Vec<LiquiTrade>, GlintError> {
        let pair = pair.to_lowercase();
        let mut trades: HashMap<String, Vec<LiquiTrade>> = self
            .send_public_request(&format!("/trades/{}", pair))
            .await?;
        Ok(trades.remove(&pair).unwrap_or_default())
    }

    pub async fn fetch_available_pairs(&self, non_hidden: bool) -> Result<Vec<String>, GlintError> {
        let info = self.fetch_info().await?;
        Ok(available_pairs(&info, non_hidden))
    }

    pub async fn fetch_account_info(&self) -> Result<LiquiAccountInfo, GlintError> {
        self.send_authenticated_request(LIQUI_METHOD_ACCOUNT_INFO, vec![])
            .await
    }

    pub async fn trade(
        &self,
        pair: &CurrencyPair,
        side: Side,
        amount: f64,
        price: f64,
    ) -> Result<LiquiTradeResult, GlintError> {
        let params = Self::trade_params(pair, side, amount, price);
        let result: LiquiTradeResult = self
            .send_authenticated_request(LIQUI_METHOD_TRADE, params)
            .await?;
        info!(
            "{} placed {} order {} for {} {} @ {}",
            self.name,
            side.as_str(),
            result.order_id,
            amount,
            pair,
            price
        );
        Ok(result)
    }

    pub async fn fetch_active_orders(
        &self,
        pair: &CurrencyPair,
    ) -> Result<HashMap<String, LiquiActiveOrder>, GlintError> {
        self.send_authenticated_request(
            LIQUI_METHOD_ACTIVE_ORDERS,
            vec![("pair", pair.to_lowercase())],
        )
        .await
    }

    pub async fn fetch_order_info(
        &self,
        order_id: i64,
    ) -> Result<HashMap<String, LiquiOrderInfo>, GlintError> {
        self.send_authenticated_request(
            LIQUI_METHOD_ORDER_INFO,
            vec![("order_id", order_id.to_string())],
        )
        .await
    }

    pub async fn cancel_order(&self, order_id: i64) -> Result<LiquiCancelOrder, GlintError> {
        let cancelled: LiquiCancelOrder = self
            .send_authenticated_request(
                LIQUI_METHOD_CANCEL_ORDER,
                vec![("order_id", order_id.to_string())],
            )
            .await?;
        info!("{} cancelled order {}", self.name, cancelled.order_id);
        Ok(cancelled)
    }

    /// `params` are passed through as-is (`from`, `count`, `since`, ...). An empty `pair`
    /// requests the history of every pair.
    pub async fn fetch_trade_history(
        &self,
        mut params: FormParams,
        pair: &str,
    ) -> Result<HashMap<String, LiquiTradeHistory>, GlintError> {
        if !pair.is_empty() {
            params.push(("pair", pair.to_string()));
        }
        self.send_authenticated_request(LIQUI_METHOD_TRADE_HISTORY, params)
            .await
    }

    pub async fn withdraw_coins(
        &self,
        coin: &str,
        amount: f64,
        address: &str,
    ) -> Result<LiquiWithdrawCoins, GlintError> {
        let params = vec![
            ("coinName", coin.to_string()),
            ("amount", amount.to_string()),
            ("address", address.to_string()),
        ];
        self.send_authenticated_request(LIQUI_METHOD_WITHDRAW_COIN, params)
            .await
    }
}

#[async_trait]
impl ExchangeHandler for Liqui {
    fn get_name(&self) -> &str {
        self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_credentials(&mut self, credentials: Credentials) {
        self.nonces = self.nonce_ledger.counter_for(&credentials.key);
        self.credentials = Some(credentials);
    }

    fn get_polling_delay(&self) -> Duration {
        self.polling_delay
    }

    fn get_trading_fee(&self, is_maker: bool) -> f64 {
        self.fee_schedule.get_trading_fee(is_maker)
    }

    fn get_fee(&self, query: &FeeQuery) -> Result<f64, GlintError> {
        compute_fee(&self.fee_schedule, query)
    }

    fn get_pairs(&self) -> &[CurrencyPair] {
        &self.pairs
    }

    fn format_withdraw_permissions(&self) -> String {
        format_withdraw_permissions(self.withdraw_permissions)
    }

    async fn fetch_ticker_summary(&self, pair: &CurrencyPair) -> Result<TickerSummary, GlintError> {
        let key = pair.to_lowercase();
        let mut tickers = self.fetch_ticker(std::slice::from_ref(pair)).await?;
        let ticker = tickers.remove(&key).ok_or_else(|| {
            GlintError::new_exchange_error(self.name, format!("no ticker returned for {}", key))
        })?;
        Ok(ticker.into_summary(&key))
    }

    async fn fetch_order_book_summary(
        &self,
        pair: &CurrencyPair,
    ) -> Result<OrderBookSummary, GlintError> {
        let depth = self.fetch_depth(pair).await?;
        Ok(depth.into_summary(&pair.to_lowercase()))
    }

    /// Liqui only takes limit orders. A zero order id means the order filled on placement.
    async fn submit_order(
        &self,
        order: &OrderSubmission,
    ) -> Result<SubmitOrderResponse, GlintError> {
        order.validate()?;
        if order.order_type != OrderType::Limit {
            return Err(GlintError::new_exchange_error(
                self.name,
                format!("{} orders are not supported", order.order_type.as_str()),
            ));
        }

        let result = self
            .trade(&order.pair, order.side, order.amount, order.price)
            .await?;
        let order_id = if result.order_id > 0 {
            result.order_id.to_string()
        } else {
            String::new()
        };
        Ok(SubmitOrderResponse {
            order_id,
            is_order_placed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{enums::ExchangeId, r#static::EXCHANGES_CONTEXTS};
    use common::enums::fee_type::FeeType;

    fn liqui(with_credentials: bool) -> Liqui {
        let config = ExchangeConfig::from_lookup(ExchangeId::Liqui, |key| match key {
            "LIQUI_API_KEY" if with_credentials => Some(String::from("liqui-key")),
            "LIQUI_API_SECRET" if with_credentials => Some(String::from("liqui-secret")),
            _ => None,
        })
        .unwrap();
        Liqui::new(&config, &EXCHANGES_CONTEXTS[&ExchangeId::Liqui]).unwrap()
    }

    fn fee_query() -> FeeQuery {
        FeeQuery::new_trade(1.0, 1.0, "LTC", "BTC", false).with_currency_item("USD")
    }

    fn assert_fee(actual: Result<f64, GlintError>, expected: f64) {
        let actual = actual.unwrap();
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected fee {}, received {}",
            expected,
            actual
        );
    }

    fn form_body(request: &reqwest::Request) -> String {
        let bytes = request.body().and_then(|body| body.as_bytes()).unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let _ = env_logger::builder().is_test(true).try_init();
        let liqui = liqui(false);
        assert_eq!(liqui.get_name(), "Liqui");
        assert_eq!(liqui.get_trading_fee(false), 0.0025);
        assert_eq!(liqui.get_trading_fee(true), 0.001);
        assert_eq!(
            liqui.get_pairs(),
            &[
                CurrencyPair::from_delimited("eth_btc", "_").unwrap(),
                CurrencyPair::from_delimited("ltc_btc", "_").unwrap()
            ]
        );
    }

    #[test]
    fn test_get_fee() {
        let liqui = liqui(false);

        assert_fee(liqui.get_fee(&fee_query()), 0.0025);

        let mut query = fee_query();
        query.amount = 1_000.0;
        query.purchase_price = 1_000.0;
        assert_fee(liqui.get_fee(&query), 2_500.0);

        let mut query = fee_query();
        query.is_maker = true;
        assert_fee(liqui.get_fee(&query), 0.001);

        let mut query = fee_query();
        query.purchase_price = -1_000.0;
        assert_fee(liqui.get_fee(&query), 0.0);

        let query = fee_query().with_fee_type(FeeType::CryptocurrencyWithdrawalFee);
        assert_fee(liqui.get_fee(&query), 0.01);

        let mut query = fee_query().with_fee_type(FeeType::CryptocurrencyWithdrawalFee);
        query.first_currency = String::from("hello");
        assert_fee(liqui.get_fee(&query), 0.0);

        for fee_type in [
            FeeType::CryptocurrencyDepositFee,
            FeeType::InternationalBankDepositFee,
            FeeType::InternationalBankWithdrawalFee,
        ] {
            assert_fee(liqui.get_fee(&fee_query().with_fee_type(fee_type)), 0.0);
        }
    }

    #[test]
    fn test_authenticated_request_without_credentials_fails() {
        let liqui = liqui(false);
        let error = liqui
            .prepare_request_builder(LIQUI_METHOD_ACCOUNT_INFO, vec![])
            .unwrap_err();
        assert!(error.is_signing_error());
    }

    #[test]
    fn test_trade_api_request_layout() {
        let liqui = liqui(true);
        let request = liqui
            .prepare_request_builder(
                LIQUI_METHOD_CANCEL_ORDER,
                vec![("order_id", String::from("1337"))],
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://api.liqui.io/tapi");

        let body = form_body(&request);
        let (prefix, nonce) = body.rsplit_once("&nonce=").unwrap();
        assert_eq!(prefix, "method=CancelOrder&order_id=1337");
        assert!(nonce.parse::<i64>().is_ok());

        let headers = request.headers();
        assert_eq!(headers["Key"], "liqui-key");
        assert_eq!(headers["Sign"].len(), 128);
        assert_eq!(headers["Content-Type"], CONTENT_TYPE_FORM);
    }

    #[test]
    fn test_trade_api_nonces_increment_by_one() {
        let liqui = liqui(true);
        let nonces: Vec<i64> = (0..3)
            .map(|_| {
                let request = liqui
                    .prepare_request_builder(LIQUI_METHOD_ACCOUNT_INFO, vec![])
                    .unwrap()
                    .build()
                    .unwrap();
                let body = form_body(&request);
                body.rsplit_once("nonce=").unwrap().1.parse().unwrap()
            })
            .collect();
        assert_eq!(nonces[1], nonces[0] + 1);
        assert_eq!(nonces[2], nonces[1] + 1);
    }

    fn signed_nonce(liqui: &Liqui) -> i64 {
        let request = liqui
            .prepare_request_builder(LIQUI_METHOD_ACCOUNT_INFO, vec![])
            .unwrap()
            .build()
            .unwrap();
        form_body(&request)
            .rsplit_once("nonce=")
            .unwrap()
            .1
            .parse()
            .unwrap()
    }

    #[test]
    fn test_new_key_restarts_nonce_counter() {
        let mut liqui = liqui(true);
        signed_nonce(&liqui);
        assert!(liqui.nonces.last().is_some());

        liqui.set_credentials(Credentials::new("liqui-key", "rotated-secret", None));
        assert!(liqui.nonces.last().is_some());

        liqui.set_credentials(Credentials::new("other-key", "other-secret", None));
        assert_eq!(liqui.nonces.last(), None);
    }

    #[test]
    fn test_returning_key_continues_its_nonces() {
        let mut liqui = liqui(true);
        signed_nonce(&liqui);
        let last_on_first_key = signed_nonce(&liqui);

        liqui.set_credentials(Credentials::new("other-key", "other-secret", None));
        for _ in 0..3 {
            signed_nonce(&liqui);
        }

        liqui.set_credentials(Credentials::new("liqui-key", "liqui-secret", None));
        assert_eq!(liqui.nonces.last(), Some(last_on_first_key));
        assert_eq!(signed_nonce(&liqui), last_on_first_key + 1);
    }

    #[test]
    fn test_format_withdraw_permissions() {
        assert_eq!(liqui(false).format_withdraw_permissions(), "NONE, WITHDRAW");
    }

    #[test]
    fn test_depth_request_url() {
        let liqui = liqui(false);
        let pair = CurrencyPair::from_delimited("ETH_BTC", "_").unwrap();
        let request = liqui
            .public_request(&Liqui::depth_path(&pair))
            .build()
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "https://api.liqui.io/api/3/depth/eth_btc");
    }

    #[test]
    fn test_trade_request_body() {
        let liqui = liqui(true);
        let pair = CurrencyPair::from_delimited("eth_btc", "_").unwrap();
        let request = liqui
            .prepare_request_builder(
                LIQUI_METHOD_TRADE,
                Liqui::trade_params(&pair, Side::Buy, 1.5, 0.07),
            )
            .unwrap()
            .build()
            .unwrap();

        let body = form_body(&request);
        let (prefix, nonce) = body.rsplit_once("&nonce=").unwrap();
        assert_eq!(prefix, "method=Trade&pair=eth_btc&type=buy&amount=1.5&rate=0.07");
        assert!(nonce.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn test_submit_order_rejects_before_sending() {
        let liqui = liqui(true);
        let pair = CurrencyPair::from_delimited("eth_btc", "_").unwrap();

        let market = OrderSubmission::new(pair.clone(), Side::Sell, OrderType::Market, 1.0, 0.07);
        let error = liqui.submit_order(&market).await.unwrap_err();
        assert_eq!(error.title, "Liqui Exchange Error");

        let empty = OrderSubmission::new(pair, Side::Buy, OrderType::Limit, 0.0, 0.07);
        assert!(liqui.submit_order(&empty).await.is_err());

        assert_eq!(liqui.nonces.last(), None);
    }
}
