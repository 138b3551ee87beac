pub mod structs;

use self::structs::{
    select_wallet, CreateWalletDto, DepositAddressDto, FetchWalletOrdersDto, FetchWalletTradesDto,
    FetchWalletsDto, ItBitBalance, ItBitDepositAddress, ItBitOrder, ItBitOrderBook, ItBitTicker,
    ItBitTrades, ItBitWallet, ItBitWalletTrade, ItBitWalletTrades, ItBitWalletTransfer,
    ItBitWithdrawal, PlaceOrderDto, WalletTransferDto, WithdrawalDto,
};
use crate::{
    config::ExchangeConfig,
    fees::{compute_fee, FeeSchedule},
    shared::http::{to_reqwest_method, try_parse_response, try_response_text},
    signing::{
        BodyFormat, CanonicalForm, Digest, HeaderLayout, MacInput, MessageEncoding, MessageField,
        NonceCounter, NonceLedger, NonceStyle, RequestSigner, SignatureEncoding, SignatureScheme,
    },
    structs::{ApiEndpoints, ExchangeContext},
};
use async_trait::async_trait;
use common::{
    constants::CONTENT_TYPE_JSON,
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
use serde::{de::DeserializeOwned, Serialize};
use serde_urlencoded::to_string as to_url_string;
use std::{sync::Arc, time::Duration};

pub const ITBIT_API_PATH: &str = "/v1";

/// `base64(HMAC-SHA512(secret, url ++ sha256(nonce ++ json([method, url, body, nonce, timestamp]))))`
pub const ITBIT_SIGNATURE_SCHEME: SignatureScheme = SignatureScheme {
    canonical: CanonicalForm {
        fields: &[
            MessageField::Method,
            MessageField::Url,
            MessageField::Body,
            MessageField::Nonce,
            MessageField::Timestamp,
        ],
        encoding: MessageEncoding::JsonArray,
    },
    body_format: BodyFormat::Json,
    digest: Digest::Sha256NoncePrefixed,
    mac_input: MacInput::UrlThenDigest,
    encoding: SignatureEncoding::Base64,
    headers: HeaderLayout::Authorization {
        header: "Authorization",
        timestamp_header: "X-Auth-Timestamp",
        nonce_header: "X-Auth-Nonce",
    },
    content_type: CONTENT_TYPE_JSON,
};

pub const ITBIT_NONCE_STYLE: NonceStyle = NonceStyle::TimestampOffset(-1);

#[derive(Clone)]
pub struct ItBit {
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

impl ItBit {
    pub fn new(config: &ExchangeConfig, context: &ExchangeContext) -> Result<Self, GlintError> {
        let mut nonce_ledger = NonceLedger::new(ITBIT_NONCE_STYLE);
        let nonces = nonce_ledger.counter_for(
            config
                .credentials
                .as_ref()
                .map(|credentials| credentials.key.as_str())
                .unwrap_or_default(),
        );
        Ok(Self {
            name: "ITBIT",
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
            signer: RequestSigner::new(ITBIT_SIGNATURE_SCHEME),
            withdraw_permissions: context.withdraw_permissions,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.endpoints.http, ITBIT_API_PATH, path)
    }

    fn get_credentials(&self) -> Result<&Credentials, GlintError> {
        self.credentials.as_ref().ok_or_else(|| {
            GlintError::new_signing_error(format!("{} has no API credentials set", self.name))
        })
    }

    fn get_user_id(&self) -> Result<String, GlintError> {
        Ok(self.get_credentials()?.require_client_id()?.to_string())
    }

    fn with_query<Q: Serialize>(path: String, query: &Q) -> Result<String, GlintError> {
        let query_string = to_url_string(query)?;
        if query_string.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{}?{}", path, query_string))
        }
    }

    fn order_book_path(pair: &CurrencyPair) -> String {
        format!("/markets/{}/order_book", pair)
    }

    fn wallet_orders_path(wallet_id: &str) -> String {
        format!("/wallets/{}/orders", wallet_id)
    }

    pub fn public_request(&self, path: &str) -> RequestBuilder {
        let url = self.api_url(path);
        if self.verbose {
            debug!("{} public request {}", self.name, url);
        }
        self.http.get(url)
    }

    async fn send_public_request<T: DeserializeOwned>(&self, path: &str) -> Result<T, GlintError> {
        let result = self.public_request(path).send().await;
        try_parse_response::<T>(result).await
    }

    /// Signs the call and returns a builder whose body is exactly the signed body.
    pub fn prepare_request_builder<P: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
    ) -> Result<RequestBuilder, GlintError> {
        let credentials = self.get_credentials()?;
        let url = self.api_url(path);
        let signed = self
            .signer
            .sign(method, &url, params, credentials, &self.nonces)?;

        if self.verbose {
            debug!(
                "{} {} {} request json: {}",
                self.name, method, url, signed.request.body
            );
        }

        let request_builder = self
            .http
            .request(to_reqwest_method(method), url)
            .body(signed.request.body.clone());
        Ok(signed.headers.append_to(request_builder))
    }

    async fn send_authenticated_request<P: Serialize, T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
    ) -> Result<T, GlintError> {
        let request_builder = self.prepare_request_builder(method, path, params)?;
        let result = request_builder.send().await;
        try_parse_response::<T>(result).await
    }

    pub async fn fetch_ticker(&self, pair: &CurrencyPair) -> Result<ItBitTicker, GlintError> {
        let path = format!("/markets/{}/ticker", pair);
        self.send_public_request(&path).await
    }

    pub async fn fetch_order_book(&self, pair: &CurrencyPair) -> Result<ItBitOrderBook, GlintError> {
        self.send_public_request(&Self::order_book_path(pair))
            .await
    }

    pub async fn fetch_trade_history(
        &self,
        pair: &CurrencyPair,
        since: &str,
    ) -> Result<ItBitTrades, GlintError> {
        let path = Self::with_query(format!("/markets/{}/trades", pair), &[("since", since)])?;
        self.send_public_request(&path).await
    }

    pub async fn fetch_wallets(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<ItBitWallet>, GlintError> {
        let query = FetchWalletsDto {
            user_id: self.get_user_id()?,
            page,
            per_page,
        };
        let path = Self::with_query(String::from("/wallets"), &query)?;
        self.send_authenticated_request::<(), _>(HttpMethod::Get, &path, None)
            .await
    }

    pub async fn create_wallet(&self, wallet_name: &str) -> Result<ItBitWallet, GlintError> {
        let payload = CreateWalletDto::new(&self.get_user_id()?, wallet_name);
        self.send_authenticated_request(HttpMethod::Post, "/wallets", Some(&payload))
            .await
    }

    pub async fn fetch_wallet(&self, wallet_id: &str) -> Result<ItBitWallet, GlintError> {
        let path = format!("/wallets/{}", wallet_id);
        self.send_authenticated_request::<(), _>(HttpMethod::Get, &path, None)
            .await
    }

    pub async fn fetch_wallet_balance(
        &self,
        wallet_id: &str,
        currency: &str,
    ) -> Result<ItBitBalance, GlintError> {
        let path = format!("/wallets/{}/balances/{}", wallet_id, currency);
        self.send_authenticated_request::<(), _>(HttpMethod::Get, &path, None)
            .await
    }

    pub async fn fetch_wallet_trades(
        &self,
        wallet_id: &str,
        query: &FetchWalletTradesDto,
    ) -> Result<Vec<ItBitWalletTrade>, GlintError> {
        let path = Self::with_query(format!("/wallets/{}/trades", wallet_id), query)?;
        let trades: ItBitWalletTrades = self
            .send_authenticated_request::<(), _>(HttpMethod::Get, &path, None)
            .await?;
        Ok(trades.trading_history)
    }

    pub async fn fetch_wallet_orders(
        &self,
        wallet_id: &str,
        query: &FetchWalletOrdersDto,
    ) -> Result<Vec<ItBitOrder>, GlintError> {
        let path = Self::with_query(Self::wallet_orders_path(wallet_id), query)?;
        self.send_authenticated_request::<(), _>(HttpMethod::Get, &path, None)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn place_wallet_order(
        &self,
        wallet_id: &str,
        side: Side,
        order_type: OrderType,
        currency: &str,
        amount: f64,
        price: f64,
        instrument: &str,
        client_ref: Option<&str>,
    ) -> Result<ItBitOrder, GlintError> {
        let payload = PlaceOrderDto {
            side,
            order_type,
            currency: currency.to_string(),
            amount,
            price,
            instrument: instrument.to_string(),
            client_order_identifier: client_ref
                .filter(|client_ref| !client_ref.is_empty())
                .map(str::to_string),
        };
        self.send_wallet_order(wallet_id, &payload).await
    }

    async fn send_wallet_order(
        &self,
        wallet_id: &str,
        payload: &PlaceOrderDto,
    ) -> Result<ItBitOrder, GlintError> {
        let path = Self::wallet_orders_path(wallet_id);
        let order: ItBitOrder = self
            .send_authenticated_request(HttpMethod::Post, &path, Some(payload))
            .await?;
        info!(
            "{} placed {} {} order {} for {} {} @ {}",
            self.name,
            payload.order_type.as_str(),
            payload.side.as_str(),
            order.id,
            payload.amount,
            payload.instrument,
            payload.price
        );
        Ok(order)
    }

    pub async fn fetch_wallet_order(
        &self,
        wallet_id: &str,
        order_id: &str,
    ) -> Result<ItBitOrder, GlintError> {
        let path = format!("/wallets/{}/orders/{}", wallet_id, order_id);
        self.send_authenticated_request::<(), _>(HttpMethod::Get, &path, None)
            .await
    }

    /// Cancellation is acknowledged with an empty `202 Accepted`.
    pub async fn cancel_wallet_order(&self, wallet_id: &str, order_id: &str) -> Result<(), GlintError> {
        let path = format!("/wallets/{}/orders/{}", wallet_id, order_id);
        let request_builder = self.prepare_request_builder::<()>(HttpMethod::Delete, &path, None)?;
        try_response_text(request_builder.send().await).await?;
        info!("{} cancelled order {}", self.name, order_id);
        Ok(())
    }

    pub async fn place_withdrawal_request(
        &self,
        wallet_id: &str,
        currency: &str,
        address: &str,
        amount: f64,
    ) -> Result<ItBitWithdrawal, GlintError> {
        let path = format!("/wallets/{}/cryptocurrency_withdrawals", wallet_id);
        let payload = WithdrawalDto {
            currency: currency.to_string(),
            amount,
            address: address.to_string(),
        };
        self.send_authenticated_request(HttpMethod::Post, &path, Some(&payload))
            .await
    }

    pub async fn fetch_deposit_address(
        &self,
        wallet_id: &str,
        currency: &str,
    ) -> Result<ItBitDepositAddress, GlintError> {
        let path = format!("/wallets/{}/cryptocurrency_deposits", wallet_id);
        let payload = DepositAddressDto {
            currency: currency.to_string(),
        };
        self.send_authenticated_request(HttpMethod::Post, &path, Some(&payload))
            .await
    }

    pub async fn wallet_transfer(
        &self,
        wallet_id: &str,
        source_wallet: &str,
        destination_wallet: &str,
        amount: f64,
        currency: &str,
    ) -> Result<ItBitWalletTransfer, GlintError> {
        let path = format!("/wallets/{}/wallet_transfers", wallet_id);
        let payload = WalletTransferDto {
            source_wallet_id: source_wallet.to_string(),
            destination_wallet_id: destination_wallet.to_string(),
            amount,
            currency_code: currency.to_string(),
        };
        self.send_authenticated_request(HttpMethod::Post, &path, Some(&payload))
            .await
    }
}

#[async_trait]
impl ExchangeHandler for ItBit {
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
        let ticker = self.fetch_ticker(pair).await?;
        Ok(ticker.into())
    }

    async fn fetch_order_book_summary(
        &self,
        pair: &CurrencyPair,
    ) -> Result<OrderBookSummary, GlintError> {
        let order_book = self.fetch_order_book(pair).await?;
        Ok(order_book.into_summary(&pair.to_string()))
    }

    /// Places the order from the first wallet holding enough of the base currency.
    async fn submit_order(
        &self,
        order: &OrderSubmission,
    ) -> Result<SubmitOrderResponse, GlintError> {
        order.validate()?;
        let currency = &order.pair.first_currency;
        let wallets = self.fetch_wallets(None, None).await?;
        let wallet = select_wallet(&wallets, currency, order.amount).ok_or_else(|| {
            GlintError::new_exchange_error(
                self.name,
                format!(
                    "no wallet found with currency {} with amount >= {}",
                    currency, order.amount
                ),
            )
        })?;

        let placed = self
            .send_wallet_order(&wallet.id, &PlaceOrderDto::from(order))
            .await?;
        Ok(SubmitOrderResponse {
            order_id: placed.id,
            is_order_placed: true,
        })
    }
}
