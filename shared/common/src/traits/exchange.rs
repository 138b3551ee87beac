use crate::structs::{
    Credentials, CurrencyPair, FeeQuery, OrderBookSummary, OrderSubmission, SubmitOrderResponse,
    TickerSummary,
};
use async_trait::async_trait;
use glint_error::GlintError;
use std::time::Duration;

/// Surface every exchange handler offers to the rest of the workspace.
#[async_trait]
pub trait ExchangeHandler: Send + Sync {
    fn get_name(&self) -> &str;
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn set_credentials(&mut self, credentials: Credentials);
    fn get_polling_delay(&self) -> Duration;

    /// Published maker or taker rate.
    fn get_trading_fee(&self, is_maker: bool) -> f64;

    /// Estimates the cost of the described transaction. Unknown currencies and categories
    /// without a published fee resolve to `0.0`.
    fn get_fee(&self, query: &FeeQuery) -> Result<f64, GlintError>;

    fn get_pairs(&self) -> &[CurrencyPair];

    /// Withdrawal methods the exchange supports, joined with ` & `.
    fn format_withdraw_permissions(&self) -> String;

    async fn fetch_ticker_summary(&self, pair: &CurrencyPair) -> Result<TickerSummary, GlintError>;

    async fn fetch_order_book_summary(
        &self,
        pair: &CurrencyPair,
    ) -> Result<OrderBookSummary, GlintError>;

    /// Places `order`. Invalid orders fail before anything is sent.
    async fn submit_order(&self, order: &OrderSubmission)
        -> Result<SubmitOrderResponse, GlintError>;
}
