use crate::{
    config::ExchangeConfig, itbit::ItBit, liqui::Liqui, r#static::EXCHANGES_CONTEXTS,
};
use async_trait::async_trait;
use common::{
    structs::{
        Credentials, CurrencyPair, FeeQuery, OrderBookSummary, OrderSubmission,
        SubmitOrderResponse, TickerSummary,
    },
    traits::exchange::ExchangeHandler,
};
use glint_error::GlintError;
use std::{fmt::Display, time::Duration};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExchangeId {
    #[default]
    ItBit,
    Liqui,
}

impl ExchangeId {
    pub fn all() -> [ExchangeId; 2] {
        [Self::ItBit, Self::Liqui]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ItBit => "ITBIT",
            Self::Liqui => "Liqui",
        }
    }

    /// Prefix of every environment variable configuring this exchange.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::ItBit => "ITBIT",
            Self::Liqui => "LIQUI",
        }
    }
}

impl Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone)]
pub enum ExchangeWrapper {
    ItBit(ItBit),
    Liqui(Liqui),
}

impl ExchangeWrapper {
    pub fn new(selected_exchange: ExchangeId, config: &ExchangeConfig) -> Result<Self, GlintError> {
        let context = EXCHANGES_CONTEXTS.get(&selected_exchange).ok_or_else(|| {
            GlintError::new(
                String::from("Missing Exchange Context"),
                format!("no context registered for {}", selected_exchange),
            )
        })?;
        let wrapper = match selected_exchange {
            ExchangeId::ItBit => Self::ItBit(ItBit::new(config, context)?),
            ExchangeId::Liqui => Self::Liqui(Liqui::new(config, context)?),
        };
        Ok(wrapper)
    }
}

#[async_trait]
impl ExchangeHandler for ExchangeWrapper {
    fn get_name(&self) -> &str {
        match self {
            Self::ItBit(ex) => ex.get_name(),
            Self::Liqui(ex) => ex.get_name(),
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            Self::ItBit(ex) => ex.is_enabled(),
            Self::Liqui(ex) => ex.is_enabled(),
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        match self {
            Self::ItBit(ex) => ex.set_enabled(enabled),
            Self::Liqui(ex) => ex.set_enabled(enabled),
        }
    }

    fn set_credentials(&mut self, credentials: Credentials) {
        match self {
            Self::ItBit(ex) => ex.set_credentials(credentials),
            Self::Liqui(ex) => ex.set_credentials(credentials),
        }
    }

    fn get_polling_delay(&self) -> Duration {
        match self {
            Self::ItBit(ex) => ex.get_polling_delay(),
            Self::Liqui(ex) => ex.get_polling_delay(),
        }
    }

    fn get_trading_fee(&self, is_maker: bool) -> f64 {
        match self {
            Self::ItBit(ex) => ex.get_trading_fee(is_maker),
            Self::Liqui(ex) => ex.get_trading_fee(is_maker),
        }
    }

    fn get_fee(&self, query: &FeeQuery) -> Result<f64, GlintError> {
        match self {
            Self::ItBit(ex) => ex.get_fee(query),
            Self::Liqui(ex) => ex.get_fee(query),
        }
    }

    fn get_pairs(&self) -> &[CurrencyPair] {
        match self {
            Self::ItBit(ex) => ex.get_pairs(),
            Self::Liqui(ex) => ex.get_pairs(),
        }
    }

    fn format_withdraw_permissions(&self) -> String {
        match self {
            Self::ItBit(ex) => ex.format_withdraw_permissions(),
            Self::Liqui(ex) => ex.format_withdraw_permissions(),
        }
    }

    async fn fetch_ticker_summary(&self, pair: &CurrencyPair) -> Result<TickerSummary, GlintError> {
        match self {
            Self::ItBit(ex) => ex.fetch_ticker_summary(pair).await,
            Self::Liqui(ex) => ex.fetch_ticker_summary(pair).await,
        }
    }

    async fn fetch_order_book_summary(
        &self,
        pair: &CurrencyPair,
    ) -> Result<OrderBookSummary, GlintError> {
        match self {
            Self::ItBit(ex) => ex.fetch_order_book_summary(pair).await,
            Self::Liqui(ex) => ex.fetch_order_book_summary(pair).await,
        }
    }

    async fn submit_order(
        &self,
        order: &OrderSubmission,
    ) -> Result<SubmitOrderResponse, GlintError> {
        match self {
            Self::ItBit(ex) => ex.submit_order(order).await,
            Self::Liqui(ex) => ex.submit_order(order).await,
        }
    }
}
