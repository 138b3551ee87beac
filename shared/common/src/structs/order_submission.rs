use super::CurrencyPair;
use crate::enums::{order_type::OrderType, side::Side};
use glint_error::{assert_or_error, GlintError};
use serde::{Deserialize, Serialize};

/// Exchange-agnostic order request accepted by `ExchangeHandler::submit_order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub pair: CurrencyPair,
    pub side: Side,
    pub order_type: OrderType,
    pub amount: f64,
    pub price: f64,
    pub client_id: Option<String>,
}

impl OrderSubmission {
    pub fn new(
        pair: CurrencyPair,
        side: Side,
        order_type: OrderType,
        amount: f64,
        price: f64,
    ) -> Self {
        Self {
            pair,
            side,
            order_type,
            amount,
            price,
            client_id: None,
        }
    }

    pub fn with_client_id(mut self, client_id: &str) -> Self {
        self.client_id = Some(client_id.to_string());
        self
    }

    /// Amount must be positive, price non-negative, both finite.
    pub fn validate(&self) -> Result<(), GlintError> {
        assert_or_error!(self.amount.is_finite() && self.amount > 0.0);
        assert_or_error!(self.price.is_finite() && self.price >= 0.0);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SubmitOrderResponse {
    /// Empty when the exchange filled the order without assigning an id.
    pub order_id: String,
    pub is_order_placed: bool,
}
