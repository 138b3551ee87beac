use crate::enums::{bank_transaction_type::BankTransactionType, fee_type::FeeType};
use serde::{Deserialize, Serialize};

/// Describes a prospective transaction whose cost should be estimated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeQuery {
    pub fee_type: FeeType,
    pub amount: f64,
    pub purchase_price: f64,
    pub first_currency: String,
    pub second_currency: String,
    pub is_maker: bool,
    /// Fiat currency moved by bank transfers.
    pub currency_item: String,
    pub bank_transaction_type: BankTransactionType,
}

impl FeeQuery {
    pub fn new_trade(
        amount: f64,
        purchase_price: f64,
        first_currency: &str,
        second_currency: &str,
        is_maker: bool,
    ) -> Self {
        Self {
            fee_type: FeeType::CryptocurrencyTradeFee,
            amount,
            purchase_price,
            first_currency: first_currency.to_string(),
            second_currency: second_currency.to_string(),
            is_maker,
            currency_item: String::new(),
            bank_transaction_type: BankTransactionType::default(),
        }
    }

    pub fn with_fee_type(mut self, fee_type: FeeType) -> Self {
        self.fee_type = fee_type;
        self
    }

    pub fn with_currency_item(mut self, currency_item: &str) -> Self {
        self.currency_item = currency_item.to_string();
        self
    }
}
