use common::{enums::fee_type::FeeType, functions::normalize_currency, structs::FeeQuery};
use glint_error::{assert_or_error, GlintError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FeeRate {
    /// Flat amount charged in the transferred currency.
    Fixed(f64),
    /// Fraction of the transferred amount.
    Percentage(f64),
}

impl FeeRate {
    pub fn apply(&self, amount: f64) -> f64 {
        match self {
            Self::Fixed(fee) => *fee,
            Self::Percentage(rate) => rate * amount,
        }
    }
}

/// Published costs of one exchange. Read-only once loaded. Table keys are upper-case
/// currency codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FeeSchedule {
    pub maker: f64,
    pub taker: f64,
    #[serde(default)]
    pub withdrawal: HashMap<String, FeeRate>,
    #[serde(default)]
    pub deposit: HashMap<String, FeeRate>,
    #[serde(default)]
    pub bank_deposit: HashMap<String, FeeRate>,
    #[serde(default)]
    pub bank_withdrawal: HashMap<String, FeeRate>,
}

fn into_table<'a, I>(entries: I) -> HashMap<String, FeeRate>
where
    I: IntoIterator<Item = (&'a str, FeeRate)>,
{
    entries
        .into_iter()
        .map(|(currency, rate)| (normalize_currency(currency), rate))
        .collect()
}

impl FeeSchedule {
    pub fn new(maker: f64, taker: f64) -> Self {
        Self {
            maker,
            taker,
            ..Default::default()
        }
    }

    pub fn with_withdrawal_fees<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, FeeRate)>,
    {
        self.withdrawal = into_table(entries);
        self
    }

    pub fn with_deposit_fees<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, FeeRate)>,
    {
        self.deposit = into_table(entries);
        self
    }

    pub fn with_bank_deposit_fees<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, FeeRate)>,
    {
        self.bank_deposit = into_table(entries);
        self
    }

    pub fn with_bank_withdrawal_fees<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, FeeRate)>,
    {
        self.bank_withdrawal = into_table(entries);
        self
    }

    pub fn get_trading_fee(&self, is_maker: bool) -> f64 {
        if is_maker {
            self.maker
        } else {
            self.taker
        }
    }

    fn lookup(table: &HashMap<String, FeeRate>, currency: &str) -> Option<FeeRate> {
        table.get(&normalize_currency(currency)).copied()
    }
}

/// Estimates the cost of the transaction described by `query`.
///
/// Trade fees are `rate * price * amount`, using the maker rate when `is_maker` is set. Any
/// other category is looked up in the matching table and resolves to `0.0` when the
/// currency has no entry. The result is never negative, and inputs whose product overflows
/// are rejected.
pub fn compute_fee(schedule: &FeeSchedule, query: &FeeQuery) -> Result<f64, GlintError> {
    assert_or_error!(query.amount.is_finite() && query.purchase_price.is_finite());

    let fee = match query.fee_type {
        FeeType::CryptocurrencyTradeFee => {
            let notional = query.amount * query.purchase_price;
            assert_or_error!(notional.is_finite());
            if notional <= 0.0 {
                0.0
            } else {
                schedule.get_trading_fee(query.is_maker) * query.purchase_price * query.amount
            }
        }
        FeeType::CryptocurrencyWithdrawalFee => {
            FeeSchedule::lookup(&schedule.withdrawal, &query.first_currency)
                .map(|rate| rate.apply(query.amount))
                .unwrap_or(0.0)
        }
        FeeType::CryptocurrencyDepositFee => {
            FeeSchedule::lookup(&schedule.deposit, &query.first_currency)
                .map(|rate| rate.apply(query.amount))
                .unwrap_or(0.0)
        }
        FeeType::InternationalBankDepositFee => {
            FeeSchedule::lookup(&schedule.bank_deposit, &query.currency_item)
                .map(|rate| rate.apply(query.amount))
                .unwrap_or(0.0)
        }
        FeeType::InternationalBankWithdrawalFee => {
            FeeSchedule::lookup(&schedule.bank_withdrawal, &query.currency_item)
                .map(|rate| rate.apply(query.amount))
                .unwrap_or(0.0)
        }
    };

    assert_or_error!(fee.is_finite());
    Ok(fee.max(0.0))
}
