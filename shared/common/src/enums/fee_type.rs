use serde::{Deserialize, Serialize};

/// Category of cost a fee query asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    #[default]
    CryptocurrencyTradeFee,
    CryptocurrencyWithdrawalFee,
    CryptocurrencyDepositFee,
    InternationalBankDepositFee,
    InternationalBankWithdrawalFee,
}
