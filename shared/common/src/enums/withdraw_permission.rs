use serde::{Deserialize, Serialize};

/// Ways an exchange lets funds leave an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawPermission {
    AutoWithdrawCrypto,
    AutoWithdrawCryptoWithApiPermission,
    AutoWithdrawFiat,
    AutoWithdrawFiatWithApiPermission,
    WithdrawCryptoWith2fa,
    WithdrawFiatWith2fa,
    WithdrawCryptoViaWebsiteOnly,
    WithdrawFiatViaWebsiteOnly,
    NoFiatWithdrawals,
}

impl WithdrawPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoWithdrawCrypto => "AUTO WITHDRAW CRYPTO",
            Self::AutoWithdrawCryptoWithApiPermission => "AUTO WITHDRAW CRYPTO WITH API PERMISSION",
            Self::AutoWithdrawFiat => "AUTO WITHDRAW FIAT",
            Self::AutoWithdrawFiatWithApiPermission => "AUTO WITHDRAW FIAT WITH API PERMISSION",
            Self::WithdrawCryptoWith2fa => "WITHDRAW CRYPTO WITH 2FA",
            Self::WithdrawFiatWith2fa => "WITHDRAW FIAT WITH 2FA",
            Self::WithdrawCryptoViaWebsiteOnly => "WITHDRAW CRYPTO VIA WEBSITE ONLY",
            Self::WithdrawFiatViaWebsiteOnly => "WITHDRAW FIAT VIA WEBSITE ONLY",
            Self::NoFiatWithdrawals => "NO FIAT WITHDRAWAL",
        }
    }
}
