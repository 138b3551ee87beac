use crate::{enums::ExchangeId, fees::{FeeRate, FeeSchedule}, structs::ExchangeContext};
use common::enums::withdraw_permission::WithdrawPermission;
use phf::{phf_map, Map};
use std::{collections::HashMap, sync::LazyLock};

pub const ITBIT_MAKER_FEE: f64 = -0.001;
pub const ITBIT_TAKER_FEE: f64 = 0.005;
pub const LIQUI_MAKER_FEE: f64 = 0.001;
pub const LIQUI_TAKER_FEE: f64 = 0.0025;

/// Fixed crypto withdrawal fees, charged in the withdrawn coin.
pub static LIQUI_WITHDRAWAL_FEES: Map<&'static str, FeeRate> = phf_map! {
    "BTC" => FeeRate::Fixed(0.001),
    "LTC" => FeeRate::Fixed(0.01),
    "ETH" => FeeRate::Fixed(0.005),
    "DASH" => FeeRate::Fixed(0.002),
    "ZEC" => FeeRate::Fixed(0.001),
    "XMR" => FeeRate::Fixed(0.05),
    "WAVES" => FeeRate::Fixed(0.001),
    "GNT" => FeeRate::Fixed(11.0),
    "USDT" => FeeRate::Fixed(20.0),
};

pub static EXCHANGES_CONTEXTS: LazyLock<HashMap<ExchangeId, ExchangeContext>> =
    LazyLock::new(|| {
        let mut exchanges_contexts = HashMap::new();

        exchanges_contexts.insert(
            ExchangeId::ItBit,
            ExchangeContext {
                fee_schedule: FeeSchedule::new(ITBIT_MAKER_FEE, ITBIT_TAKER_FEE),
                default_pairs: &["XBTUSD"],
                pair_delimiter: "",
                http_base_url: "https://api.itbit.com",
                withdraw_permissions: &[
                    WithdrawPermission::WithdrawCryptoViaWebsiteOnly,
                    WithdrawPermission::WithdrawFiatViaWebsiteOnly,
                ],
            },
        );

        exchanges_contexts.insert(
            ExchangeId::Liqui,
            ExchangeContext {
                fee_schedule: FeeSchedule::new(LIQUI_MAKER_FEE, LIQUI_TAKER_FEE).with_withdrawal_fees(
                    LIQUI_WITHDRAWAL_FEES
                        .entries()
                        .map(|(currency, rate)| (*currency, *rate)),
                ),
                default_pairs: &["eth_btc", "ltc_btc"],
                pair_delimiter: "_",
                http_base_url: "https://api.liqui.io",
                withdraw_permissions: &[],
            },
        );

        exchanges_contexts
    });
