use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BankTransactionType {
    #[default]
    WireTransfer,
    PerfectMoney,
    Neteller,
    AdvCash,
    Payeer,
    Skrill,
    Simplex,
    Sepa,
    Swift,
    Ach,
}
