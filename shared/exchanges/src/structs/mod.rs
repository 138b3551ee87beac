use crate::fees::FeeSchedule;
use common::enums::withdraw_permission::WithdrawPermission;

pub use common::structs::PriceLevel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub http: String,
}

/// Static facts about an exchange that do not come from the environment.
#[derive(Debug, Clone)]
pub struct ExchangeContext {
    pub fee_schedule: FeeSchedule,
    pub default_pairs: &'static [&'static str],
    pub pair_delimiter: &'static str,
    pub http_base_url: &'static str,
    pub withdraw_permissions: &'static [WithdrawPermission],
}
