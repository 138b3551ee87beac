pub const API_KEY_ENV_SUFFIX: &str = "API_KEY";
pub const API_SECRET_ENV_SUFFIX: &str = "API_SECRET";
pub const CLIENT_ID_ENV_SUFFIX: &str = "CLIENT_ID";
pub const ENABLED_ENV_SUFFIX: &str = "ENABLED";
pub const VERBOSE_ENV_SUFFIX: &str = "VERBOSE";
pub const POLLING_DELAY_ENV_SUFFIX: &str = "POLLING_DELAY_SECS";
pub const HTTP_BASE_URL_ENV_SUFFIX: &str = "HTTP_BASE_URL";
pub const PAIRS_ENV_SUFFIX: &str = "PAIRS";

pub const DEFAULT_POLLING_DELAY_IN_SECS: u64 = 10;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

pub const NO_API_WITHDRAWAL_METHODS_TEXT: &str = "NONE, WITHDRAW";
pub const WITHDRAW_PERMISSIONS_SEPARATOR: &str = " & ";
