use crate::{enums::ExchangeId, r#static::EXCHANGES_CONTEXTS, structs::ApiEndpoints};
use common::{
    constants::{
        API_KEY_ENV_SUFFIX, API_SECRET_ENV_SUFFIX, CLIENT_ID_ENV_SUFFIX,
        DEFAULT_POLLING_DELAY_IN_SECS, ENABLED_ENV_SUFFIX, HTTP_BASE_URL_ENV_SUFFIX,
        PAIRS_ENV_SUFFIX, POLLING_DELAY_ENV_SUFFIX, VERBOSE_ENV_SUFFIX,
    },
    structs::{Credentials, CurrencyPair},
};
use dotenv::dotenv;
use glint_error::GlintError;
use log::warn;
use std::{collections::HashMap, env::var, time::Duration};

/// Length of the base currency code in undelimited pairs such as `XBTUSD`.
const UNDELIMITED_BASE_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeConfig {
    pub enabled: bool,
    pub verbose: bool,
    pub polling_delay: Duration,
    pub credentials: Option<Credentials>,
    pub endpoints: ApiEndpoints,
    pub pairs: Vec<CurrencyPair>,
}

/// Parses `raw` with the exchange's delimiter, or splits after the base code when the
/// exchange writes pairs without one.
pub fn parse_pair(raw: &str, delimiter: &str) -> Result<CurrencyPair, GlintError> {
    let raw = raw.trim();
    if !delimiter.is_empty() {
        return CurrencyPair::from_delimited(raw, delimiter);
    }

    match (
        raw.get(..UNDELIMITED_BASE_LENGTH),
        raw.get(UNDELIMITED_BASE_LENGTH..),
    ) {
        (Some(first), Some(second)) if !second.is_empty() => Ok(CurrencyPair::new(first, second)),
        _ => Err(GlintError::new(
            String::from("Invalid Currency Pair"),
            format!("{} is too short to split into base and quote", raw),
        )),
    }
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> Result<bool, GlintError> {
    match value {
        None => Ok(default),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(GlintError::new(
                String::from("Invalid Config"),
                format!("{} must be a boolean, got {:?}", name, other),
            )),
        },
    }
}

impl ExchangeConfig {
    /// Resolves the config of `exchange_id` from `lookup`, which maps full variable names
    /// (`LIQUI_API_KEY`) to values.
    pub fn from_lookup<F>(exchange_id: ExchangeId, lookup: F) -> Result<Self, GlintError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let context = EXCHANGES_CONTEXTS.get(&exchange_id).ok_or_else(|| {
            GlintError::new(
                String::from("Missing Exchange Context"),
                format!("no context registered for {}", exchange_id),
            )
        })?;
        let prefix = exchange_id.env_prefix();
        let env_name = |suffix: &str| format!("{}_{}", prefix, suffix);
        let get = |suffix: &str| {
            lookup(&env_name(suffix))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let enabled = parse_flag(
            &env_name(ENABLED_ENV_SUFFIX),
            get(ENABLED_ENV_SUFFIX),
            true,
        )?;
        let verbose = parse_flag(
            &env_name(VERBOSE_ENV_SUFFIX),
            get(VERBOSE_ENV_SUFFIX),
            false,
        )?;

        let polling_delay_in_secs = match get(POLLING_DELAY_ENV_SUFFIX) {
            Some(value) => value.parse::<u64>()?,
            None => DEFAULT_POLLING_DELAY_IN_SECS,
        };

        let credentials = match (get(API_KEY_ENV_SUFFIX), get(API_SECRET_ENV_SUFFIX)) {
            (Some(key), Some(secret)) => Some(Credentials::new(
                &key,
                &secret,
                get(CLIENT_ID_ENV_SUFFIX).as_deref(),
            )),
            (None, None) => None,
            _ => {
                warn!(
                    "{} has only one of API key / secret set, authenticated calls are disabled",
                    exchange_id
                );
                None
            }
        };

        let http = get(HTTP_BASE_URL_ENV_SUFFIX)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| context.http_base_url.to_string());

        let pairs = match get(PAIRS_ENV_SUFFIX) {
            Some(value) => value
                .split(',')
                .filter(|pair| !pair.trim().is_empty())
                .map(|pair| parse_pair(pair, context.pair_delimiter))
                .collect::<Result<Vec<CurrencyPair>, GlintError>>()?,
            None => context
                .default_pairs
                .iter()
                .map(|pair| parse_pair(pair, context.pair_delimiter))
                .collect::<Result<Vec<CurrencyPair>, GlintError>>()?,
        };

        Ok(Self {
            enabled,
            verbose,
            polling_delay: Duration::from_secs(polling_delay_in_secs),
            credentials,
            endpoints: ApiEndpoints { http },
            pairs,
        })
    }

    /// Reads `.env` (if present) and the process environment.
    pub fn from_env(exchange_id: ExchangeId) -> Result<Self, GlintError> {
        dotenv().ok();
        Self::from_lookup(exchange_id, |name| var(name).ok())
    }
}

pub fn load_exchanges_configs() -> Result<HashMap<ExchangeId, ExchangeConfig>, GlintError> {
    ExchangeId::all()
        .into_iter()
        .map(|exchange_id| Ok((exchange_id, ExchangeConfig::from_env(exchange_id)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(entries: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let entries: HashMap<String, String> = entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name: &str| entries.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ExchangeConfig::from_lookup(ExchangeId::ItBit, lookup(&[])).unwrap();
        assert!(config.enabled);
        assert!(!config.verbose);
        assert_eq!(config.polling_delay, Duration::from_secs(10));
        assert_eq!(config.credentials, None);
        assert_eq!(config.endpoints.http, "https://api.itbit.com");
        assert_eq!(config.pairs, vec![CurrencyPair::new("XBT", "USD")]);
    }

    #[test]
    fn test_overrides() {
        let config = ExchangeConfig::from_lookup(
            ExchangeId::Liqui,
            lookup(&[
                ("LIQUI_ENABLED", "false"),
                ("LIQUI_VERBOSE", "1"),
                ("LIQUI_POLLING_DELAY_SECS", "3"),
                ("LIQUI_API_KEY", "key"),
                ("LIQUI_API_SECRET", "secret"),
                ("LIQUI_HTTP_BASE_URL", "http://localhost:8080/"),
                ("LIQUI_PAIRS", "eth_usdt, dash_btc"),
            ]),
        )
        .unwrap();
        assert!(!config.enabled);
        assert!(config.verbose);
        assert_eq!(config.polling_delay, Duration::from_secs(3));
        assert_eq!(
            config.credentials,
            Some(Credentials::new("key", "secret", None))
        );
        assert_eq!(config.endpoints.http, "http://localhost:8080");
        assert_eq!(config.pairs[1].to_string(), "DASH_BTC");
    }

    #[test]
    fn test_half_credentials_are_ignored() {
        let config =
            ExchangeConfig::from_lookup(ExchangeId::Liqui, lookup(&[("LIQUI_API_KEY", "key")]))
                .unwrap();
        assert_eq!(config.credentials, None);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(ExchangeConfig::from_lookup(
            ExchangeId::ItBit,
            lookup(&[("ITBIT_POLLING_DELAY_SECS", "soon")])
        )
        .is_err());
        assert!(
            ExchangeConfig::from_lookup(ExchangeId::ItBit, lookup(&[("ITBIT_ENABLED", "maybe")]))
                .is_err()
        );
        assert!(
            ExchangeConfig::from_lookup(ExchangeId::Liqui, lookup(&[("LIQUI_PAIRS", "ethbtc")]))
                .is_err()
        );
    }

    #[test]
    fn test_parse_pair() {
        let pair = parse_pair("xbtusd", "").unwrap();
        assert_eq!(pair.first_currency, "XBT");
        assert_eq!(pair.second_currency, "USD");
        assert!(parse_pair("XBT", "").is_err());
        assert_eq!(parse_pair(" ltc_btc ", "_").unwrap().to_string(), "LTC_BTC");
    }
}
