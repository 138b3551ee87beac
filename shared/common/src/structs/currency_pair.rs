use crate::functions::normalize_currency;
use glint_error::GlintError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FormatterResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub delimiter: String,
    pub first_currency: String,
    pub second_currency: String,
}

impl CurrencyPair {
    pub fn new(first_currency: &str, second_currency: &str) -> Self {
        Self {
            delimiter: String::new(),
            first_currency: normalize_currency(first_currency),
            second_currency: normalize_currency(second_currency),
        }
    }

    /// Parses pairs written as `ETH_BTC` / `eth-btc`.
    pub fn from_delimited(pair: &str, delimiter: &str) -> Result<Self, GlintError> {
        match pair.split_once(delimiter) {
            Some((first, second)) if !first.is_empty() && !second.is_empty() => Ok(Self {
                delimiter: delimiter.to_string(),
                first_currency: normalize_currency(first),
                second_currency: normalize_currency(second),
            }),
            _ => Err(GlintError::new(
                String::from("Invalid Currency Pair"),
                format!("{} is not delimited by {:?}", pair, delimiter),
            )),
        }
    }

    pub fn to_lowercase(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatterResult {
        write!(
            f,
            "{}{}{}",
            self.first_currency, self.delimiter, self.second_currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delimited() {
        let pair = CurrencyPair::from_delimited("eth_btc", "_").unwrap();
        assert_eq!(pair.first_currency, "ETH");
        assert_eq!(pair.second_currency, "BTC");
        assert_eq!(pair.to_string(), "ETH_BTC");
        assert_eq!(pair.to_lowercase(), "eth_btc");
    }

    #[test]
    fn test_from_delimited_rejects_missing_delimiter() {
        assert!(CurrencyPair::from_delimited("ETHBTC", "_").is_err());
        assert!(CurrencyPair::from_delimited("_BTC", "_").is_err());
    }

    #[test]
    fn test_undelimited_display() {
        assert_eq!(CurrencyPair::new("xbt", "usd").to_string(), "XBTUSD");
    }
}
