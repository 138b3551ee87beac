use crate::structs::PriceLevel;
use serde::{de::Error, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64<E: Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) if text.is_empty() => Ok(0.0),
            Self::Text(text) => text.parse::<f64>().map_err(E::custom),
        }
    }
}

/// Accepts `"1.5"`, `1.5` and `""` (as zero).
pub fn parse_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_f64()
}

pub fn parse_f64_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(value) => value.into_f64().map(Some),
        None => Ok(None),
    }
}

/// Order book sides, sent as `[[price, amount], ...]` with either numbers or strings.
pub fn parse_price_levels<'de, D>(deserializer: D) -> Result<Vec<PriceLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let levels: Vec<(NumberOrString, NumberOrString)> = Deserialize::deserialize(deserializer)?;
    levels
        .into_iter()
        .map(|(price, amount)| -> Result<PriceLevel, D::Error> {
            Ok(PriceLevel {
                price: price.into_f64()?,
                amount: amount.into_f64()?,
            })
        })
        .collect()
}

pub fn deserialize_boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: i32 = Deserialize::deserialize(deserializer)?;

    if value == 0 {
        Ok(false)
    } else if value == 1 {
        Ok(true)
    } else {
        Err(Error::custom("Invalid boolean value"))
    }
}
