use common::functions::format_float;
use serde::Serializer;

/// Quantities are sent with 8 decimal places.
pub fn amount_as_string<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_float(*value, 8))
}

/// Fiat-quoted prices are sent with 2 decimal places.
pub fn price_as_string<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_float(*value, 2))
}
