use crate::{
    constants::{NO_API_WITHDRAWAL_METHODS_TEXT, WITHDRAW_PERMISSIONS_SEPARATOR},
    enums::withdraw_permission::WithdrawPermission,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use glint_error::GlintError;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

#[inline]
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Computes an HMAC-SHA512 over `message` keyed by `secret`, returning the raw MAC bytes.
pub fn calculate_hmac_sha512(secret: &[u8], message: &[u8]) -> Result<Vec<u8>, GlintError> {
    let mut mac = HmacSha512::new_from_slice(secret)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn sha256_digest(message: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(message);
    hasher.finalize().to_vec()
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Renders `value` with a fixed number of decimal places, as exchanges expect amounts and
/// prices as strings.
pub fn format_float(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Currency codes are compared upper-cased everywhere (`ltc`, `Ltc` and `LTC` are one key).
pub fn normalize_currency(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Human-readable list of withdrawal methods, or `NONE, WITHDRAW` when there are none.
pub fn format_withdraw_permissions(permissions: &[WithdrawPermission]) -> String {
    if permissions.is_empty() {
        return NO_API_WITHDRAWAL_METHODS_TEXT.to_string();
    }
    permissions
        .iter()
        .map(|permission| permission.as_str())
        .collect::<Vec<&str>>()
        .join(WITHDRAW_PERMISSIONS_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha512_known_vector() {
        // RFC 4231, test case 2
        let mac = calculate_hmac_sha512(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            to_hex(&mac),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_hmac_accepts_empty_key() {
        let mac = calculate_hmac_sha512(b"", b"payload").unwrap();
        assert_eq!(mac.len(), 64);
    }

    #[test]
    fn test_sha256_digest() {
        assert_eq!(
            to_hex(&sha256_digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_base64() {
        assert_eq!(to_base64(b"glint"), "Z2xpbnQ=");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.5, 8), "1.50000000");
        assert_eq!(format_float(9_999.999, 2), "10000.00");
    }

    #[test]
    fn test_normalize_currency() {
        assert_eq!(normalize_currency(" ltc"), "LTC");
    }

    #[test]
    fn test_current_timestamp_is_seconds() {
        // 2001-09-09 in seconds; milliseconds would be three orders larger
        let seconds = current_timestamp();
        assert!(seconds > 1_000_000_000);
        assert!(seconds < 100_000_000_000);
    }

    #[test]
    fn test_format_withdraw_permissions() {
        assert_eq!(format_withdraw_permissions(&[]), "NONE, WITHDRAW");
        assert_eq!(
            format_withdraw_permissions(&[WithdrawPermission::AutoWithdrawCrypto]),
            "AUTO WITHDRAW CRYPTO"
        );
        assert_eq!(
            format_withdraw_permissions(&[
                WithdrawPermission::WithdrawCryptoViaWebsiteOnly,
                WithdrawPermission::WithdrawFiatViaWebsiteOnly,
            ]),
            "WITHDRAW CRYPTO VIA WEBSITE ONLY & WITHDRAW FIAT VIA WEBSITE ONLY"
        );
    }
}
