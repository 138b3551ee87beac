use hmac::digest::InvalidLength;
use reqwest::Error as ReqwestError;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use serde_urlencoded::ser::Error as UrlEncodedError;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::ParseIntError,
};

pub const SIGNING_ERROR_TITLE: &str = "Signing Error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlintError {
    pub title: String,
    pub description: String,
}

impl GlintError {
    pub fn new(title: String, description: String) -> Self {
        Self { title, description }
    }

    pub fn new_unsuccessful_response(description: String) -> Self {
        Self {
            title: String::from("Unsuccessful Response"),
            description,
        }
    }

    pub fn new_assert_error<T: Display>(assertion: T) -> Self {
        Self {
            title: String::from("Assert Error"),
            description: format!("{} not valid!", assertion),
        }
    }

    /// Raised whenever an authenticated request could not be signed. Callers must not send
    /// the request when they receive one of these.
    pub fn new_signing_error(description: String) -> Self {
        Self {
            title: String::from(SIGNING_ERROR_TITLE),
            description,
        }
    }

    /// Exchange answered with a well-formed payload flagging the call as failed.
    pub fn new_exchange_error(exchange: &str, description: String) -> Self {
        Self {
            title: format!("{} Exchange Error", exchange),
            description,
        }
    }

    pub fn is_signing_error(&self) -> bool {
        self.title == SIGNING_ERROR_TITLE
    }
}

impl Display for GlintError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:\n\n{}", self.title, self.description)
    }
}

impl Error for GlintError {}

impl From<SerdeError> for GlintError {
    fn from(error: SerdeError) -> Self {
        Self::new(String::from("Serde Error"), error.to_string())
    }
}

impl From<ReqwestError> for GlintError {
    fn from(error: ReqwestError) -> Self {
        Self::new(String::from("Reqwest Error"), error.to_string())
    }
}

impl From<UrlEncodedError> for GlintError {
    fn from(error: UrlEncodedError) -> Self {
        Self::new(String::from("Url Encoded Error"), error.to_string())
    }
}

impl From<ParseIntError> for GlintError {
    fn from(error: ParseIntError) -> Self {
        Self::new(String::from("Parse Int Error"), error.to_string())
    }
}

impl From<InvalidLength> for GlintError {
    fn from(error: InvalidLength) -> Self {
        Self::new_signing_error(format!("invalid HMAC key length: {}", error))
    }
}

#[macro_export]
macro_rules! assert_or_error {
    ($cond:expr) => {
        if !$cond {
            return Err($crate::GlintError::new_assert_error(stringify!($cond)));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_or_error_macro() {
        fn return_result() -> Result<(), GlintError> {
            assert_or_error!(2 < 1);
            Ok(())
        }

        let result = return_result();
        assert_eq!(result, Err(GlintError::new_assert_error("2 < 1")));
    }

    #[test]
    fn test_signing_error_is_flagged() {
        let error = GlintError::new_signing_error(String::from("empty secret"));
        assert!(error.is_signing_error());
        assert!(!GlintError::new_unsuccessful_response(String::new()).is_signing_error());
        assert_eq!(error.to_string(), "Signing Error:\n\nempty secret");
    }

    #[test]
    fn test_parse_errors_convert() {
        let error: GlintError = "soon".parse::<u64>().unwrap_err().into();
        assert_eq!(error.title, "Parse Int Error");
    }
}
