use common::enums::http_method::HttpMethod;
use glint_error::GlintError;
use serde_json::{from_str, to_string as to_json_string};

/// One component of an authenticated request that may take part in the signed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageField {
    Method,
    Url,
    Body,
    Nonce,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEncoding {
    /// Compact JSON array of strings, e.g. `["GET","https://..","","41","42"]`.
    JsonArray,
    /// Values concatenated with a separator.
    Joined(&'static str),
}

/// The shape of the message an exchange expects to be signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalForm {
    pub fields: &'static [MessageField],
    pub encoding: MessageEncoding,
}

/// Everything an authenticated call carries into the signer. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Exact bytes that will go over the wire; empty when the call has no payload.
    pub body: String,
    pub nonce: i64,
    pub timestamp: i64,
}

impl SignableRequest {
    pub fn field_value(&self, field: MessageField) -> String {
        match field {
            MessageField::Method => self.method.to_string(),
            MessageField::Url => self.url.clone(),
            MessageField::Body => self.body.clone(),
            MessageField::Nonce => self.nonce.to_string(),
            MessageField::Timestamp => self.timestamp.to_string(),
        }
    }
}

impl CanonicalForm {
    pub fn field_values(&self, request: &SignableRequest) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| request.field_value(*field))
            .collect()
    }

    pub fn build(&self, request: &SignableRequest) -> Result<String, GlintError> {
        self.encode(&self.field_values(request))
    }

    pub fn encode(&self, values: &[String]) -> Result<String, GlintError> {
        if values.len() != self.fields.len() {
            let error = format!(
                "encode -> expected {} values, got {}",
                self.fields.len(),
                values.len()
            );
            return Err(GlintError::new_signing_error(error));
        }

        match self.encoding {
            MessageEncoding::JsonArray => to_json_string(values).map_err(|error| {
                GlintError::new_signing_error(format!("encode -> {}", error))
            }),
            MessageEncoding::Joined(separator) => Ok(values.join(separator)),
        }
    }

    /// Splits a canonical message back into its field values.
    pub fn decode(&self, message: &str) -> Result<Vec<String>, GlintError> {
        let values = match self.encoding {
            MessageEncoding::JsonArray => from_str::<Vec<String>>(message).map_err(|error| {
                GlintError::new_signing_error(format!("decode -> {}", error))
            })?,
            MessageEncoding::Joined(_) if self.fields.len() == 1 => vec![message.to_string()],
            MessageEncoding::Joined("") => {
                let error = String::from("decode -> empty separator is ambiguous over many fields");
                return Err(GlintError::new_signing_error(error));
            }
            MessageEncoding::Joined(separator) => {
                message.split(separator).map(str::to_string).collect()
            }
        };

        if values.len() != self.fields.len() {
            let error = format!(
                "decode -> expected {} fields, found {}",
                self.fields.len(),
                values.len()
            );
            return Err(GlintError::new_signing_error(error));
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_FORM: CanonicalForm = CanonicalForm {
        fields: &[
            MessageField::Method,
            MessageField::Url,
            MessageField::Body,
            MessageField::Nonce,
            MessageField::Timestamp,
        ],
        encoding: MessageEncoding::JsonArray,
    };

    const NULL_JOINED_FORM: CanonicalForm = CanonicalForm {
        fields: &[MessageField::Url, MessageField::Body, MessageField::Nonce],
        encoding: MessageEncoding::Joined("\0"),
    };

    const BODY_ONLY_FORM: CanonicalForm = CanonicalForm {
        fields: &[MessageField::Body],
        encoding: MessageEncoding::Joined(""),
    };

    fn request(body: &str) -> SignableRequest {
        SignableRequest {
            method: HttpMethod::Post,
            url: String::from("https://api.itbit.com/v1/wallets"),
            body: body.to_string(),
            nonce: 1_700_000_000,
            timestamp: 1_700_000_001,
        }
    }

    #[test]
    fn test_json_array_layout() {
        let message = JSON_FORM.build(&request(r#"{"name":"main"}"#)).unwrap();
        assert_eq!(
            message,
            r#"["POST","https://api.itbit.com/v1/wallets","{\"name\":\"main\"}","1700000000","1700000001"]"#
        );
    }

    #[test]
    fn test_empty_body_is_empty_string() {
        let mut empty = request("");
        empty.method = HttpMethod::Get;
        let message = JSON_FORM.build(&empty).unwrap();
        assert_eq!(
            message,
            r#"["GET","https://api.itbit.com/v1/wallets","","1700000000","1700000001"]"#
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let signable = request(r#"{"b":1,"a":2}"#);
        assert_eq!(
            JSON_FORM.build(&signable).unwrap(),
            JSON_FORM.build(&signable).unwrap()
        );
    }

    #[test]
    fn test_decode_then_encode_reproduces_message() {
        for form in [JSON_FORM, NULL_JOINED_FORM, BODY_ONLY_FORM] {
            let signable = request(r#"{"amount":"1.00000000","note":"a \"quoted\" value"}"#);
            let message = form.build(&signable).unwrap();
            let values = form.decode(&message).unwrap();
            assert_eq!(values, form.field_values(&signable));
            assert_eq!(form.encode(&values).unwrap(), message);
        }
    }

    #[test]
    fn test_decode_rejects_wrong_arity() {
        assert!(JSON_FORM.decode(r#"["GET","url"]"#).is_err());
        assert!(JSON_FORM.decode("not json").unwrap_err().is_signing_error());
        assert!(NULL_JOINED_FORM.decode("only\0two").is_err());
    }

    #[test]
    fn test_encode_rejects_wrong_arity() {
        let error = BODY_ONLY_FORM
            .encode(&[String::from("a"), String::from("b")])
            .unwrap_err();
        assert!(error.is_signing_error());
    }
}
