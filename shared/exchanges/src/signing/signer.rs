use super::{
    canonical::{CanonicalForm, SignableRequest},
    nonce::{AuthStamp, NonceCounter},
};
use common::{
    enums::http_method::HttpMethod,
    functions::{calculate_hmac_sha512, sha256_digest, to_base64, to_hex},
    structs::Credentials,
};
use glint_error::GlintError;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::to_string as to_json_string;
use serde_urlencoded::to_string as to_url_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// Params as a JSON object, or an empty body when there are none.
    Json,
    /// Url-encoded params with the nonce appended as the last field.
    FormWithNonce { nonce_field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digest {
    None,
    /// sha256 over the nonce string followed by the canonical message.
    Sha256NoncePrefixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacInput {
    Message,
    /// Request URL bytes followed by the raw digest bytes.
    UrlThenDigest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    Base64,
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// `<header>: <key>:<signature>` plus separate timestamp and nonce headers.
    Authorization {
        header: &'static str,
        timestamp_header: &'static str,
        nonce_header: &'static str,
    },
    KeyAndSign {
        key_header: &'static str,
        sign_header: &'static str,
    },
}

/// Declarative description of how one exchange authenticates requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureScheme {
    pub canonical: CanonicalForm,
    pub body_format: BodyFormat,
    pub digest: Digest,
    pub mac_input: MacInput,
    pub encoding: SignatureEncoding,
    pub headers: HeaderLayout,
    pub content_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignedHeaders(Vec<(&'static str, String)>);

impl SignedHeaders {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn append_to(&self, request_builder: RequestBuilder) -> RequestBuilder {
        self.0
            .iter()
            .fold(request_builder, |builder, (name, value)| {
                builder.header(*name, value.as_str())
            })
    }
}

/// A request ready for transport. `request.body` must be sent byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub request: SignableRequest,
    pub headers: SignedHeaders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSigner {
    scheme: SignatureScheme,
}

impl RequestSigner {
    pub fn new(scheme: SignatureScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &SignatureScheme {
        &self.scheme
    }

    fn check_credentials(credentials: &Credentials) -> Result<(), GlintError> {
        if credentials.secret.is_empty() {
            return Err(GlintError::new_signing_error(String::from(
                "secret key is empty",
            )));
        }
        if credentials.key.is_empty() {
            return Err(GlintError::new_signing_error(String::from(
                "public key is empty",
            )));
        }
        Ok(())
    }

    pub fn serialize_body<P: Serialize>(
        &self,
        params: Option<&P>,
        nonce: i64,
    ) -> Result<String, GlintError> {
        match self.scheme.body_format {
            BodyFormat::Json => match params {
                None => Ok(String::new()),
                Some(params) => to_json_string(params).map_err(|error| {
                    GlintError::new_signing_error(format!("serialize_body -> {}", error))
                }),
            },
            BodyFormat::FormWithNonce { nonce_field } => {
                let mut body = match params {
                    None => String::new(),
                    Some(params) => to_url_string(params).map_err(|error| {
                        GlintError::new_signing_error(format!("serialize_body -> {}", error))
                    })?,
                };
                if !body.is_empty() {
                    body.push('&');
                }
                body.push_str(&format!("{}={}", nonce_field, nonce));
                Ok(body)
            }
        }
    }

    /// Signs an already assembled request. Identical inputs always yield identical headers.
    pub fn sign_request(
        &self,
        request: &SignableRequest,
        credentials: &Credentials,
    ) -> Result<SignedHeaders, GlintError> {
        Self::check_credentials(credentials)?;

        let message = self.scheme.canonical.build(request)?;
        let nonce = request.nonce.to_string();

        let digested = match self.scheme.digest {
            Digest::None => message.into_bytes(),
            Digest::Sha256NoncePrefixed => sha256_digest(format!("{}{}", nonce, message).as_bytes()),
        };

        let mac_input = match self.scheme.mac_input {
            MacInput::Message => digested,
            MacInput::UrlThenDigest => {
                let mut input = request.url.clone().into_bytes();
                input.extend_from_slice(&digested);
                input
            }
        };

        let mac = calculate_hmac_sha512(credentials.secret.as_bytes(), &mac_input)?;
        let signature = match self.scheme.encoding {
            SignatureEncoding::Base64 => to_base64(&mac),
            SignatureEncoding::Hex => to_hex(&mac),
        };

        let mut headers = match self.scheme.headers {
            HeaderLayout::Authorization {
                header,
                timestamp_header,
                nonce_header,
            } => vec![
                (header, format!("{}:{}", credentials.key, signature)),
                (timestamp_header, request.timestamp.to_string()),
                (nonce_header, nonce),
            ],
            HeaderLayout::KeyAndSign {
                key_header,
                sign_header,
            } => vec![
                (key_header, credentials.key.clone()),
                (sign_header, signature),
            ],
        };
        headers.push(("Content-Type", self.scheme.content_type.to_string()));

        Ok(SignedHeaders(headers))
    }

    /// Builds and signs a request using an already issued stamp.
    pub fn sign_with_stamp<P: Serialize>(
        &self,
        method: HttpMethod,
        url: &str,
        params: Option<&P>,
        credentials: &Credentials,
        stamp: AuthStamp,
    ) -> Result<SignedRequest, GlintError> {
        Self::check_credentials(credentials)?;

        let body = self.serialize_body(params, stamp.nonce)?;
        let request = SignableRequest {
            method,
            url: url.to_string(),
            body,
            nonce: stamp.nonce,
            timestamp: stamp.timestamp,
        };
        let headers = self.sign_request(&request, credentials)?;

        Ok(SignedRequest { request, headers })
    }

    /// Issues a fresh stamp from `nonces` and signs the request. Credentials are validated
    /// first so a rejected call never consumes a nonce.
    pub fn sign<P: Serialize>(
        &self,
        method: HttpMethod,
        url: &str,
        params: Option<&P>,
        credentials: &Credentials,
        nonces: &NonceCounter,
    ) -> Result<SignedRequest, GlintError> {
        Self::check_credentials(credentials)?;
        let stamp = nonces.stamp();
        self.sign_with_stamp(method, url, params, credentials, stamp)
    }
}
