//! Authenticated request signing: canonical message layout, per-credential nonce issuance
//! and HMAC signatures, configured per exchange through a [`signer::SignatureScheme`].
pub mod canonical;
pub mod nonce;
pub mod signer;

pub use canonical::{CanonicalForm, MessageEncoding, MessageField, SignableRequest};
pub use nonce::{AuthStamp, NonceCounter, NonceLedger, NonceStyle};
pub use signer::{
    BodyFormat, Digest, HeaderLayout, MacInput, RequestSigner, SignatureEncoding,
    SignatureScheme, SignedHeaders, SignedRequest,
};
