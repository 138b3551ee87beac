use glint_error::GlintError;
use std::fmt::{Debug, Formatter, Result as FormatterResult};

/// Key material for one exchange account. Each handler owns its own copy.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
    pub client_id: Option<String>,
}

impl Credentials {
    pub fn new(key: &str, secret: &str, client_id: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            secret: secret.to_string(),
            client_id: client_id
                .filter(|client_id| !client_id.is_empty())
                .map(str::to_string),
        }
    }

    pub fn require_client_id(&self) -> Result<&str, GlintError> {
        self.client_id.as_deref().ok_or_else(|| {
            GlintError::new(
                String::from("Missing Client Id"),
                String::from("credentials have no client / user identifier configured"),
            )
        })
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatterResult {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("client_id", &self.client_id)
            .finish()
    }
}
