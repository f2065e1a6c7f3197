//! Authentication handling for GitHub API.

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Result;

/// Authentication method for GitHub API.
#[derive(Debug, Clone, Default)]
pub enum Auth {
    /// Send requests without credentials.
    #[default]
    Anonymous,

    /// Use a specific token.
    Token(SecretString),
}

impl Auth {
    /// Create auth from an optional token. `None` means anonymous.
    #[must_use]
    pub fn from_token(token: Option<&SecretString>) -> Self {
        token.map_or(Self::Anonymous, |t| Self::Token(t.clone()))
    }

    /// Whether requests carry credentials.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// `Authorization` header value, if any. Marked sensitive so it is
    /// redacted from debug output.
    ///
    /// # Errors
    /// Returns error if the token contains characters not allowed in headers.
    pub(crate) fn header_value(&self) -> Result<Option<HeaderValue>> {
        match self {
            Self::Anonymous => Ok(None),
            Self::Token(token) => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
                value.set_sensitive(true);
                Ok(Some(value))
            }
        }
    }
}
