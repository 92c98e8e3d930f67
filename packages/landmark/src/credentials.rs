//! Provider credentials.
//!
//! Uses the `secrecy` crate so API keys never show up in logs, `Debug`
//! output or error messages.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value. Only call this when building a client.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// API keys for both collaborators.
#[derive(Clone)]
pub struct ApiCredentials {
    /// Language-model provider key
    pub llm_api_key: SecretString,

    /// Image-generation provider token
    pub image_api_token: SecretString,
}

impl ApiCredentials {
    pub fn new(llm_api_key: impl Into<String>, image_api_token: impl Into<String>) -> Self {
        Self {
            llm_api_key: SecretString::new(llm_api_key),
            image_api_token: SecretString::new(image_api_token),
        }
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("llm_api_key", &"[REDACTED]")
            .field("image_api_token", &"[REDACTED]")
            .finish()
    }
}
