//! Credential provider trait definition.
//!
//! The chat widget attaches an anti-forgery token to every mutating request.
//! Where that token comes from (a browser cookie, a cookie jar, a fixed value
//! in tests) is hidden behind [`CredentialProvider`].

use std::sync::Arc;

use secrecy::SecretString;

/// Source of the anti-forgery token sent as `X-CSRFToken`.
pub trait CredentialProvider: Send + Sync {
    /// Current token, or `None` when none is available.
    ///
    /// Absence is not an error: callers send an empty token and let the
    /// server reject the request.
    fn csrf_token(&self) -> Option<SecretString>;
}

impl<T: CredentialProvider + ?Sized> CredentialProvider for Arc<T> {
    fn csrf_token(&self) -> Option<SecretString> {
        (**self).csrf_token()
    }
}

/// A fixed token (or none). Used by the CLI's `--csrf-token` flag and tests.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// A provider that never has a token.
    pub fn none() -> Self {
        Self { token: None }
    }
}

impl CredentialProvider for StaticCredentials {
    fn csrf_token(&self) -> Option<SecretString> {
        self.token.clone().map(SecretString::from)
    }
}

/// Resolve the token to send, falling back to an empty value.
pub fn token_or_empty(provider: &impl CredentialProvider) -> SecretString {
    provider
        .csrf_token()
        .unwrap_or_else(|| SecretString::from(String::new()))
}
