//! Cookie-jar backed [`CredentialProvider`].

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use secrecy::SecretString;

use propkart_core::credentials::CredentialProvider;

/// Reads the anti-forgery token from a named cookie in a shared jar.
///
/// The cookie is looked up at request time, so a token rotated by the
/// server is picked up on the next mutating call.
pub struct CookieCredentials {
    jar: Arc<Jar>,
    url: Url,
    name: String,
}

impl CookieCredentials {
    pub fn new(jar: Arc<Jar>, url: Url, name: impl Into<String>) -> Self {
        Self {
            jar,
            url,
            name: name.into(),
        }
    }
}

impl CredentialProvider for CookieCredentials {
    fn csrf_token(&self) -> Option<SecretString> {
        let header = self.jar.cookies(&self.url)?;
        let header = header.to_str().ok()?;
        parse_cookie_value(header, &self.name).map(|v| SecretString::from(v.to_string()))
    }
}

/// Value of cookie `name` in a `Cookie:` header string (`a=1; b=2`).
///
/// Empty values count as absent.
pub fn parse_cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
