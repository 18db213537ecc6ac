//! HttpBackend -- concrete [`ChatBackend`] and [`ListingBackend`] over reqwest.
//!
//! One client serves every endpoint. Its cookie jar is shared with
//! [`CookieCredentials`] so the `csrftoken` cookie set by the server flows
//! back out as the `X-CSRFToken` header on mutating calls.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use propkart_core::backend::{ChatBackend, ListingBackend};
use propkart_types::api::{
    AskRequest, AskResponse, ClearResponse, HistoryResponse, SuggestionsResponse, ViewsResponse,
};
use propkart_types::chat::{PropertyId, SessionId};
use propkart_types::config::ClientConfig;
use propkart_types::error::ClientError;

use crate::cookies::CookieCredentials;

const CSRF_HEADER: &str = "X-CSRFToken";

/// reqwest-backed client for the chat and listing endpoints.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: String,
}

impl HttpBackend {
    /// Build a backend rooted at `config.base_url`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            jar,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credentials that read `cookie_name` from this backend's cookie jar.
    pub fn cookie_credentials(&self, cookie_name: &str) -> Result<CookieCredentials, ClientError> {
        Ok(CookieCredentials::new(
            Arc::clone(&self.jar),
            self.url("/")?,
            cookie_name,
        ))
    }

    /// Fetch a page so the server can set its session and CSRF cookies.
    pub async fn load_page(&self, page_path: &str) -> Result<(), ClientError> {
        let url = self.url(page_path)?;
        tracing::debug!(%url, "Loading page for cookies");
        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Build the full URL for an absolute path.
    fn url(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
    }

    async fn read_reply<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        decode_reply(status, &body)
    }

    async fn read_success<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        decode_success(status, &body)
    }
}

fn transport(e: reqwest::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}

/// Decode a chat endpoint body.
///
/// The chat endpoints answer failures with `{success: false, error}` and a
/// 4xx/5xx status, so any status whose body decodes is returned as a reply.
pub(crate) fn decode_reply<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ClientError> {
    match serde_json::from_slice(body) {
        Ok(reply) => Ok(reply),
        Err(e) if status.is_success() => Err(ClientError::Decode(e.to_string())),
        Err(_) => Err(ClientError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}

/// Decode a listing endpoint body; these carry no failure shape, so any
/// non-2xx status is an error.
pub(crate) fn decode_success<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ClientError> {
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
    serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
}

impl ChatBackend for HttpBackend {
    async fn ask(
        &self,
        request: &AskRequest,
        csrf_token: &SecretString,
    ) -> Result<AskResponse, ClientError> {
        let url = self.url("/api/chat/ask/")?;
        tracing::debug!(%url, "Sending chat message");
        let response = self
            .client
            .post(url)
            .header(CSRF_HEADER, csrf_token.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        Self::read_reply(response).await
    }

    async fn clear(&self, csrf_token: &SecretString) -> Result<ClearResponse, ClientError> {
        let url = self.url("/api/chat/clear/")?;
        tracing::debug!(%url, "Clearing chat session");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, csrf_token.expose_secret())
            .send()
            .await
            .map_err(transport)?;
        Self::read_reply(response).await
    }

    async fn history(
        &self,
        session_id: Option<&SessionId>,
    ) -> Result<HistoryResponse, ClientError> {
        let url = self.url("/api/chat/history/")?;
        tracing::debug!(%url, session_id = ?session_id.map(SessionId::as_str), "Loading chat history");
        let mut request = self.client.get(url);
        if let Some(id) = session_id {
            request = request.query(&[("session_id", id.as_str())]);
        }
        let response = request.send().await.map_err(transport)?;
        Self::read_reply(response).await
    }
}

impl ListingBackend for HttpBackend {
    async fn view_count(&self, property_id: PropertyId) -> Result<ViewsResponse, ClientError> {
        let url = self.url(&format!("/api/property/{property_id}/views/"))?;
        tracing::debug!(%url, %property_id, "Fetching view count");
        let response = self.client.get(url).send().await.map_err(transport)?;
        Self::read_success(response).await
    }

    async fn suggestions(&self, query: &str) -> Result<SuggestionsResponse, ClientError> {
        let url = self.url("/api/search/suggestions/")?;
        tracing::debug!(%url, %query, "Fetching search suggestions");
        let response = self
            .client
            .get(url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(transport)?;
        Self::read_success(response).await
    }
}
