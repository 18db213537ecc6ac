//! Backend trait definitions.
//!
//! These are the HTTP collaborators the page components talk to. Uses
//! native async fn in traits (RPITIT, Rust 2024 edition); the returned
//! futures are `Send` so components can be driven from spawned tasks.
//!
//! Implementations live in propkart-infra (e.g., `HttpBackend`).

use std::future::Future;
use std::sync::Arc;

use secrecy::SecretString;

use propkart_types::api::{
    AskRequest, AskResponse, ClearResponse, HistoryResponse, SuggestionsResponse, ViewsResponse,
};
use propkart_types::chat::{PropertyId, SessionId};
use propkart_types::error::ClientError;

/// Chat endpoints used by the chat widget.
///
/// Mutating calls take the anti-forgery token explicitly; an empty token is
/// passed through as-is and left for the server to reject.
///
/// An `Ok` return means a response body was decoded, not that the server
/// succeeded: callers check the `success` flag.
pub trait ChatBackend: Send + Sync {
    /// `POST /api/chat/ask/`
    fn ask(
        &self,
        request: &AskRequest,
        csrf_token: &SecretString,
    ) -> impl Future<Output = Result<AskResponse, ClientError>> + Send;

    /// `POST /api/chat/clear/`
    fn clear(
        &self,
        csrf_token: &SecretString,
    ) -> impl Future<Output = Result<ClearResponse, ClientError>> + Send;

    /// `GET /api/chat/history/`, optionally scoped to a known session.
    fn history(
        &self,
        session_id: Option<&SessionId>,
    ) -> impl Future<Output = Result<HistoryResponse, ClientError>> + Send;
}

/// Listing endpoints used by the page enhancer.
pub trait ListingBackend: Send + Sync {
    /// `GET /api/property/{id}/views/`
    fn view_count(
        &self,
        property_id: PropertyId,
    ) -> impl Future<Output = Result<ViewsResponse, ClientError>> + Send;

    /// `GET /api/search/suggestions/?q=`
    fn suggestions(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<SuggestionsResponse, ClientError>> + Send;
}

impl<T: ChatBackend> ChatBackend for Arc<T> {
    fn ask(
        &self,
        request: &AskRequest,
        csrf_token: &SecretString,
    ) -> impl Future<Output = Result<AskResponse, ClientError>> + Send {
        (**self).ask(request, csrf_token)
    }

    fn clear(
        &self,
        csrf_token: &SecretString,
    ) -> impl Future<Output = Result<ClearResponse, ClientError>> + Send {
        (**self).clear(csrf_token)
    }

    fn history(
        &self,
        session_id: Option<&SessionId>,
    ) -> impl Future<Output = Result<HistoryResponse, ClientError>> + Send {
        (**self).history(session_id)
    }
}

impl<T: ListingBackend> ListingBackend for Arc<T> {
    fn view_count(
        &self,
        property_id: PropertyId,
    ) -> impl Future<Output = Result<ViewsResponse, ClientError>> + Send {
        (**self).view_count(property_id)
    }

    fn suggestions(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<SuggestionsResponse, ClientError>> + Send {
        (**self).suggestions(query)
    }
}
