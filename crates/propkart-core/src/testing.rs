//! Mock backends shared by the component tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Notify;

use propkart_types::api::{
    AskRequest, AskResponse, ClearResponse, HistoryResponse, SuggestionsResponse, ViewsResponse,
};
use propkart_types::chat::{PropertyId, SessionId};
use propkart_types::error::ClientError;

use crate::backend::{ChatBackend, ListingBackend};

/// A canned reply. Unscripted calls fail in transport.
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Reply(T),
    Transport,
}

impl<T: Clone> Scripted<T> {
    fn resolve(slot: &Mutex<Option<Scripted<T>>>) -> Result<T, ClientError> {
        match slot.lock().unwrap().clone() {
            Some(Scripted::Reply(value)) => Ok(value),
            Some(Scripted::Transport) | None => {
                Err(ClientError::Transport("connection refused".to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AskCall {
    pub message: String,
    pub csrf_token: String,
}

/// Chat backend that records calls and can hold replies until released.
#[derive(Default)]
pub struct MockChatBackend {
    ask_reply: Mutex<Option<Scripted<AskResponse>>>,
    clear_reply: Mutex<Option<Scripted<ClearResponse>>>,
    history_reply: Mutex<Option<Scripted<HistoryResponse>>>,
    asks: Mutex<Vec<AskCall>>,
    clears: Mutex<Vec<String>>,
    histories: Mutex<usize>,
    ask_gate: Option<Notify>,
    clear_gate: Option<Notify>,
    history_gate: Option<Notify>,
}

impl MockChatBackend {
    /// Ask calls wait for [`MockChatBackend::release`].
    pub fn gated() -> Self {
        Self {
            ask_gate: Some(Notify::new()),
            ..Default::default()
        }
    }

    /// Clear calls wait for [`MockChatBackend::release_clear`].
    pub fn gated_clear() -> Self {
        Self {
            clear_gate: Some(Notify::new()),
            ..Default::default()
        }
    }

    /// History calls wait for [`MockChatBackend::release_history`].
    pub fn gated_history() -> Self {
        Self {
            history_gate: Some(Notify::new()),
            ..Default::default()
        }
    }

    pub fn script_ask(&self, reply: Scripted<AskResponse>) {
        *self.ask_reply.lock().unwrap() = Some(reply);
    }

    pub fn script_clear(&self, reply: Scripted<ClearResponse>) {
        *self.clear_reply.lock().unwrap() = Some(reply);
    }

    pub fn script_history(&self, reply: Scripted<HistoryResponse>) {
        *self.history_reply.lock().unwrap() = Some(reply);
    }

    pub fn release(&self) {
        if let Some(gate) = &self.ask_gate {
            gate.notify_one();
        }
    }

    pub fn release_clear(&self) {
        if let Some(gate) = &self.clear_gate {
            gate.notify_one();
        }
    }

    pub fn release_history(&self) {
        if let Some(gate) = &self.history_gate {
            gate.notify_one();
        }
    }

    pub fn ask_calls(&self) -> Vec<AskCall> {
        self.asks.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) -> usize {
        self.clears.lock().unwrap().len()
    }

    pub fn clear_tokens(&self) -> Vec<String> {
        self.clears.lock().unwrap().clone()
    }

    pub fn history_calls(&self) -> usize {
        *self.histories.lock().unwrap()
    }
}

impl ChatBackend for MockChatBackend {
    async fn ask(
        &self,
        request: &AskRequest,
        csrf_token: &SecretString,
    ) -> Result<AskResponse, ClientError> {
        self.asks.lock().unwrap().push(AskCall {
            message: request.message.clone(),
            csrf_token: csrf_token.expose_secret().to_string(),
        });
        if let Some(gate) = &self.ask_gate {
            gate.notified().await;
        }
        Scripted::resolve(&self.ask_reply)
    }

    async fn clear(&self, csrf_token: &SecretString) -> Result<ClearResponse, ClientError> {
        self.clears
            .lock()
            .unwrap()
            .push(csrf_token.expose_secret().to_string());
        if let Some(gate) = &self.clear_gate {
            gate.notified().await;
        }
        Scripted::resolve(&self.clear_reply)
    }

    async fn history(
        &self,
        _session_id: Option<&SessionId>,
    ) -> Result<HistoryResponse, ClientError> {
        *self.histories.lock().unwrap() += 1;
        if let Some(gate) = &self.history_gate {
            gate.notified().await;
        }
        Scripted::resolve(&self.history_reply)
    }
}

/// Listing backend with per-query latency and a view count table.
#[derive(Default)]
pub struct MockListingBackend {
    views: Mutex<HashMap<PropertyId, u64>>,
    view_calls: Mutex<Vec<PropertyId>>,
    queries: Mutex<Vec<String>>,
    latency: Mutex<HashMap<String, Duration>>,
    fail_suggestions: Mutex<bool>,
}

impl MockListingBackend {
    pub fn with_views(self, id: u64, views: u64) -> Self {
        self.views.lock().unwrap().insert(PropertyId(id), views);
        self
    }

    /// Delay the reply for `query` by `delay`.
    pub fn with_latency(self, query: &str, delay: Duration) -> Self {
        self.latency
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
        self
    }

    pub fn failing_suggestions(self) -> Self {
        *self.fail_suggestions.lock().unwrap() = true;
        self
    }

    pub fn set_views(&self, id: u64, views: u64) {
        self.views.lock().unwrap().insert(PropertyId(id), views);
    }

    pub fn view_calls(&self) -> Vec<PropertyId> {
        self.view_calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl ListingBackend for MockListingBackend {
    async fn view_count(&self, property_id: PropertyId) -> Result<ViewsResponse, ClientError> {
        self.view_calls.lock().unwrap().push(property_id);
        let views = self.views.lock().unwrap().get(&property_id).copied();
        views.map(|views| ViewsResponse { views }).ok_or(ClientError::Status {
            status: 404,
            body: "Not Found".to_string(),
        })
    }

    async fn suggestions(&self, query: &str) -> Result<SuggestionsResponse, ClientError> {
        self.queries.lock().unwrap().push(query.to_string());
        let delay = self.latency.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_suggestions.lock().unwrap() {
            return Err(ClientError::Transport("connection reset".to_string()));
        }
        Ok(SuggestionsResponse {
            suggestions: vec![format!("{query} Central"), format!("{query} West")],
        })
    }
}
