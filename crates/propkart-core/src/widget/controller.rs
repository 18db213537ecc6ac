//! ChatWidget -- controller for the floating chat panel.
//!
//! Holds all widget state behind a `std::sync::Mutex` that is never held
//! across an `.await`, so a shared `Arc<ChatWidget>` can serve overlapping
//! user events. A single `loading` guard serializes send and clear: a second
//! attempt while one is in flight is dropped, not queued.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, warn};

use propkart_types::api::{AskRequest, HistoryResponse, error_text};
use propkart_types::chat::{ChatMessage, SessionId};
use propkart_types::config::WidgetConfig;
use propkart_types::error::ClientError;

use crate::backend::ChatBackend;
use crate::credentials::{CredentialProvider, token_or_empty};
use crate::render::Element;
use crate::sequence::{RequestSequence, RequestToken};

use super::composer::{Composer, KeyAction, KeyPress};
use super::mount::should_mount;
use super::presentation::{Presentation, WidgetAction};
use super::view;

const ASK_UNREACHABLE: &str = "Sorry, I'm having trouble connecting. Please try again later.";
const CLEAR_UNREACHABLE: &str = "Sorry, failed to clear chat. Please try again.";

/// Everything the widget renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    pub presentation: Presentation,
    /// A send or clear is in flight; gates both and disables the send button.
    pub loading: bool,
    /// A clear is in flight; disables the clear button.
    pub clearing: bool,
    /// The "assistant is typing" placeholder is shown after the transcript.
    pub typing: bool,
    pub transcript: Vec<ChatMessage>,
    pub session_id: Option<SessionId>,
    pub composer: Composer,
}

impl WidgetState {
    /// Fresh state: minimized, holding only the welcome message.
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            presentation: Presentation::default(),
            loading: false,
            clearing: false,
            typing: false,
            transcript: vec![ChatMessage::welcome(config.welcome_message.clone())],
            session_id: None,
            composer: Composer::default(),
        }
    }
}

/// Result of [`ChatWidget::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing to send after trimming.
    Empty,
    /// Another request was in flight; dropped.
    Busy,
    /// The assistant answered and the reply was appended.
    Replied,
    /// The server answered with `success: false`; carries its error text.
    Rejected(String),
    /// The request failed in transport.
    Unreachable,
    /// A newer request superseded this one before it settled.
    Stale,
}

/// Result of [`ChatWidget::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    Busy,
    Cleared,
    Rejected(String),
    Unreachable,
    Stale,
}

/// Result of [`ChatWidget::load_history`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// The transcript was replaced with this many stored messages.
    Restored(usize),
    /// No stored messages (or the server declined); welcome left in place.
    Empty,
    Busy,
    Stale,
    Failed,
}

/// Releases the in-flight guard on every exit path, including when the
/// owning future is dropped mid-request.
struct InFlight<'a> {
    state: &'a Mutex<WidgetState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        state.loading = false;
        state.clearing = false;
        state.typing = false;
    }
}

fn lock(state: &Mutex<WidgetState>) -> MutexGuard<'_, WidgetState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The floating chat widget.
pub struct ChatWidget<B, C> {
    backend: B,
    credentials: C,
    config: WidgetConfig,
    state: Mutex<WidgetState>,
    sequence: RequestSequence,
}

impl<B: ChatBackend, C: CredentialProvider> ChatWidget<B, C> {
    pub fn new(backend: B, credentials: C, config: WidgetConfig) -> Self {
        let state = WidgetState::new(&config);
        Self {
            backend,
            credentials,
            config,
            state: Mutex::new(state),
            sequence: RequestSequence::new(),
        }
    }

    /// Create the widget for `page_path` and load its history.
    ///
    /// Returns `None` on seller-facing pages, where the widget never mounts.
    pub async fn mount(
        backend: B,
        credentials: C,
        config: WidgetConfig,
        seller_prefix: &str,
        page_path: &str,
    ) -> Option<Arc<Self>> {
        if !should_mount(page_path, seller_prefix) {
            debug!(page_path, "Chat widget not mounted on seller page");
            return None;
        }
        let widget = Arc::new(Self::new(backend, credentials, config));
        widget.load_history().await;
        Some(widget)
    }

    fn state(&self) -> MutexGuard<'_, WidgetState> {
        lock(&self.state)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> WidgetState {
        self.state().clone()
    }

    pub fn render(&self) -> Element {
        view::render(&self.state(), &self.config)
    }

    pub fn presentation(&self) -> Presentation {
        self.state().presentation
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.state().session_id.clone()
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state().transcript.clone()
    }

    // --- Presentation ---

    /// Apply a presentation action and return the new presentation.
    pub fn dispatch(&self, action: WidgetAction) -> Presentation {
        let mut state = self.state();
        let next = state.presentation.apply(action);
        if next != state.presentation {
            debug!(from = %state.presentation, to = %next, ?action, "Widget presentation changed");
        }
        state.presentation = next;
        next
    }

    pub fn open(&self) -> Presentation {
        self.dispatch(WidgetAction::Open)
    }

    /// Hide the panel. The transcript is kept.
    pub fn close(&self) -> Presentation {
        self.dispatch(WidgetAction::Close)
    }

    pub fn toggle_minimize(&self) -> Presentation {
        self.dispatch(WidgetAction::ToggleMinimize)
    }

    // --- Input ---

    /// The input's text changed; `scroll_height` is its measured content
    /// height, or `None` when nothing was measured.
    pub fn input(&self, value: &str, scroll_height: Option<u32>) {
        let max = self.config.input_max_height;
        self.state().composer.on_input(value, scroll_height, max);
    }

    /// Handle a keydown in the input. Returns the send outcome when the key
    /// submitted the message.
    pub async fn key_down(&self, press: KeyPress) -> Option<SendOutcome> {
        match KeyAction::for_key(press) {
            KeyAction::Submit => Some(self.submit().await),
            KeyAction::InsertNewline => {
                self.state().composer.insert_newline();
                None
            }
            KeyAction::Default => None,
        }
    }

    /// Send whatever is in the input.
    pub async fn submit(&self) -> SendOutcome {
        let text = self.state().composer.value().to_string();
        self.send(&text).await
    }

    // --- Requests ---

    /// Send a user message and append the assistant's reply.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::Empty;
        }

        let token = {
            let mut state = self.state();
            if state.loading {
                debug!("Send ignored: request already in flight");
                return SendOutcome::Busy;
            }
            state.loading = true;
            state.transcript.push(ChatMessage::user(message));
            state.composer.reset();
            state.typing = true;
            self.sequence.issue()
        };
        let _in_flight = InFlight { state: &self.state };

        let request = AskRequest {
            message: message.to_string(),
        };
        let csrf_token = token_or_empty(&self.credentials);
        debug!(token = token.value(), chars = message.chars().count(), "Sending chat message");
        let result = self.backend.ask(&request, &csrf_token).await;

        let mut state = self.state();
        if !self.sequence.is_current(token) {
            debug!(token = token.value(), "Discarding superseded ask response");
            return SendOutcome::Stale;
        }
        state.typing = false;
        match result {
            Ok(resp) if resp.success => {
                let reply = ChatMessage::assistant(resp.response.unwrap_or_default())
                    .with_references(resp.referenced_properties);
                state.transcript.push(reply);
                state.session_id = resp.session_id;
                SendOutcome::Replied
            }
            Ok(resp) => {
                let reason = error_text(resp.error.as_deref()).to_string();
                warn!(error = %reason, "Chat ask rejected by server");
                state.transcript.push(ChatMessage::assistant(format!(
                    "Sorry, I encountered an error: {reason}"
                )));
                SendOutcome::Rejected(reason)
            }
            Err(e) => {
                error!(error = %e, "Chat ask failed");
                state.transcript.push(ChatMessage::assistant(ASK_UNREACHABLE));
                SendOutcome::Unreachable
            }
        }
    }

    /// Clear the conversation on the server and reset the transcript.
    pub async fn clear(&self) -> ClearOutcome {
        let token = {
            let mut state = self.state();
            if state.loading {
                debug!("Clear ignored: request already in flight");
                return ClearOutcome::Busy;
            }
            state.loading = true;
            state.clearing = true;
            self.sequence.issue()
        };
        let _in_flight = InFlight { state: &self.state };

        let csrf_token = token_or_empty(&self.credentials);
        debug!(token = token.value(), "Clearing chat");
        let result = self.backend.clear(&csrf_token).await;

        let mut state = self.state();
        if !self.sequence.is_current(token) {
            debug!(token = token.value(), "Discarding superseded clear response");
            return ClearOutcome::Stale;
        }
        match result {
            Ok(resp) if resp.success => {
                state.transcript = vec![ChatMessage::welcome(self.config.cleared_message.clone())];
                state.session_id = resp.session_id;
                state.composer.reset();
                info!(session_id = ?state.session_id, "Chat cleared");
                ClearOutcome::Cleared
            }
            Ok(resp) => {
                let reason = error_text(resp.error.as_deref()).to_string();
                warn!(error = %reason, "Chat clear rejected by server");
                state
                    .transcript
                    .push(ChatMessage::assistant(format!("Could not clear chat: {reason}")));
                ClearOutcome::Rejected(reason)
            }
            Err(e) => {
                error!(error = %e, "Chat clear failed");
                state.transcript.push(ChatMessage::assistant(CLEAR_UNREACHABLE));
                ClearOutcome::Unreachable
            }
        }
    }

    /// Replace the welcome message with stored history, if there is any.
    ///
    /// Failures are logged and never shown in the transcript.
    pub async fn load_history(&self) -> HistoryOutcome {
        let (token, session_id) = {
            let state = self.state();
            if state.loading {
                debug!("History load skipped: request already in flight");
                return HistoryOutcome::Busy;
            }
            (self.sequence.issue(), state.session_id.clone())
        };

        let result = self.backend.history(session_id.as_ref()).await;
        self.apply_history(token, result)
    }

    fn apply_history(
        &self,
        token: RequestToken,
        result: Result<HistoryResponse, ClientError>,
    ) -> HistoryOutcome {
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                error!(error = %e, "Error loading chat history");
                return HistoryOutcome::Failed;
            }
        };

        let mut state = self.state();
        if !self.sequence.is_current(token) {
            debug!(token = token.value(), "Discarding superseded history response");
            return HistoryOutcome::Stale;
        }

        if !resp.success {
            if let Some(err) = resp.error.as_deref() {
                warn!(error = err, "Chat history unavailable");
            }
            return HistoryOutcome::Empty;
        }
        if resp.messages.is_empty() {
            return HistoryOutcome::Empty;
        }

        state.transcript = resp
            .messages
            .iter()
            .map(|m| m.to_chat_message())
            .collect();
        state.session_id = resp.session_id;
        debug!(count = state.transcript.len(), "Chat history restored");
        HistoryOutcome::Restored(state.transcript.len())
    }
}
