//! Debounced search-box autocomplete.
//!
//! Every keystroke aborts the previous timer task, issues a new request token
//! and starts a fresh timer, so only the final keystroke of a burst reaches
//! the backend. The token also guards the response: a lookup overtaken by
//! newer input, a selection, or an outside click never repaints the dropdown.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error};

use propkart_types::config::SearchConfig;

use crate::backend::ListingBackend;
use crate::render::Element;
use crate::sequence::{RequestSequence, RequestToken};

pub const DROPDOWN_ID: &str = "search-suggestions";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Current text of the search field.
    pub value: String,
    /// Dropdown entries; empty means the dropdown is cleared.
    pub suggestions: Vec<String>,
}

#[derive(Default)]
struct Inner {
    view: SearchState,
    timer: Option<AbortHandle>,
}

impl Inner {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Search field with a suggestion dropdown.
pub struct SearchSuggestions<B> {
    backend: B,
    config: SearchConfig,
    state: Mutex<Inner>,
    sequence: RequestSequence,
}

impl<B: ListingBackend + 'static> SearchSuggestions<B> {
    pub fn new(backend: B, config: SearchConfig) -> Arc<Self> {
        Arc::new(Self {
            backend,
            config,
            state: Mutex::new(Inner::default()),
            sequence: RequestSequence::new(),
        })
    }

    fn state(&self) -> MutexGuard<'_, Inner> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn snapshot(&self) -> SearchState {
        self.state().view.clone()
    }

    pub fn value(&self) -> String {
        self.state().view.value.clone()
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.state().view.suggestions.clone()
    }

    /// A keystroke changed the field to `value`.
    ///
    /// Restarts the debounce timer; must be called within a tokio runtime.
    /// The returned handle completes once this keystroke's timer (and
    /// lookup, if it still applies) is done, or is cancelled by the next
    /// keystroke.
    pub fn on_input(self: &Arc<Self>, value: &str) -> JoinHandle<()> {
        let mut state = self.state();
        state.view.value = value.to_string();
        state.cancel_timer();

        let token = self.sequence.issue();
        let query = value.trim().to_string();
        let this = Arc::clone(self);
        let handle = tokio::spawn(async move { this.debounced_lookup(token, query).await });
        state.timer = Some(handle.abort_handle());
        handle
    }

    async fn debounced_lookup(&self, token: RequestToken, query: String) {
        tokio::time::sleep(Duration::from_millis(self.config.debounce_ms)).await;
        if !self.sequence.is_current(token) {
            return;
        }
        if query.chars().count() < self.config.min_query_chars {
            debug!(%query, "Query too short for suggestions");
            return;
        }

        debug!(%query, token = token.value(), "Fetching search suggestions");
        match self.backend.suggestions(&query).await {
            Ok(resp) => {
                let mut state = self.state();
                if !self.sequence.is_current(token) {
                    debug!(%query, token = token.value(), "Discarding superseded suggestions");
                    return;
                }
                state.view.suggestions = resp.suggestions;
                state.timer = None;
            }
            Err(e) => error!(%query, error = %e, "Error fetching suggestions"),
        }
    }

    /// The user picked the suggestion at `index`: copy it into the field and
    /// clear the dropdown.
    pub fn select(&self, index: usize) -> Option<String> {
        let mut state = self.state();
        let chosen = state.view.suggestions.get(index)?.clone();
        state.view.value = chosen.clone();
        state.view.suggestions.clear();
        state.cancel_timer();
        self.sequence.issue();
        Some(chosen)
    }

    /// A click landed somewhere on the page. Anything outside the search
    /// field dismisses the dropdown.
    pub fn click(&self, inside_field: bool) {
        if inside_field {
            return;
        }
        let mut state = self.state();
        state.view.suggestions.clear();
        state.cancel_timer();
        self.sequence.issue();
    }

    /// The dropdown container with one item per suggestion.
    pub fn render(&self) -> Element {
        let state = self.state();
        Element::new("div")
            .id(DROPDOWN_ID)
            .class("search-suggestions")
            .children(
                state
                    .view
                    .suggestions
                    .iter()
                    .map(|s| Element::new("div").class("suggestion-item").text(s.as_str())),
            )
    }
}
