//! Listing-page enhancements: card hover feedback, view counts, and search
//! autocomplete.

pub mod hover;
pub mod search;
pub mod views;

use std::sync::Arc;

use propkart_types::config::SearchConfig;

pub use hover::{CardStyle, PointerEvent};
pub use search::{SearchState, SearchSuggestions};
pub use views::{ViewCounter, ViewsOutcome};

use crate::backend::ListingBackend;
use crate::render::Element;

/// All enhancements of one listing page, sharing a single backend.
pub struct PageEnhancer<B> {
    views: ViewCounter<B>,
    search: Arc<SearchSuggestions<B>>,
}

impl<B: ListingBackend + Clone + 'static> PageEnhancer<B> {
    pub fn new(backend: B, search: SearchConfig) -> Self {
        Self {
            views: ViewCounter::new(backend.clone()),
            search: SearchSuggestions::new(backend, search),
        }
    }

    pub fn views(&self) -> &ViewCounter<B> {
        &self.views
    }

    pub fn search(&self) -> &Arc<SearchSuggestions<B>> {
        &self.search
    }

    /// Restyle a listing card for a pointer event.
    pub fn hover(&self, card: Element, event: PointerEvent) -> Element {
        CardStyle::for_event(event).apply(card)
    }
}
