//! On-demand view counter for listing detail views.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::{debug, error};

use propkart_types::chat::PropertyId;

use crate::backend::ListingBackend;
use crate::render::Element;
use crate::sequence::{RequestSequence, RequestToken};

/// Result of [`ViewCounter::open_detail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewsOutcome {
    Updated(u64),
    /// The page has no slot for this listing; nothing was fetched.
    NoSlot,
    Stale,
    Failed,
}

#[derive(Debug, Default)]
struct Slot {
    views: Option<u64>,
    pending: Option<RequestToken>,
}

/// View counts written into registered `views-{id}` slots.
pub struct ViewCounter<B> {
    backend: B,
    slots: Mutex<BTreeMap<PropertyId, Slot>>,
    sequence: RequestSequence,
}

impl<B: ListingBackend> ViewCounter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            slots: Mutex::new(BTreeMap::new()),
            sequence: RequestSequence::new(),
        }
    }

    /// Declare that the page shows a counter for `id`.
    pub fn register_slot(&self, id: PropertyId) {
        self.slots.lock().unwrap_or_else(|p| p.into_inner()).entry(id).or_default();
    }

    pub fn views(&self, id: PropertyId) -> Option<u64> {
        self.slots
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(&id)
            .and_then(|slot| slot.views)
    }

    /// A detail view for `id` was opened: fetch and write its count.
    pub async fn open_detail(&self, id: PropertyId) -> ViewsOutcome {
        let token = {
            let mut slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());
            let Some(slot) = slots.get_mut(&id) else {
                debug!(property_id = %id, "No view slot on page, skipping fetch");
                return ViewsOutcome::NoSlot;
            };
            let token = self.sequence.issue();
            slot.pending = Some(token);
            token
        };

        let result = self.backend.view_count(id).await;

        let mut slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());
        let Some(slot) = slots.get_mut(&id) else {
            return ViewsOutcome::NoSlot;
        };
        if slot.pending != Some(token) {
            debug!(property_id = %id, token = token.value(), "Discarding superseded view count");
            return ViewsOutcome::Stale;
        }
        slot.pending = None;

        match result {
            Ok(resp) => {
                slot.views = Some(resp.views);
                ViewsOutcome::Updated(resp.views)
            }
            Err(e) => {
                error!(property_id = %id, error = %e, "Error updating views");
                ViewsOutcome::Failed
            }
        }
    }

    /// The `<span id="views-{id}">` slot, if registered.
    pub fn render_slot(&self, id: PropertyId) -> Option<Element> {
        let slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());
        let slot = slots.get(&id)?;
        let el = Element::new("span")
            .id(format!("views-{id}"))
            .class("property-views");
        Some(match slot.views {
            Some(views) => el.text(views.to_string()),
            None => el,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockListingBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_open_detail_writes_count_into_slot() {
        let backend = Arc::new(MockListingBackend::default().with_views(7, 42));
        let counter = ViewCounter::new(backend.clone());
        counter.register_slot(PropertyId(7));

        assert_eq!(counter.open_detail(PropertyId(7)).await, ViewsOutcome::Updated(42));
        assert_eq!(counter.views(PropertyId(7)), Some(42));

        let slot = counter.render_slot(PropertyId(7)).unwrap();
        assert_eq!(slot.id.as_deref(), Some("views-7"));
        assert_eq!(slot.text_content(), "42");
    }

    #[tokio::test]
    async fn test_unregistered_slot_is_not_fetched() {
        let backend = Arc::new(MockListingBackend::default().with_views(7, 42));
        let counter = ViewCounter::new(backend.clone());

        assert_eq!(counter.open_detail(PropertyId(7)).await, ViewsOutcome::NoSlot);
        assert!(backend.view_calls().is_empty());
        assert!(counter.render_slot(PropertyId(7)).is_none());
    }

    #[tokio::test]
    async fn test_each_open_refetches() {
        let backend = Arc::new(MockListingBackend::default().with_views(3, 10));
        let counter = ViewCounter::new(backend.clone());
        counter.register_slot(PropertyId(3));

        counter.open_detail(PropertyId(3)).await;
        backend.set_views(3, 11);
        assert_eq!(counter.open_detail(PropertyId(3)).await, ViewsOutcome::Updated(11));
        assert_eq!(backend.view_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_count() {
        let backend = Arc::new(MockListingBackend::default().with_views(3, 10));
        let counter = ViewCounter::new(backend.clone());
        counter.register_slot(PropertyId(3));
        counter.register_slot(PropertyId(4));

        counter.open_detail(PropertyId(3)).await;
        assert_eq!(counter.open_detail(PropertyId(4)).await, ViewsOutcome::Failed);
        assert_eq!(counter.views(PropertyId(3)), Some(10));
        assert_eq!(counter.views(PropertyId(4)), None);
        assert_eq!(counter.render_slot(PropertyId(4)).unwrap().text_content(), "");
    }
}
