//! Hover feedback for listing cards.
//!
//! Stateless: the style depends only on the pointer event.

use crate::render::Element;

const LIFT_TRANSITION: &str = "transform 0.3s ease";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
}

/// Inline style of a listing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub transform: &'static str,
    pub transition: &'static str,
    pub box_shadow: &'static str,
}

impl CardStyle {
    pub fn for_event(event: PointerEvent) -> Self {
        match event {
            PointerEvent::Enter => CardStyle {
                transform: "translateY(-5px)",
                transition: LIFT_TRANSITION,
                box_shadow: "0 10px 20px rgba(0,0,0,0.1)",
            },
            PointerEvent::Leave => CardStyle {
                transform: "translateY(0)",
                transition: LIFT_TRANSITION,
                box_shadow: "none",
            },
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "transform: {}; transition: {}; box-shadow: {}",
            self.transform, self.transition, self.box_shadow
        )
    }

    /// Set this style on a card element.
    pub fn apply(&self, card: Element) -> Element {
        card.attr("style", self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_lifts_card() {
        let style = CardStyle::for_event(PointerEvent::Enter);
        assert_eq!(style.transform, "translateY(-5px)");
        assert_eq!(style.box_shadow, "0 10px 20px rgba(0,0,0,0.1)");
    }

    #[test]
    fn test_leave_reverts_card() {
        let card = Element::new("div").class("property-item");
        let lifted = CardStyle::for_event(PointerEvent::Enter).apply(card);
        let rested = CardStyle::for_event(PointerEvent::Leave).apply(lifted);

        assert_eq!(
            rested.get_attr("style"),
            Some("transform: translateY(0); transition: transform 0.3s ease; box-shadow: none")
        );
        assert!(rested.has_class("property-item"));
    }
}
