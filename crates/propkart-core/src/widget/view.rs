//! Render function for the chat widget.
//!
//! Pure: the same [`WidgetState`] and [`WidgetConfig`] always produce the same
//! tree. Element ids and classes match the widget stylesheet.

use propkart_types::chat::{ChatMessage, PropertyId};
use propkart_types::config::WidgetConfig;

use crate::render::{Element, multiline};

use super::controller::WidgetState;

pub const WIDGET_ID: &str = "chatWidget";
pub const HEADER_ID: &str = "chatHeader";
pub const MESSAGES_ID: &str = "chatMessages";
pub const INPUT_ID: &str = "chatInput";
pub const SEND_BUTTON_ID: &str = "sendBtn";
pub const CLEAR_BUTTON_ID: &str = "clearBtn";
pub const MINIMIZE_BUTTON_ID: &str = "minimizeBtn";
pub const CLOSE_BUTTON_ID: &str = "closeBtn";
pub const LAUNCHER_ID: &str = "chatFab";
pub const TYPING_ID: &str = "typingIndicator";

/// Render the panel and its launcher under one root.
pub fn render(state: &WidgetState, config: &WidgetConfig) -> Element {
    Element::new("div")
        .class("chat-root")
        .child(render_panel(state, config))
        .child(render_launcher(state))
}

fn render_panel(state: &WidgetState, config: &WidgetConfig) -> Element {
    let presentation = state.presentation;

    let header = Element::new("div")
        .id(HEADER_ID)
        .class("chat-header")
        .child(Element::new("h3").text(&config.title))
        .child(
            Element::new("div")
                .class("chat-controls")
                .child(
                    Element::new("button")
                        .id(CLEAR_BUTTON_ID)
                        .attr("title", "Clear chat")
                        .flag_if("disabled", state.clearing)
                        .text("🧹"),
                )
                .child(
                    Element::new("button")
                        .id(MINIMIZE_BUTTON_ID)
                        .attr("title", "Minimize")
                        .text(presentation.minimize_label()),
                )
                .child(
                    Element::new("button")
                        .id(CLOSE_BUTTON_ID)
                        .attr("title", "Close")
                        .text("×"),
                ),
        );

    let mut messages = Element::new("div")
        .id(MESSAGES_ID)
        .class("chat-messages")
        .children(
            state
                .transcript
                .iter()
                .map(|msg| render_message(msg, &config.property_url_prefix)),
        );
    if state.typing {
        messages = messages.child(render_typing_indicator());
    }

    let input = Element::new("div").class("chat-input-container").child(
        Element::new("div")
            .class("chat-input-wrapper")
            .child(
                Element::new("textarea")
                    .id(INPUT_ID)
                    .class("chat-input")
                    .attr("placeholder", &config.input_placeholder)
                    .attr("rows", "1")
                    .attr("style", state.composer.height_style())
                    .text(state.composer.value()),
            )
            .child(
                Element::new("button")
                    .id(SEND_BUTTON_ID)
                    .class("send-button")
                    .flag_if("disabled", state.loading)
                    .text("Send"),
            ),
    );

    Element::new("div")
        .id(WIDGET_ID)
        .class("chat-widget")
        .class_if("minimized", presentation == super::Presentation::Minimized)
        .class_if("hidden", presentation == super::Presentation::Hidden)
        .child(header)
        .child(messages)
        .child(input)
}

fn render_launcher(state: &WidgetState) -> Element {
    let presentation = state.presentation;
    let display = if presentation.launcher_visible() {
        "display: flex"
    } else {
        "display: none"
    };
    Element::new("button")
        .id(LAUNCHER_ID)
        .class("chat-fab")
        .class_if("pulse", presentation.launcher_pulsing())
        .attr("aria-label", "Open chat")
        .attr("style", display)
}

/// One transcript row: bubble, optional property links, time.
pub fn render_message(msg: &ChatMessage, property_url_prefix: &str) -> Element {
    let role = msg.role.as_str();

    let mut bubble = Element::new("div")
        .class("message-bubble")
        .class(role)
        .children(multiline(&msg.text));
    if !msg.referenced_properties.is_empty() {
        bubble = bubble.child(render_property_links(
            &msg.referenced_properties,
            property_url_prefix,
        ));
    }

    Element::new("div")
        .class("chat-message")
        .class(role)
        .child(bubble)
        .child(
            Element::new("div")
                .class("message-time")
                .class(role)
                .text(msg.time_label()),
        )
}

fn render_property_links(ids: &[PropertyId], url_prefix: &str) -> Element {
    Element::new("div")
        .class("property-links")
        .child(Element::new("h4").text("Related Properties"))
        .children(ids.iter().map(|id| {
            Element::new("a")
                .class("property-link")
                .attr("href", property_url(url_prefix, *id))
                .attr("target", "_blank")
                .text(format!("View Property #{id}"))
        }))
}

/// Canonical page of a listing, e.g. `/property/12/`.
pub fn property_url(url_prefix: &str, id: PropertyId) -> String {
    format!("{}/{id}/", url_prefix.trim_end_matches('/'))
}

fn render_typing_indicator() -> Element {
    Element::new("div")
        .id(TYPING_ID)
        .class("chat-message")
        .class("assistant")
        .child(
            Element::new("div")
                .class("message-bubble")
                .class("assistant")
                .child(
                    Element::new("div")
                        .class("typing-indicator")
                        .text("Assistant is typing")
                        .child(
                            Element::new("div")
                                .class("typing-dots")
                                .children((0..3).map(|_| Element::new("div").class("typing-dot"))),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Node;
    use crate::widget::Presentation;
    use propkart_types::chat::MessageRole;

    fn state_with(messages: Vec<ChatMessage>) -> WidgetState {
        WidgetState {
            transcript: messages,
            ..WidgetState::new(&WidgetConfig::default())
        }
    }

    #[test]
    fn test_message_renders_newlines_as_breaks() {
        let msg = ChatMessage::assistant("Flat A\nFlat B");
        let el = render_message(&msg, "/property/");
        let html = el.to_html();
        assert!(html.contains("Flat A<br>Flat B"));
        assert!(el.has_class("chat-message"));
        assert!(el.has_class("assistant"));
    }

    #[test]
    fn test_message_renders_one_link_per_reference() {
        let msg = ChatMessage::assistant("Two matches")
            .with_references(vec![PropertyId(4), PropertyId(19)]);
        let node: Node = render_message(&msg, "/property/").into();

        let links = node.find_all_by_class("property-link");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].get_attr("href"), Some("/property/4/"));
        assert_eq!(links[1].get_attr("href"), Some("/property/19/"));
        assert!(links.iter().all(|l| l.get_attr("target") == Some("_blank")));
        assert_eq!(links[1].text_content(), "View Property #19");
    }

    #[test]
    fn test_message_without_references_has_no_link_block() {
        let node: Node = render_message(&ChatMessage::user("hi"), "/property/").into();
        assert!(node.find_all_by_class("property-links").is_empty());
        assert_eq!(node.find_all_by_class("user").len(), 3);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let el = render_message(&ChatMessage::user("<b>bold</b>"), "/property/");
        assert!(el.to_html().contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_open_panel_hides_launcher() {
        let mut state = state_with(vec![]);
        state.presentation = Presentation::Open;
        let tree: Node = render(&state, &WidgetConfig::default()).into();

        let panel = tree.find_by_id(WIDGET_ID).unwrap();
        assert!(!panel.has_class("minimized"));
        assert!(!panel.has_class("hidden"));

        let fab = tree.find_by_id(LAUNCHER_ID).unwrap();
        assert_eq!(fab.get_attr("style"), Some("display: none"));
        assert!(!fab.has_class("pulse"));
        assert_eq!(tree.find_by_id(MINIMIZE_BUTTON_ID).unwrap().text_content(), "−");
    }

    #[test]
    fn test_hidden_panel_shows_pulsing_launcher() {
        let mut state = state_with(vec![]);
        state.presentation = Presentation::Hidden;
        let tree: Node = render(&state, &WidgetConfig::default()).into();

        assert!(tree.find_by_id(WIDGET_ID).unwrap().has_class("hidden"));
        let fab = tree.find_by_id(LAUNCHER_ID).unwrap();
        assert_eq!(fab.get_attr("style"), Some("display: flex"));
        assert!(fab.has_class("pulse"));
    }

    #[test]
    fn test_typing_indicator_and_disabled_send() {
        let mut state = state_with(vec![ChatMessage::user("hello")]);
        state.loading = true;
        state.typing = true;
        let tree: Node = render(&state, &WidgetConfig::default()).into();

        assert!(tree.find_by_id(TYPING_ID).is_some());
        assert!(tree.find_by_id(SEND_BUTTON_ID).unwrap().has_attr("disabled"));
        assert!(!tree.find_by_id(CLEAR_BUTTON_ID).unwrap().has_attr("disabled"));
    }

    #[test]
    fn test_default_state_renders_welcome() {
        let config = WidgetConfig::default();
        let state = WidgetState::new(&config);
        let tree: Node = render(&state, &config).into();

        let rows = tree.find_all_by_class("chat-message");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].has_class(MessageRole::Assistant.as_str()));
        assert!(rows[0].text_content().contains("Welcome to PropKart"));
        assert!(rows[0].text_content().ends_with("Just now"));
    }

    #[test]
    fn test_property_url_tolerates_missing_slash() {
        assert_eq!(property_url("/listing", PropertyId(5)), "/listing/5/");
    }
}
