//! Plain-terminal rendering of transcript messages.

use console::style;

use propkart_core::widget::view::property_url;
use propkart_types::chat::{ChatMessage, MessageRole, PropertyId};

/// Formats transcript messages with absolute property links.
pub struct TranscriptPrinter {
    base_url: String,
    property_url_prefix: String,
}

impl TranscriptPrinter {
    pub fn new(base_url: &str, property_url_prefix: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            property_url_prefix: property_url_prefix.to_string(),
        }
    }

    /// Absolute URL of a referenced property.
    pub fn link(&self, id: PropertyId) -> String {
        format!("{}{}", self.base_url, property_url(&self.property_url_prefix, id))
    }

    pub fn format(&self, msg: &ChatMessage) -> String {
        let speaker = match msg.role {
            MessageRole::User => style("You").green().bold(),
            MessageRole::Assistant => style("PropKart").cyan().bold(),
        };
        let mut out = format!("  {speaker} {}\n", style(msg.time_label()).dim());
        for line in msg.text.lines() {
            out.push_str(&format!("  {line}\n"));
        }
        if !msg.referenced_properties.is_empty() {
            out.push_str(&format!("  {}\n", style("Related Properties").bold()));
            for id in &msg.referenced_properties {
                let link = style(self.link(*id)).underlined();
                out.push_str(&format!("    View Property #{id}  {link}\n"));
            }
        }
        out
    }

    pub fn print(&self, msg: &ChatMessage) {
        println!("{}", self.format(msg));
    }

    pub fn print_all(&self, transcript: &[ChatMessage]) {
        for msg in transcript {
            self.print(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer() -> TranscriptPrinter {
        TranscriptPrinter::new("http://localhost:8000/", "/property/")
    }

    #[test]
    fn test_links_are_absolute() {
        assert_eq!(
            printer().link(PropertyId(12)),
            "http://localhost:8000/property/12/"
        );
    }

    #[test]
    fn test_format_lists_related_properties() {
        let msg = ChatMessage::assistant("Two matches")
            .with_references(vec![PropertyId(3), PropertyId(8)]);
        let out = console::strip_ansi_codes(&printer().format(&msg)).to_string();
        assert!(out.contains("PropKart"));
        assert!(out.contains("Two matches"));
        assert!(out.contains("Related Properties"));
        assert!(out.contains("View Property #3  http://localhost:8000/property/3/"));
        assert!(out.contains("View Property #8"));
    }

    #[test]
    fn test_format_welcome_keeps_line_breaks() {
        let msg = ChatMessage::welcome("Hello!\nAsk me anything.");
        let out = console::strip_ansi_codes(&printer().format(&msg)).to_string();
        assert!(out.contains("Just now"));
        assert!(out.contains("  Hello!\n  Ask me anything.\n"));
        assert!(!out.contains("Related Properties"));
    }
}
