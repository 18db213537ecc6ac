//! Client configuration types.
//!
//! `ClientConfig` represents the `config.toml` that points the client at a
//! PropKart server and tunes the chat widget and search box. All fields have
//! sensible defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the PropKart client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the PropKart server (e.g. "http://localhost:8000").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Cookie holding the anti-forgery token sent as `X-CSRFToken`.
    #[serde(default = "default_csrf_cookie_name")]
    pub csrf_cookie_name: String,

    /// Pages under this path prefix never mount the chat widget.
    #[serde(default = "default_seller_path_prefix")]
    pub seller_path_prefix: String,

    #[serde(default)]
    pub widget: WidgetConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_csrf_cookie_name() -> String {
    "csrftoken".to_string()
}

fn default_seller_path_prefix() -> String {
    "/seller".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            csrf_cookie_name: default_csrf_cookie_name(),
            seller_path_prefix: default_seller_path_prefix(),
            widget: WidgetConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// Copy and sizing of the chat widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Greeting shown before any history is loaded.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,

    /// Greeting shown after the conversation is cleared.
    #[serde(default = "default_cleared_message")]
    pub cleared_message: String,

    #[serde(default = "default_input_placeholder")]
    pub input_placeholder: String,

    /// Height cap (px) for the auto-growing message input.
    #[serde(default = "default_input_max_height")]
    pub input_max_height: u32,

    /// Path prefix of per-listing pages; links render as `{prefix}{id}/`.
    #[serde(default = "default_property_url_prefix")]
    pub property_url_prefix: String,
}

fn default_title() -> String {
    "🏠 PropKart Assistant".to_string()
}

fn default_welcome_message() -> String {
    "👋 Welcome to PropKart! I'm your property assistant. I can help you find your dream \
     property based on your requirements.\nTry asking me about properties in specific areas, \
     price ranges, or property types!"
        .to_string()
}

fn default_cleared_message() -> String {
    "👋 Chat cleared. I can help you find properties. Ask me anything!".to_string()
}

fn default_input_placeholder() -> String {
    "Ask me about properties...".to_string()
}

fn default_input_max_height() -> u32 {
    100
}

fn default_property_url_prefix() -> String {
    "/property/".to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            welcome_message: default_welcome_message(),
            cleared_message: default_cleared_message(),
            input_placeholder: default_input_placeholder(),
            input_max_height: default_input_max_height(),
            property_url_prefix: default_property_url_prefix(),
        }
    }
}

/// Tuning for search-box autocomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a lookup is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed query length (in characters) worth looking up.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_chars() -> usize {
    2
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.csrf_cookie_name, "csrftoken");
        assert_eq!(config.seller_path_prefix, "/seller");
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.min_query_chars, 2);
        assert_eq!(config.widget.input_max_height, 100);
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
base_url = "https://propkart.example"
request_timeout_secs = 10

[widget]
title = "Helper"
input_max_height = 160

[search]
debounce_ms = 150
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url, "https://propkart.example");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.widget.title, "Helper");
        assert_eq!(config.widget.input_max_height, 160);
        // Untouched fields keep their defaults.
        assert_eq!(config.widget.property_url_prefix, "/property/");
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.min_query_chars, 2);
    }
}
