//! JSON shapes exchanged with the chat and listing endpoints.
//!
//! Every response field is defaulted: the server answers failures with bodies
//! like `{"error": "Authentication required"}` that omit `success` entirely,
//! and those must still decode so the error text can be shown.

use serde::{Deserialize, Deserializer, Serialize};

use crate::chat::{ChatMessage, MessageRole, PropertyId, SessionId};

/// Fallback text when a failed response carries no `error` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Body of `POST /api/chat/ask/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// Response of `POST /api/chat/ask/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub referenced_properties: Vec<PropertyId>,
    /// Number of listings the server matched for this answer.
    #[serde(default)]
    pub properties_found: Option<u32>,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `POST /api/chat/clear/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One stored message in `GET /api/chat/history/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub role: MessageRole,
    pub content: String,
    /// ISO-8601 creation time as sent by the server; kept verbatim.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub referenced_properties: Vec<PropertyId>,
}

impl HistoryMessage {
    /// Rebuild the display message. Display timestamps are taken at render
    /// time, so the stored `created_at` is not used here.
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::new(self.role, self.content.clone())
            .with_references(self.referenced_properties.clone())
    }
}

/// Response of `GET /api/chat/history/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<HistoryMessage>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `GET /api/property/{id}/views/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsResponse {
    pub views: u64,
}

/// Response of `GET /api/search/suggestions/?q=`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggestions: Vec<String>,
}

/// Treats an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Server-provided error text of a failed response.
pub fn error_text(error: Option<&str>) -> &str {
    error.filter(|e| !e.is_empty()).unwrap_or(UNKNOWN_ERROR)
}
