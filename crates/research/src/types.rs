//! Shared value types: chat messages, model responses, research findings,
//! and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CategoryName;

// ---------------------------------------------------------------------------
// Chat messages
// ---------------------------------------------------------------------------

/// Role tag of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged entry of a model request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Creates a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates a system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------

/// A structured model response.
///
/// `content` is `None` when the API answered successfully but without any
/// text (e.g. a null `content` field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub content: Option<String>,
}

impl ModelResponse {
    /// Creates a response carrying `content`.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// Returns the content if it is present and not blank.
    pub fn usable_content(&self) -> Option<&str> {
        self.content
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Research findings
// ---------------------------------------------------------------------------

/// The result of applying one category's prompt to the research model.
///
/// Created once per successful response and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchFinding {
    /// Category the prompt was built from.
    pub category: CategoryName,
    /// The fully substituted prompt that was sent.
    pub prompt: String,
    /// Raw model output.
    pub findings: String,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_is_not_usable() {
        assert_eq!(ModelResponse::default().usable_content(), None);
        assert_eq!(ModelResponse::text("  \n").usable_content(), None);
        assert_eq!(ModelResponse::text("insight").usable_content(), Some("insight"));
    }

    #[test]
    fn chat_role_serialises_lowercase() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn finding_uses_flat_field_names() {
        let finding = ResearchFinding {
            category: CategoryName::new("cultural_context").unwrap(),
            prompt: "p".into(),
            findings: "f".into(),
        };
        assert_eq!(
            serde_json::to_value(&finding).unwrap(),
            serde_json::json!({"category": "cultural_context", "prompt": "p", "findings": "f"})
        );
    }
}
