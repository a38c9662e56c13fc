use serde::{Deserialize, Serialize};

use crate::content_block::ContentBlock;

/// Discriminant for `CanonicalEvent`. `Unknown` covers the case where the
/// line was valid JSON but of a dialect-specific type no parser
/// recognizes; the raw line is still preserved by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    System,
    Assistant,
    User,
    Result,
    Error,
    ContentBlockStart,
    ContentBlockDelta,
    ContentBlockStop,
    #[default]
    Unknown,
}

impl EventKind {
    pub fn is_unknown(&self) -> bool {
        matches!(self, EventKind::Unknown)
    }
}

/// An ordered sequence of content blocks, attached to `assistant`/`user`
/// canonical events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn new(content: Vec<ContentBlock>) -> Self {
        Self { content }
    }

    pub fn has_tool_use(&self) -> bool {
        self.content.iter().any(ContentBlock::is_tool_use)
    }

    pub fn has_tool_result(&self) -> bool {
        self.content.iter().any(ContentBlock::is_tool_result)
    }

    /// Concatenation of every `text`/`thinking` block's text, in order.
    pub fn concatenated_text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::text)
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Streaming delta carried by a `content_block_delta` event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Delta {
    #[serde(rename = "type")]
    pub delta_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_json: Option<String>,
}

impl Delta {
    pub fn text_delta(text: impl Into<String>) -> Self {
        Self {
            delta_type: "text_delta".to_string(),
            text: Some(text.into()),
            partial_json: None,
        }
    }

    pub fn is_text_delta(&self) -> bool {
        self.delta_type == "text_delta"
    }
}

/// Token accounting normalized across providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
}

/// Fields carried by a `result` canonical event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultFields {
    #[serde(default)]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_turns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// The single normalized event type produced by every provider parser; the
/// only type crossing the core/renderer boundary.
///
/// Which optional fields are populated depends on `kind`/`subkind`; see the
/// per-kind notes on each field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CanonicalEvent {
    pub kind: EventKind,

    /// For `system` ∈ {"init", ...}; for `result` ∈ {"success",
    /// "error_during_execution", "error_max_turns", "error_max_budget_usd", ...}.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subkind: Option<String>,

    /// Non-empty only on `system/init`; the provider-issued session id.
    #[serde(default)]
    pub session_id: String,

    /// Model name, `system/init` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// Single block, for `content_block_start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_block: Option<ContentBlock>,

    /// For `content_block_delta`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,

    /// For `result`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_fields: Option<ResultFields>,

    /// For `error`: a human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CanonicalEvent {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_init(&self) -> bool {
        self.kind == EventKind::System && self.subkind.as_deref() == Some("init") && !self.session_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_event_has_empty_kind_marker() {
        let ev = CanonicalEvent::unknown();
        assert!(ev.kind.is_unknown());
        assert!(!ev.is_init());
    }

    #[test]
    fn is_init_requires_session_id() {
        let mut ev = CanonicalEvent {
            kind: EventKind::System,
            subkind: Some("init".to_string()),
            ..Default::default()
        };
        assert!(!ev.is_init());
        ev.session_id = "abc".to_string();
        assert!(ev.is_init());
    }
}
