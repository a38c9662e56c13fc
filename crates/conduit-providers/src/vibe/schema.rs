use conduit_types::ToolResultContent;
use serde::Deserialize;
use serde_json::Value;

/// Vibe's wire format is a flat line-oriented `LLMMessage`, discriminated by
/// `role` rather than a `type` tag.
#[derive(Debug, Deserialize)]
pub(super) struct VibeLine {
    pub role: String,
    #[serde(default)]
    pub content: Option<ToolResultContent>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<VibeToolCall>>,
    #[serde(default)]
    pub tool_call_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VibeToolCall {
    pub id: String,
    pub name: String,
    #[serde(default = "default_arguments")]
    pub arguments: Value,
}

fn default_arguments() -> Value {
    Value::Object(Default::default())
}
