use serde::Deserialize;
use serde_json::Value;

/// Wire shapes for the claude-native NDJSON dialect. Kept separate from the
/// canonical model, in its own `schema.rs` -> `normalize.rs` split, so a
/// wire-format change never ripples past this module.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum ClaudeLine {
    System {
        #[serde(default)]
        subtype: Option<String>,
        #[serde(default)]
        session_id: Option<String>,
        #[serde(default)]
        model: Option<String>,
    },
    Assistant {
        message: ClaudeMessage,
    },
    User {
        message: ClaudeMessage,
    },
    Result {
        #[serde(default)]
        subtype: Option<String>,
        #[serde(default)]
        is_error: bool,
        #[serde(default)]
        result: Option<String>,
        #[serde(default)]
        total_cost_usd: Option<f64>,
        #[serde(default)]
        num_turns: Option<u32>,
        #[serde(default)]
        duration_ms: Option<u64>,
        #[serde(default)]
        usage: Option<ClaudeUsage>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
pub(super) struct ClaudeMessage {
    #[serde(default)]
    pub content: Vec<ClaudeBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum ClaudeBlock {
    Text {
        text: String,
    },
    Thinking {
        #[serde(alias = "thinking")]
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default = "default_input")]
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: conduit_types::ToolResultContent,
        #[serde(default)]
        is_error: bool,
    },
}

fn default_input() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize)]
pub(super) struct ClaudeUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
}
