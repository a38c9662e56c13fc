use serde::Deserialize;
use serde_json::Value;

/// Wire shapes for the gemini NDJSON dialect.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum GeminiLine {
    Init {
        #[serde(default)]
        session_id: Option<String>,
        #[serde(default)]
        model: Option<String>,
    },
    Message {
        #[serde(default)]
        delta: bool,
        #[serde(default)]
        role: Option<String>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        thought: bool,
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
        #[serde(default)]
        name: Option<String>,
    },
    Result {
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        duration_ms: Option<u64>,
        #[serde(default)]
        input_tokens: Option<u64>,
        #[serde(default)]
        output_tokens: Option<u64>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

fn default_input() -> Value {
    Value::Object(Default::default())
}
