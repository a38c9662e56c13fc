use conduit_types::ToolResultContent;
use serde::Deserialize;
use serde_json::Value;

/// Wire shapes for the opencode NDJSON dialect.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum OpencodeLine {
    StepStart {
        #[serde(default, rename = "sessionID")]
        session_id: Option<String>,
    },
    StepFinish {
        #[serde(default)]
        tokens: Option<OpencodeTokens>,
        #[serde(default)]
        cost: Option<f64>,
    },
    Text {
        #[serde(default)]
        text: String,
    },
    Reasoning {
        #[serde(default)]
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default = "default_input")]
        input: Value,
        #[serde(default)]
        state: OpencodeToolState,
    },
    Error {
        #[serde(default)]
        error: Option<OpencodeError>,
    },
}

fn default_input() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct OpencodeTokens {
    #[serde(default)]
    pub input: u64,
    #[serde(default)]
    pub output: u64,
    #[serde(default)]
    pub cache: Option<OpencodeCache>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OpencodeCache {
    #[serde(default)]
    pub read: u64,
    #[serde(default)]
    pub write: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct OpencodeToolState {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Option<ToolResultContent>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OpencodeError {
    #[serde(default)]
    pub data: Option<OpencodeErrorData>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OpencodeErrorData {
    #[serde(default)]
    pub message: Option<String>,
}
