use serde::Deserialize;
use serde_json::Value;

/// Wire shapes for the codex NDJSON dialect.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(super) enum CodexLine {
    #[serde(rename = "thread.started")]
    ThreadStarted {
        thread_id: String,
    },
    #[serde(rename = "turn.completed")]
    TurnCompleted {
        #[serde(default)]
        usage: Option<CodexUsage>,
    },
    #[serde(rename = "turn.failed")]
    TurnFailed {
        #[serde(default)]
        error: Option<CodexError>,
    },
    #[serde(rename = "item.started")]
    ItemStarted { item: CodexItem },
    #[serde(rename = "item.updated")]
    ItemUpdated { item: CodexItem },
    #[serde(rename = "item.completed")]
    ItemCompleted { item: CodexItem },
}

#[derive(Debug, Deserialize)]
pub(super) struct CodexUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cached_input_tokens: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct CodexError {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum CodexItem {
    AgentMessage {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        text: String,
    },
    Reasoning {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        text: String,
    },
    CommandExecution {
        id: String,
        #[serde(default)]
        command: Option<String>,
        #[serde(default)]
        aggregated_output: Option<String>,
        #[serde(default)]
        exit_code: Option<i32>,
        #[serde(default)]
        status: Option<String>,
    },
    McpToolCall {
        id: String,
        #[serde(default)]
        server: Option<String>,
        #[serde(default)]
        tool: Option<String>,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        output: Option<Value>,
    },
    FileChange {
        id: String,
        #[serde(default)]
        changes: Option<Vec<Value>>,
    },
    TodoList {
        id: String,
        #[serde(default)]
        items: Option<Vec<CodexTodoItem>>,
    },
    WebSearch {
        id: String,
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        results: Option<Value>,
    },
}

#[derive(Debug, Deserialize)]
pub(super) struct CodexTodoItem {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}
