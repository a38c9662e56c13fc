use conduit_types::{CanonicalEvent, ContentBlock, EventKind, Message, ResultFields, ToolResultContent, Usage};
use serde_json::Value;

use super::schema::{CodexError, CodexItem, CodexLine, CodexUsage};

/// A single codex line may translate to zero, one, or two canonical events
/// (`mcp_tool_call`/`web_search` report tool_use and tool_result together,
/// since codex only surfaces them once completed).
pub(super) fn translate(line: CodexLine) -> Vec<CanonicalEvent> {
    match line {
        CodexLine::ThreadStarted { thread_id } => vec![CanonicalEvent {
            kind: EventKind::System,
            subkind: Some("init".to_string()),
            session_id: thread_id,
            ..Default::default()
        }],
        CodexLine::TurnCompleted { usage } => vec![translate_turn_completed(usage)],
        CodexLine::TurnFailed { error } => vec![translate_turn_failed(error)],
        CodexLine::ItemStarted { item } => translate_item_started(item),
        CodexLine::ItemUpdated { .. } => Vec::new(),
        CodexLine::ItemCompleted { item } => translate_item_completed(item),
    }
}

fn translate_turn_completed(usage: Option<CodexUsage>) -> CanonicalEvent {
    CanonicalEvent {
        kind: EventKind::Result,
        subkind: Some("success".to_string()),
        result_fields: Some(ResultFields {
            is_error: false,
            usage: usage.map(|u| Usage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
                cache_read_input_tokens: u.cached_input_tokens,
                cache_creation_input_tokens: 0,
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn translate_turn_failed(error: Option<CodexError>) -> CanonicalEvent {
    CanonicalEvent {
        kind: EventKind::Result,
        subkind: Some("error_during_execution".to_string()),
        result_fields: Some(ResultFields {
            is_error: true,
            result_text: error.and_then(|e| e.message),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn translate_item_started(item: CodexItem) -> Vec<CanonicalEvent> {
    match item {
        CodexItem::CommandExecution { id, command, .. } => {
            vec![assistant_tool_use(id, "Bash", command_input(command))]
        }
        _ => Vec::new(),
    }
}

fn translate_item_completed(item: CodexItem) -> Vec<CanonicalEvent> {
    match item {
        CodexItem::AgentMessage { text, .. } => vec![assistant_text(text)],
        CodexItem::Reasoning { text, .. } => vec![assistant_thinking(text)],
        CodexItem::CommandExecution {
            id,
            aggregated_output,
            exit_code,
            status,
            ..
        } => {
            let is_error = matches!(status.as_deref(), Some("failed") | Some("declined"))
                || exit_code.map(|c| c != 0).unwrap_or(false);
            let content = aggregated_output.unwrap_or_else(|| "(no output)".to_string());
            vec![user_tool_result(id, ToolResultContent::Text(content), is_error, None)]
        }
        CodexItem::McpToolCall { id, server, tool, status, output } => {
            let name = format!(
                "{}.{}",
                server.unwrap_or_else(|| "server".to_string()),
                tool.unwrap_or_else(|| "tool".to_string())
            );
            let is_error = status.as_deref() == Some("failed");
            let content = match output {
                Some(v) => ToolResultContent::Other(v),
                None => ToolResultContent::Text(String::new()),
            };
            vec![
                assistant_tool_use(id.clone(), &name, Value::Object(Default::default())),
                user_tool_result(id, content, is_error, Some(name)),
            ]
        }
        CodexItem::FileChange { changes, .. } => {
            let count = changes.as_ref().map(|c| c.len()).unwrap_or(0);
            let summary = if count == 1 {
                "Modified 1 file.".to_string()
            } else {
                format!("Modified {} files.", count)
            };
            vec![assistant_text(summary)]
        }
        CodexItem::TodoList { items, .. } => {
            let checklist = items
                .unwrap_or_default()
                .into_iter()
                .map(|item| {
                    let mark = if item.completed { "x" } else { " " };
                    format!("- [{}] {}", mark, item.text)
                })
                .collect::<Vec<_>>()
                .join("\n");
            vec![assistant_thinking(checklist)]
        }
        CodexItem::WebSearch { id, query, status, results } => {
            let is_error = status.as_deref() == Some("failed");
            let content = match results {
                Some(v) => ToolResultContent::Other(v),
                None => ToolResultContent::Text(String::new()),
            };
            let input = query
                .map(|q| serde_json::json!({ "query": q }))
                .unwrap_or_else(|| Value::Object(Default::default()));
            vec![
                assistant_tool_use(id.clone(), "web_search", input),
                user_tool_result(id, content, is_error, Some("web_search".to_string())),
            ]
        }
    }
}

fn command_input(command: Option<String>) -> Value {
    serde_json::json!({ "command": command.unwrap_or_default() })
}

fn assistant_text(text: String) -> CanonicalEvent {
    CanonicalEvent {
        kind: EventKind::Assistant,
        message: Some(Message::new(vec![ContentBlock::Text { text }])),
        ..Default::default()
    }
}

fn assistant_thinking(text: String) -> CanonicalEvent {
    CanonicalEvent {
        kind: EventKind::Assistant,
        message: Some(Message::new(vec![ContentBlock::Thinking { text }])),
        ..Default::default()
    }
}

fn assistant_tool_use(id: String, name: &str, input: Value) -> CanonicalEvent {
    CanonicalEvent {
        kind: EventKind::Assistant,
        message: Some(Message::new(vec![ContentBlock::ToolUse {
            id,
            name: name.to_string(),
            input,
        }])),
        ..Default::default()
    }
}

fn user_tool_result(
    tool_use_id: String,
    content: ToolResultContent,
    is_error: bool,
    name: Option<String>,
) -> CanonicalEvent {
    CanonicalEvent {
        kind: EventKind::User,
        message: Some(Message::new(vec![ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
            name,
        }])),
        ..Default::default()
    }
}
