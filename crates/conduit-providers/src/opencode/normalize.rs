use conduit_types::{CanonicalEvent, ContentBlock, EventKind, Message, ResultFields, ToolResultContent, Usage};

use super::schema::{OpencodeError, OpencodeLine, OpencodeTokens, OpencodeToolState};

/// `tool_use` is the only opencode variant that yields two canonical events
/// (opencode only reports a tool call once it has completed).
pub(super) fn translate(line: OpencodeLine) -> Vec<CanonicalEvent> {
    match line {
        OpencodeLine::StepStart { session_id } => vec![CanonicalEvent {
            kind: EventKind::System,
            subkind: Some("init".to_string()),
            session_id: session_id.unwrap_or_default(),
            ..Default::default()
        }],
        OpencodeLine::StepFinish { tokens, cost } => vec![translate_step_finish(tokens, cost)],
        OpencodeLine::Text { text } => vec![CanonicalEvent {
            kind: EventKind::Assistant,
            message: Some(Message::new(vec![ContentBlock::Text { text }])),
            ..Default::default()
        }],
        OpencodeLine::Reasoning { text } => vec![CanonicalEvent {
            kind: EventKind::Assistant,
            message: Some(Message::new(vec![ContentBlock::Thinking { text }])),
            ..Default::default()
        }],
        OpencodeLine::ToolUse { id, name, input, state } => translate_tool_use(id, name, input, state),
        OpencodeLine::Error { error } => vec![translate_error(error)],
    }
}

fn translate_step_finish(tokens: Option<OpencodeTokens>, cost: Option<f64>) -> CanonicalEvent {
    let usage = tokens.map(|t| Usage {
        input_tokens: t.input,
        output_tokens: t.output,
        cache_read_input_tokens: t.cache.as_ref().map(|c| c.read).unwrap_or_default(),
        cache_creation_input_tokens: t.cache.as_ref().map(|c| c.write).unwrap_or_default(),
    });
    CanonicalEvent {
        kind: EventKind::Result,
        subkind: Some("success".to_string()),
        result_fields: Some(ResultFields {
            is_error: false,
            total_cost_usd: cost,
            usage,
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn translate_tool_use(
    id: String,
    name: String,
    input: serde_json::Value,
    state: OpencodeToolState,
) -> Vec<CanonicalEvent> {
    let is_error = state.status.as_deref() == Some("error");
    let content = state.output.unwrap_or_else(|| ToolResultContent::Text(String::new()));

    vec![
        CanonicalEvent {
            kind: EventKind::Assistant,
            message: Some(Message::new(vec![ContentBlock::ToolUse { id: id.clone(), name: name.clone(), input }])),
            ..Default::default()
        },
        CanonicalEvent {
            kind: EventKind::User,
            message: Some(Message::new(vec![ContentBlock::ToolResult {
                tool_use_id: id,
                content,
                is_error,
                name: Some(name),
            }])),
            ..Default::default()
        },
    ]
}

fn translate_error(error: Option<OpencodeError>) -> CanonicalEvent {
    let message = error.and_then(|e| e.data.and_then(|d| d.message).or(e.name));
    CanonicalEvent {
        kind: EventKind::Result,
        subkind: Some("error_during_execution".to_string()),
        result_fields: Some(ResultFields {
            is_error: true,
            result_text: message,
            ..Default::default()
        }),
        ..Default::default()
    }
}
