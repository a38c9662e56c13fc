use conduit_types::{CanonicalEvent, ContentBlock, Delta, EventKind, Message, ResultFields, Usage};

use super::schema::GeminiLine;

pub(super) fn translate(line: GeminiLine) -> CanonicalEvent {
    match line {
        GeminiLine::Init { session_id, model } => CanonicalEvent {
            kind: EventKind::System,
            subkind: Some("init".to_string()),
            session_id: session_id.unwrap_or_default(),
            model,
            ..Default::default()
        },
        GeminiLine::Message { delta, role, text, thought } => {
            if delta {
                CanonicalEvent {
                    kind: EventKind::ContentBlockDelta,
                    delta: Some(Delta::text_delta(text.unwrap_or_default())),
                    ..Default::default()
                }
            } else if role.as_deref() == Some("assistant") {
                let text = text.unwrap_or_default();
                let block = if thought {
                    ContentBlock::Thinking { text }
                } else {
                    ContentBlock::Text { text }
                };
                CanonicalEvent {
                    kind: EventKind::Assistant,
                    message: Some(Message::new(vec![block])),
                    ..Default::default()
                }
            } else {
                CanonicalEvent::unknown()
            }
        }
        GeminiLine::ToolUse { id, name, input } => CanonicalEvent {
            kind: EventKind::Assistant,
            message: Some(Message::new(vec![ContentBlock::ToolUse { id, name, input }])),
            ..Default::default()
        },
        GeminiLine::ToolResult { tool_use_id, content, is_error, name } => CanonicalEvent {
            kind: EventKind::User,
            message: Some(Message::new(vec![ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
                name,
            }])),
            ..Default::default()
        },
        GeminiLine::Result { status, duration_ms, input_tokens, output_tokens } => CanonicalEvent {
            kind: EventKind::Result,
            subkind: status.clone(),
            result_fields: Some(ResultFields {
                is_error: status.as_deref() == Some("error"),
                duration_ms,
                usage: Some(Usage {
                    input_tokens: input_tokens.unwrap_or_default(),
                    output_tokens: output_tokens.unwrap_or_default(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        },
        GeminiLine::Error { message } => CanonicalEvent {
            kind: EventKind::Error,
            error_message: message,
            ..Default::default()
        },
    }
}
