use conduit_types::{CanonicalEvent, ContentBlock, EventKind, Message, ResultFields, Usage};

use super::schema::{ClaudeBlock, ClaudeLine, ClaudeMessage, ClaudeUsage};

pub(super) fn translate(line: ClaudeLine) -> CanonicalEvent {
    match line {
        ClaudeLine::System { subtype, session_id, model } => CanonicalEvent {
            kind: EventKind::System,
            subkind: subtype,
            session_id: session_id.unwrap_or_default(),
            model,
            ..Default::default()
        },
        ClaudeLine::Assistant { message } => CanonicalEvent {
            kind: EventKind::Assistant,
            message: Some(translate_message(message)),
            ..Default::default()
        },
        ClaudeLine::User { message } => CanonicalEvent {
            kind: EventKind::User,
            message: Some(translate_message(message)),
            ..Default::default()
        },
        ClaudeLine::Result {
            subtype,
            is_error,
            result,
            total_cost_usd,
            num_turns,
            duration_ms,
            usage,
        } => CanonicalEvent {
            kind: EventKind::Result,
            subkind: subtype,
            result_fields: Some(ResultFields {
                is_error,
                num_turns,
                duration_ms,
                total_cost_usd,
                result_text: result,
                usage: usage.map(translate_usage),
            }),
            ..Default::default()
        },
        ClaudeLine::Error { message } => CanonicalEvent {
            kind: EventKind::Error,
            error_message: message,
            ..Default::default()
        },
    }
}

fn translate_message(message: ClaudeMessage) -> Message {
    Message::new(message.content.into_iter().map(translate_block).collect())
}

fn translate_block(block: ClaudeBlock) -> ContentBlock {
    match block {
        ClaudeBlock::Text { text } => ContentBlock::Text { text },
        ClaudeBlock::Thinking { text } => ContentBlock::Thinking { text },
        ClaudeBlock::ToolUse { id, name, input } => ContentBlock::ToolUse { id, name, input },
        ClaudeBlock::ToolResult { tool_use_id, content, is_error } => ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
            name: None,
        },
    }
}

fn translate_usage(usage: ClaudeUsage) -> Usage {
    Usage {
        input_tokens: usage.input_tokens,
        output_tokens: usage.output_tokens,
        cache_read_input_tokens: usage.cache_read_input_tokens,
        cache_creation_input_tokens: usage.cache_creation_input_tokens,
    }
}
