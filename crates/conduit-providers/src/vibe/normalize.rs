use conduit_types::{CanonicalEvent, ContentBlock, EventKind, Message};

use super::schema::VibeLine;

/// An assistant line may translate to two events: a `thinking` event (when
/// `reasoning_content` is non-empty) followed by the assistant event itself.
/// `user`/`system` lines are skipped here; the caller still preserves the
/// raw line via an unknown event.
pub(super) fn translate(line: VibeLine) -> Vec<CanonicalEvent> {
    match line.role.as_str() {
        "assistant" => translate_assistant(line),
        "tool" => vec![translate_tool(line)],
        _ => Vec::new(),
    }
}

fn translate_assistant(line: VibeLine) -> Vec<CanonicalEvent> {
    let mut out = Vec::new();

    if let Some(reasoning) = line.reasoning_content.filter(|s| !s.is_empty()) {
        out.push(CanonicalEvent {
            kind: EventKind::Assistant,
            message: Some(Message::new(vec![ContentBlock::Thinking { text: reasoning }])),
            ..Default::default()
        });
    }

    let mut blocks = Vec::new();
    if let Some(text) = line.content.as_ref().map(|c| c.extract_text()).filter(|s| !s.is_empty()) {
        blocks.push(ContentBlock::Text { text });
    }
    for call in line.tool_calls.unwrap_or_default() {
        blocks.push(ContentBlock::ToolUse {
            id: call.id,
            name: call.name,
            input: call.arguments,
        });
    }

    if !blocks.is_empty() {
        out.push(CanonicalEvent {
            kind: EventKind::Assistant,
            message: Some(Message::new(blocks)),
            ..Default::default()
        });
    }

    out
}

fn translate_tool(line: VibeLine) -> CanonicalEvent {
    CanonicalEvent {
        kind: EventKind::User,
        message: Some(Message::new(vec![ContentBlock::ToolResult {
            tool_use_id: line.tool_call_id.unwrap_or_default(),
            content: line.content.unwrap_or_else(|| conduit_types::ToolResultContent::Text(String::new())),
            is_error: false,
            name: line.name,
        }])),
        ..Default::default()
    }
}
