use conduit_types::{CanonicalEvent, ContentBlock, EventKind};

/// Deterministic "final assistant text" builder.
///
/// Downstream callers want the *concluding* assistant message, not the full
/// transcript. The accumulator is fed one canonical event at a time and
/// applies the tool-boundary reset / result-override rules verbatim; it
/// has no notion of "turns" or history beyond the current buffer.
#[derive(Debug, Default)]
pub struct TextAccumulator {
    buffer: String,
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn into_text(self) -> String {
        self.buffer
    }

    /// Apply one canonical event's effect on the buffer.
    pub fn feed(&mut self, event: &CanonicalEvent) {
        match event.kind {
            EventKind::Assistant => self.feed_assistant(event),
            EventKind::User => {
                if event.message.as_ref().is_some_and(|m| m.has_tool_result()) {
                    self.buffer.clear();
                }
            }
            EventKind::ContentBlockStart => {
                if matches!(event.content_block, Some(ContentBlock::ToolUse { .. })) {
                    self.buffer.clear();
                }
            }
            EventKind::ContentBlockDelta => {
                if let Some(delta) = &event.delta {
                    if delta.is_text_delta() {
                        if let Some(text) = &delta.text {
                            self.buffer.push_str(text);
                        }
                    }
                }
            }
            EventKind::Result => {
                if let Some(result_text) = event.result_fields.as_ref().and_then(|r| r.result_text.as_deref()) {
                    if !result_text.is_empty() {
                        self.buffer = result_text.trim().to_string();
                    }
                }
            }
            _ => {}
        }
    }

    fn feed_assistant(&mut self, event: &CanonicalEvent) {
        let Some(message) = &event.message else { return };
        let text = message.concatenated_text();

        if message.has_tool_use() {
            self.buffer.clear();
            if !text.is_empty() {
                self.buffer.push_str(&text);
            }
            return;
        }

        if text.is_empty() {
            return;
        }

        if self.buffer.is_empty() {
            self.buffer.push_str(&text);
        } else {
            self.buffer.push_str("\n\n");
            self.buffer.push_str(&text);
        }
    }
}
