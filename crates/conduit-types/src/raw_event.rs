use crate::event::CanonicalEvent;

/// The channel-carried item produced by every provider parser and consumed
/// by the stream loop.
///
/// Invariants:
/// - If `err` is `Some`, `parsed` is the zero value (`CanonicalEvent::unknown()`).
/// - If `parsed.kind` is `Unknown` and `err` is `None`, the line was valid
///   JSON of an unrecognized dialect-specific type; `raw_bytes` must still
///   be set so the recorder keeps full fidelity.
/// - `parsed.kind != Unknown` and `raw_bytes.is_some()` may both hold; the
///   first occurrence of a given input line carries the raw bytes (a
///   multi-event translation, e.g. opencode's `tool_use` expansion, attaches
///   them only to the first of the two emitted events).
#[derive(Debug, Clone, Default)]
pub struct RawEvent {
    pub raw_bytes: Option<Vec<u8>>,
    pub parsed: CanonicalEvent,
    pub err: Option<String>,
    pub turn_id: Option<String>,
    /// Best-effort plain-text rendering of `parsed`, populated by the
    /// parser at construction time so sink consumers don't need to
    /// re-derive it from content blocks. `None` when the event carries no
    /// natural text (e.g. `content_block_stop`).
    pub text: Option<String>,
}

impl RawEvent {
    pub fn error(raw_bytes: Option<Vec<u8>>, err: impl Into<String>) -> Self {
        Self {
            raw_bytes,
            parsed: CanonicalEvent::unknown(),
            err: Some(err.into()),
            turn_id: None,
            text: None,
        }
    }

    pub fn unknown(raw_bytes: Vec<u8>) -> Self {
        Self {
            raw_bytes: Some(raw_bytes),
            parsed: CanonicalEvent::unknown(),
            err: None,
            turn_id: None,
            text: None,
        }
    }

    pub fn parsed(raw_bytes: Option<Vec<u8>>, parsed: CanonicalEvent, text: Option<String>) -> Self {
        Self {
            raw_bytes,
            parsed,
            err: None,
            turn_id: None,
            text,
        }
    }

    pub fn with_turn_id(mut self, turn_id: Option<String>) -> Self {
        self.turn_id = turn_id;
        self
    }

    pub fn is_error(&self) -> bool {
        self.err.is_some()
    }

    pub fn is_unknown_event(&self) -> bool {
        self.err.is_none() && self.parsed.kind.is_unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_event_carries_zero_value_parsed() {
        let ev = RawEvent::error(Some(b"garbage".to_vec()), "bad json");
        assert!(ev.is_error());
        assert!(ev.parsed.kind.is_unknown());
    }

    #[test]
    fn unknown_event_preserves_raw_line() {
        let ev = RawEvent::unknown(b"{\"type\":\"something_new\"}".to_vec());
        assert!(ev.is_unknown_event());
        assert!(ev.raw_bytes.is_some());
    }
}
