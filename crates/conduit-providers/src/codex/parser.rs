use conduit_types::RawEvent;

use crate::text::derive_text;
use crate::traits::DialectParser;

use super::normalize::translate;
use super::schema::CodexLine;

pub struct CodexParser;

impl DialectParser for CodexParser {
    fn id(&self) -> &'static str {
        "codex"
    }

    fn parse_line(&self, line: &[u8]) -> Vec<RawEvent> {
        let value: serde_json::Value = match serde_json::from_slice(line) {
            Ok(v) => v,
            Err(e) => return vec![RawEvent::error(Some(line.to_vec()), e.to_string())],
        };

        match serde_json::from_value::<CodexLine>(value) {
            Ok(parsed) => {
                let events = translate(parsed);
                if events.is_empty() {
                    return vec![RawEvent::unknown(line.to_vec())];
                }
                let mut out = Vec::with_capacity(events.len());
                for (i, canonical) in events.into_iter().enumerate() {
                    let text = derive_text(&canonical);
                    let raw = if i == 0 { Some(line.to_vec()) } else { None };
                    out.push(RawEvent::parsed(raw, canonical, text));
                }
                out
            }
            Err(_) => vec![RawEvent::unknown(line.to_vec())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_types::EventKind;

    #[test]
    fn thread_started_carries_session_id() {
        let line = br#"{"type":"thread.started","thread_id":"thread-123"}"#;
        let events = CodexParser.parse_line(line);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].parsed.session_id, "thread-123");
        assert!(events[0].parsed.is_init());
    }

    #[test]
    fn command_execution_tool_boundary_matches_scenario() {
        let start = br#"{"type":"item.started","item":{"type":"command_execution","id":"item_1","command":"ls -la","status":"in_progress"}}"#;
        let start_events = CodexParser.parse_line(start);
        assert_eq!(start_events.len(), 1);
        assert!(matches!(start_events[0].parsed.kind, EventKind::Assistant));
        assert!(start_events[0].parsed.message.as_ref().unwrap().has_tool_use());

        let done = br#"{"type":"item.completed","item":{"type":"command_execution","id":"item_1","aggregated_output":"file.txt\n","exit_code":0,"status":"completed"}}"#;
        let done_events = CodexParser.parse_line(done);
        assert_eq!(done_events.len(), 1);
        let message = done_events[0].parsed.message.as_ref().unwrap();
        assert!(message.has_tool_result());
        if let conduit_types::ContentBlock::ToolResult { is_error, content, .. } = &message.content[0] {
            assert!(!is_error);
            assert_eq!(content.extract_text(), "file.txt\n");
        } else {
            panic!("expected tool_result");
        }
    }

    #[test]
    fn turn_completed_maps_cached_tokens_to_cache_read() {
        let line = br#"{"type":"turn.completed","usage":{"input_tokens":12,"output_tokens":5,"cached_input_tokens":3}}"#;
        let events = CodexParser.parse_line(line);
        let usage = events[0].parsed.result_fields.as_ref().unwrap().usage.as_ref().unwrap();
        assert_eq!(usage.input_tokens, 12);
        assert_eq!(usage.output_tokens, 5);
        assert_eq!(usage.cache_read_input_tokens, 3);
    }

    #[test]
    fn turn_failed_is_error_during_execution() {
        let line = br#"{"type":"turn.failed","error":{"message":"boom"}}"#;
        let events = CodexParser.parse_line(line);
        let fields = events[0].parsed.result_fields.as_ref().unwrap();
        assert!(fields.is_error);
        assert_eq!(fields.result_text.as_deref(), Some("boom"));
    }

    #[test]
    fn mcp_tool_call_emits_tool_use_then_tool_result() {
        let line = br#"{"type":"item.completed","item":{"type":"mcp_tool_call","id":"call_1","server":"fs","tool":"read","status":"completed","output":{"ok":true}}}"#;
        let events = CodexParser.parse_line(line);
        assert_eq!(events.len(), 2);
        assert!(events[0].raw_bytes.is_some());
        assert!(events[1].raw_bytes.is_none());
        assert!(events[0].parsed.message.as_ref().unwrap().has_tool_use());
        assert!(events[1].parsed.message.as_ref().unwrap().has_tool_result());
    }

    #[test]
    fn unrecognized_item_type_is_unknown_not_error() {
        let line = br#"{"type":"item.completed","item":{"type":"some_future_item","id":"x"}}"#;
        let events = CodexParser.parse_line(line);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_unknown_event());
        assert!(!events[0].is_error());
    }
}
