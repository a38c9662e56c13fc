use conduit_types::RawEvent;

use crate::text::derive_text;
use crate::traits::DialectParser;

use super::normalize::translate;
use super::schema::ClaudeLine;

pub struct ClaudeParser;

impl DialectParser for ClaudeParser {
    fn id(&self) -> &'static str {
        "claude"
    }

    fn parse_line(&self, line: &[u8]) -> Vec<RawEvent> {
        let value: serde_json::Value = match serde_json::from_slice(line) {
            Ok(v) => v,
            Err(e) => return vec![RawEvent::error(Some(line.to_vec()), e.to_string())],
        };

        match serde_json::from_value::<ClaudeLine>(value) {
            Ok(parsed) => {
                let canonical = translate(parsed);
                let text = derive_text(&canonical);
                vec![RawEvent::parsed(Some(line.to_vec()), canonical, text)]
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
    fn init_event_carries_session_id_and_model() {
        let line = br#"{"type":"system","subtype":"init","session_id":"abc","model":"m1"}"#;
        let events = ClaudeParser.parse_line(line);
        assert_eq!(events.len(), 1);
        let ev = &events[0];
        assert!(!ev.is_error());
        assert_eq!(ev.parsed.kind, EventKind::System);
        assert_eq!(ev.parsed.session_id, "abc");
        assert_eq!(ev.parsed.model.as_deref(), Some("m1"));
        assert!(ev.parsed.is_init());
    }

    #[test]
    fn assistant_text_round_trips_into_accumulated_text() {
        let line = br#"{"type":"assistant","message":{"content":[{"type":"text","text":"Hello, world!"}]}}"#;
        let events = ClaudeParser.parse_line(line);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text.as_deref(), Some("Hello, world!"));
    }

    #[test]
    fn result_event_carries_cost_and_turns() {
        let line = br#"{"type":"result","subtype":"success","result":"Hello, world!","total_cost_usd":0.08,"num_turns":3,"duration_ms":141000}"#;
        let events = ClaudeParser.parse_line(line);
        let fields = events[0].parsed.result_fields.as_ref().unwrap();
        assert_eq!(fields.result_text.as_deref(), Some("Hello, world!"));
        assert_eq!(fields.total_cost_usd, Some(0.08));
        assert_eq!(fields.num_turns, Some(3));
        assert_eq!(fields.duration_ms, Some(141000));
    }

    #[test]
    fn malformed_json_yields_error_event_with_raw_preserved() {
        let line = b"{not json";
        let events = ClaudeParser.parse_line(line);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_error());
        assert_eq!(events[0].raw_bytes.as_deref(), Some(&line[..]));
    }

    #[test]
    fn unrecognized_type_preserves_raw_without_error() {
        let line = br#"{"type":"file_history_snapshot","messageId":"x"}"#;
        let events = ClaudeParser.parse_line(line);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_unknown_event());
        assert!(events[0].raw_bytes.is_some());
    }

    #[test]
    fn tool_result_with_array_content_extracts_concatenated_text() {
        let line = br#"{"type":"user","message":{"content":[{"type":"tool_result","tool_use_id":"t1","content":[{"type":"text","text":"a"},{"type":"text","text":"b"}]}]}}"#;
        let events = ClaudeParser.parse_line(line);
        let message = events[0].parsed.message.as_ref().unwrap();
        assert!(message.has_tool_result());
        if let conduit_types::ContentBlock::ToolResult { content, .. } = &message.content[0] {
            assert_eq!(content.extract_text(), "ab");
        } else {
            panic!("expected tool_result block");
        }
    }
}
