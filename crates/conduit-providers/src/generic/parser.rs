use conduit_types::RawEvent;

use crate::traits::DialectParser;

/// No per-provider vocabulary is defined for a generic agent CLI; every
/// line is preserved raw and emitted as an unrecognized event so the
/// recorder keeps full fidelity even though nothing downstream can
/// interpret tool boundaries or session init for it.
pub struct GenericParser;

impl DialectParser for GenericParser {
    fn id(&self) -> &'static str {
        "generic"
    }

    fn parse_line(&self, line: &[u8]) -> Vec<RawEvent> {
        vec![RawEvent::unknown(line.to_vec())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_line_is_preserved_raw_and_unrecognized() {
        let events = GenericParser.parse_line(br#"{"anything":"at all"}"#);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_unknown_event());
        assert!(events[0].raw_bytes.is_some());
    }

    #[test]
    fn non_json_lines_are_also_preserved_without_error() {
        let events = GenericParser.parse_line(b"plain text output, not NDJSON");
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_error());
        assert!(events[0].is_unknown_event());
    }
}
