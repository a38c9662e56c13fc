use conduit_types::RawEvent;

use crate::text::derive_text;
use crate::traits::DialectParser;

use super::normalize::translate;
use super::schema::VibeLine;

pub struct VibeParser;

impl DialectParser for VibeParser {
    fn id(&self) -> &'static str {
        "vibe"
    }

    fn parse_line(&self, line: &[u8]) -> Vec<RawEvent> {
        let value: serde_json::Value = match serde_json::from_slice(line) {
            Ok(v) => v,
            Err(e) => return vec![RawEvent::error(Some(line.to_vec()), e.to_string())],
        };

        match serde_json::from_value::<VibeLine>(value) {
            Ok(parsed) => {
                let events = translate(parsed);
                if events.is_empty() {
                    // role ∈ {user, system}, or a role we don't translate: skipped
                    // but still preserved for the recorder.
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
