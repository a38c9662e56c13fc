use conduit_types::RawEvent;

use crate::text::derive_text;
use crate::traits::DialectParser;

use super::normalize::translate;
use super::schema::GeminiLine;

pub struct GeminiParser;

impl DialectParser for GeminiParser {
    fn id(&self) -> &'static str {
        "gemini"
    }

    fn parse_line(&self, line: &[u8]) -> Vec<RawEvent> {
        let value: serde_json::Value = match serde_json::from_slice(line) {
            Ok(v) => v,
            Err(e) => return vec![RawEvent::error(Some(line.to_vec()), e.to_string())],
        };

        match serde_json::from_value::<GeminiLine>(value) {
            Ok(parsed) => {
                let canonical = translate(parsed);
                let text = derive_text(&canonical);
                vec![RawEvent::parsed(Some(line.to_vec()), canonical, text)]
            }
            Err(_) => vec![RawEvent::unknown(line.to_vec())],
        }
    }
}
