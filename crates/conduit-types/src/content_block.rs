use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single block inside an assistant or user message.
///
/// Invariants:
/// - `ToolUse` always has a non-empty `name` and a stable `id`; `input`
///   defaults to an empty object when the dialect omits it.
/// - `ToolResult.tool_use_id` matches a prior `ToolUse.id` within the same
///   session.
/// - `Text`/`Thinking` are distinguishable so renderers can style them
///   differently; `Thinking` is informational only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Thinking {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default = "default_input")]
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: ToolResultContent,
        #[serde(default)]
        is_error: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

fn default_input() -> Value {
    Value::Object(Default::default())
}

impl ContentBlock {
    pub fn is_tool_use(&self) -> bool {
        matches!(self, ContentBlock::ToolUse { .. })
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, ContentBlock::ToolResult { .. })
    }

    /// Best-effort plain text for this block, used by the text accumulator
    /// and the renderer. Tool blocks yield `None` here; callers that need a
    /// tool summary use the block's own fields directly.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } | ContentBlock::Thinking { text } => Some(text),
            _ => None,
        }
    }
}

/// Tolerant payload carried by a `tool_result` block.
///
/// A provider may report this as a JSON string, an array of `{type:"text",
/// text}` blocks, or arbitrary JSON. `extract_text` collapses all three
/// shapes into a single string without ever failing: the fallback case
/// stringifies the raw value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ToolResultContent {
    Text(String),
    Blocks(Vec<TextBlock>),
    Other(Value),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextBlock {
    #[serde(rename = "type", default)]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
}

impl ToolResultContent {
    /// Tolerant text extraction: string as-is, array-of-blocks concatenated,
    /// anything else falls back to its raw JSON/string representation.
    pub fn extract_text(&self) -> String {
        match self {
            ToolResultContent::Text(s) => s.clone(),
            ToolResultContent::Blocks(blocks) => blocks
                .iter()
                .map(|b| b.text.as_str())
                .collect::<Vec<_>>()
                .join(""),
            ToolResultContent::Other(value) => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_use_defaults_input_to_empty_object() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"type":"tool_use","id":"t1","name":"Bash"}"#).unwrap();
        match block {
            ContentBlock::ToolUse { input, .. } => assert_eq!(input, Value::Object(Default::default())),
            _ => panic!("expected tool_use"),
        }
    }

    #[test]
    fn tool_result_extracts_string_content() {
        let content = ToolResultContent::Text("hello".to_string());
        assert_eq!(content.extract_text(), "hello");
    }

    #[test]
    fn tool_result_extracts_array_of_blocks() {
        let content = ToolResultContent::Blocks(vec![
            TextBlock { block_type: "text".into(), text: "a".into() },
            TextBlock { block_type: "text".into(), text: "b".into() },
        ]);
        assert_eq!(content.extract_text(), "ab");
    }

    #[test]
    fn tool_result_falls_back_to_raw_json() {
        let content = ToolResultContent::Other(serde_json::json!({"code": 1}));
        assert_eq!(content.extract_text(), r#"{"code":1}"#);
    }

    #[test]
    fn tool_result_content_is_tolerant_to_whatever_shape_arrives() {
        // A bare JSON number: not a string, not an array of blocks.
        let content: ToolResultContent = serde_json::from_str("42").unwrap();
        assert_eq!(content.extract_text(), "42");
    }
}
