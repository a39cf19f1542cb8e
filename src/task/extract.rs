//! Content extraction from chat-completion payloads.
//!
//! Providers do not agree on where the answer text lives, so the payload is
//! matched against an ordered list of shape detectors. The first detector
//! that recognises the payload wins; the last one always matches.

use serde_json::Value;

/// Which envelope shape the answer text was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    /// `choices[0].message` is itself a string
    MessageString,
    /// `choices[0].message.content` is a string (OpenAI style)
    MessageContent,
    /// `choices[0].message.content` is an array of parts
    MessageContentParts,
    /// top-level `output` array
    OutputArray,
    /// `choices[0].text` (legacy completions)
    ChoiceText,
    /// nothing recognised; the whole payload as JSON text
    WholePayload,
}

type Detector = fn(&Value) -> Option<String>;

const DETECTORS: &[(ContentShape, Detector)] = &[
    (ContentShape::MessageString, message_string),
    (ContentShape::MessageContent, message_content),
    (ContentShape::MessageContentParts, message_content_parts),
    (ContentShape::OutputArray, output_array),
    (ContentShape::ChoiceText, choice_text),
    (ContentShape::WholePayload, whole_payload),
];

/// Locate the model's answer text inside `payload`.
pub fn extract_content(payload: &Value) -> (ContentShape, String) {
    for (shape, detect) in DETECTORS {
        if let Some(content) = detect(payload) {
            return (*shape, content);
        }
    }
    (ContentShape::WholePayload, payload.to_string())
}

fn first_choice(payload: &Value) -> Option<&Value> {
    payload.get("choices")?.as_array()?.first()
}

/// Strings are taken verbatim, null contributes nothing, anything else is
/// rendered as JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn message_string(payload: &Value) -> Option<String> {
    first_choice(payload)?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

fn message_content(payload: &Value) -> Option<String> {
    first_choice(payload)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

fn message_content_parts(payload: &Value) -> Option<String> {
    let parts = first_choice(payload)?
        .get("message")?
        .get("content")?
        .as_array()?;
    Some(
        parts
            .iter()
            .map(|part| match part.get("text") {
                Some(text) if !text.is_null() => value_text(text),
                _ => value_text(part),
            })
            .collect(),
    )
}

fn output_array(payload: &Value) -> Option<String> {
    let items = payload.get("output")?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item.get("content") {
                Some(content) if !content.is_null() => value_text(content),
                _ => item.to_string(),
            })
            .collect(),
    )
}

fn choice_text(payload: &Value) -> Option<String> {
    first_choice(payload)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

fn whole_payload(payload: &Value) -> Option<String> {
    Some(payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_openai_message_content() {
        let payload = json!({
            "choices": [{ "message": { "role": "assistant", "content": "[1, 2]" } }]
        });
        assert_eq!(
            extract_content(&payload),
            (ContentShape::MessageContent, "[1, 2]".to_string())
        );
    }

    #[test]
    fn test_message_as_plain_string() {
        let payload = json!({ "choices": [{ "message": "[]" }] });
        assert_eq!(
            extract_content(&payload),
            (ContentShape::MessageString, "[]".to_string())
        );
    }

    #[test]
    fn test_message_content_parts_are_joined() {
        let payload = json!({
            "choices": [{
                "message": {
                    "content": [
                        { "type": "text", "text": "[{\"task_number\":" },
                        " 1}",
                        { "type": "text", "text": "]" }
                    ]
                }
            }]
        });
        assert_eq!(
            extract_content(&payload),
            (
                ContentShape::MessageContentParts,
                "[{\"task_number\": 1}]".to_string()
            )
        );
    }

    #[test]
    fn test_output_array_is_joined() {
        let payload = json!({
            "output": [
                { "content": "[{\"a\":" },
                { "content": "1}]" },
                { "id": 7 }
            ]
        });
        assert_eq!(
            extract_content(&payload),
            (
                ContentShape::OutputArray,
                "[{\"a\":1}]{\"id\":7}".to_string()
            )
        );
    }

    #[test]
    fn test_choice_text_when_no_message() {
        let payload = json!({ "choices": [{ "text": "legacy" }] });
        assert_eq!(
            extract_content(&payload),
            (ContentShape::ChoiceText, "legacy".to_string())
        );
    }

    #[test]
    fn test_message_wins_over_output() {
        let payload = json!({
            "choices": [{ "message": { "content": "from choices" } }],
            "output": [{ "content": "from output" }]
        });
        assert_eq!(extract_content(&payload).1, "from choices");
    }

    #[test]
    fn test_unrecognised_payload_is_stringified() {
        let payload = json!({ "id": "gen-1", "choices": [] });
        let (shape, content) = extract_content(&payload);
        assert_eq!(shape, ContentShape::WholePayload);
        assert_eq!(serde_json::from_str::<Value>(&content).unwrap(), payload);
    }
}
