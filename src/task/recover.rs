//! Lenient JSON recovery for model replies.
//!
//! Models wrap JSON in Markdown fences, surround it with prose, or emit
//! Python-style single quotes. Recovery strips fences, slices out the
//! outermost `[...]`, then tries a strict parse followed by one rewrite pass.
//!
//! The rewrite replaces every `'` with `"`, which also mangles apostrophes
//! inside otherwise valid text. It only runs after a strict parse has failed.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecoverError {
    #[error("Failed to parse JSON from assistant response")]
    Unparseable,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```(?:json)?\n?").expect("fence pattern is valid"))
}

/// Remove Markdown code-fence markers (```` ``` ```` and ```` ```json ````).
fn strip_code_fences(text: &str) -> String {
    fence_regex().replace_all(text, "").into_owned()
}

/// Slice from the first `[` to the last `]`, inclusive.
fn extract_first_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Recover a JSON value from free-form assistant text.
pub fn parse_assistant_json(text: &str) -> Result<Value, RecoverError> {
    let cleaned = strip_code_fences(text);
    let cleaned = cleaned.trim();
    let candidate = extract_first_json_array(cleaned).unwrap_or(cleaned);

    if let Ok(value) = serde_json::from_str(candidate) {
        return Ok(value);
    }

    let rewritten = candidate.replace('\n', " ").replace('\'', "\"");
    serde_json::from_str(&rewritten).map_err(|e| {
        tracing::debug!("Lenient JSON recovery failed: {}", e);
        RecoverError::Unparseable
    })
}
