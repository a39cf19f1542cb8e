//! Upstream prompt construction.

use std::fmt;

use serde::Deserialize;
use serde_json::Number;

/// Number of tasks requested when the client does not say.
pub const DEFAULT_DEPTH: i64 = 5;

/// Requested task count, kept as the JSON number the client sent.
///
/// Any number is passed through to the prompt; integral values render
/// without a fractional part (`3.0` becomes `3`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Depth(Number);

impl Depth {
    pub fn new(depth: i64) -> Self {
        Depth(Number::from(depth))
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::new(DEFAULT_DEPTH)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_i64() || self.0.is_u64() {
            return write!(f, "{}", self.0);
        }
        match self.0.as_f64() {
            Some(value) if value.is_finite() && value.fract() == 0.0 => write!(f, "{:.0}", value),
            _ => write!(f, "{}", self.0),
        }
    }
}

/// Build the user message asking the model for `depth` tasks toward `goal`.
pub fn build_prompt(goal: &str, depth: &Depth) -> String {
    format!(
        "Generate a list of {depth} tasks to accomplish the following goal: {goal}. \
         Only return a JSON list of these steps in the format \
         [ {{ \"task_number\": 1, \"task_title\": \"Title of the task\", \
         \"task_description\": \"A detailed description of the task\" }}, ... ]"
    )
}
