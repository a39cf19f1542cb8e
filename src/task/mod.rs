//! Task module - the generated task record and the translation between a
//! goal description and the upstream model's free-form reply.
//!
//! - `prompt`: builds the single user message sent upstream
//! - `extract`: locates the answer text inside a provider-specific envelope
//! - `recover`: leniently turns that text back into JSON

mod extract;
mod prompt;
mod recover;
pub mod task;

pub use extract::{extract_content, ContentShape};
pub use prompt::{build_prompt, Depth, DEFAULT_DEPTH};
pub use recover::{parse_assistant_json, RecoverError};
pub use task::{tasks_from_value, Task};
