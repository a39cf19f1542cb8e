//! API request and response types.

use serde::Deserialize;

use crate::task::Depth;

/// Request to generate a task list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateTasksRequest {
    /// The goal to break down into tasks
    pub prompt: Option<String>,

    /// Number of tasks to ask for (default: 5)
    pub depth: Option<Depth>,
}

impl GenerateTasksRequest {
    /// The prompt, if present and non-empty.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.is_empty())
    }

    pub fn depth(&self) -> Depth {
        self.depth.clone().unwrap_or_default()
    }
}
