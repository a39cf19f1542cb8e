//! The task record returned to clients.

use serde::{Deserialize, Serialize};

/// One step of a generated plan.
///
/// The gateway relays whatever JSON the model produced, so this type is a
/// typed view over the reply rather than a validation gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_number: i64,
    pub task_title: String,
    pub task_description: String,
}

/// Interpret a recovered JSON value as a task list, if it has that shape.
pub fn tasks_from_value(value: &serde_json::Value) -> Option<Vec<Task>> {
    serde_json::from_value(value.clone()).ok()
}
