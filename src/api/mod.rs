//! HTTP API for the task gateway.
//!
//! ## Endpoints
//!
//! - `POST /generate-tasks` - Generate a task list for a goal
//! - `OPTIONS *` - CORS preflight, always `204`
//! - anything else - `Hello World`

mod error;
mod routes;
pub mod types;

pub use error::ApiError;
pub use routes::{router, serve, AppState};
pub use types::*;
