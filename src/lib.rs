//! # Task Gateway
//!
//! Turns a goal description into a structured task list by asking an LLM
//! chat-completion API (OpenRouter by default).
//!
//! ## Request Flow
//!
//! ```text
//!   POST /generate-tasks {prompt, depth}
//!                │
//!                ▼
//!        ┌───────────────┐      one chat completion      ┌──────────────┐
//!        │  TaskGateway  │ ────────────────────────────▶ │  Upstream    │
//!        │               │ ◀──────────────────────────── │  LLM API     │
//!        └───────┬───────┘      free-form reply          └──────────────┘
//!                │ extract content → recover JSON
//!                ▼
//!     200 [tasks]  |  4xx/5xx {error, message, ...}
//! ```
//!
//! ## Modules
//! - `api`: HTTP routes, preflight handling and error mapping
//! - `config`: environment-driven configuration
//! - `gateway`: the generation operation and its error taxonomy
//! - `llm`: chat-completion client abstraction and OpenRouter client
//! - `task`: task record, prompt building, content extraction, JSON recovery

pub mod api;
pub mod config;
pub mod gateway;
pub mod llm;
pub mod task;

pub use config::Config;
pub use gateway::{GenerationError, GenerationResult, TaskGateway};
