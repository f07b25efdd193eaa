//! Debate Relay: an HTTP proxy for LLM-backed debate generation and judging
//!
//! This library provides:
//! - A runtime-editable store of named prompt templates
//! - Placeholder rendering for caller-supplied debate variables
//! - A client for OpenAI-compatible chat-completion APIs
//! - Score extraction from free-text judgment output
//! - An axum router exposing the debate endpoints with CORS enabled
//!
//! # Example
//!
//! ```no_run
//! use debate_relay::{serve, Config, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     serve(config, 5000).await
//! }
//! ```

pub mod completion;
pub mod config;
pub mod error;
pub mod judge;
pub mod server;
pub mod templates;

// Re-export main types for library users
pub use completion::CompletionClient;
pub use config::Config;
pub use error::ApiError;
pub use judge::{parse_scores, RoundScores};
pub use server::{create_router, serve, AppState};
pub use templates::TemplateStore;

// Re-export common types
pub type Result<T> = std::result::Result<T, anyhow::Error>;
