//! Toolchat runtime — tool registry, model backend, and the two-stage pipeline.
//!
//! # Overview
//!
//! - **ToolRegistry**: the ordered set of tools the model may choose from.
//! - **Executor**: runs a model's [`ToolSelection`] against the registry.
//! - **Backend**: a trait abstracting the model server ([`OllamaBackend`]).
//! - **Pipeline**: asks the model for a tool, runs it, then asks the model to
//!   phrase the answer.
//! - **DebugLog**: optional pretty printer for prompts and tool traffic.
//!
//! # Example
//!
//! ```ignore
//! use runtime::{DebugLog, Endpoints, OllamaBackend, Pipeline, ToolRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = reqwest::Client::new();
//! let registry = ToolRegistry::builtin(client.clone(), &Endpoints::default())?;
//! let backend = OllamaBackend::builder("llama3.1").client(client).build();
//!
//! let pipeline = Pipeline::new(backend, registry, DebugLog::disabled());
//! let turn = pipeline.run("What is 2 + 3?").await?;
//! println!("{}", turn.final_reply);
//! # Ok(())
//! # }
//! ```

pub mod debug;
mod error;
pub mod model;
pub mod pipeline;
pub mod prompt;
pub mod tools;

pub use debug::DebugLog;
pub use error::{Error, Result};
pub use model::{Backend, Message, ModelError, OllamaBackend, Role};
pub use pipeline::{ConversationTurn, Pipeline, Responder, Stage};
pub use prompt::PromptError;
pub use tools::{
    Endpoints, Executor, ToolError, ToolRegistry, ToolResult, ToolSelection, ToolSpec,
};
