//! Model provider backends.

mod ollama;

pub use ollama::{OllamaBackend, OllamaBackendBuilder};
