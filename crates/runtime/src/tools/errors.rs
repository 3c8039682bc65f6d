use thiserror::Error;

/// Errors that can occur while registering or executing tools.
///
/// Upstream HTTP failures are not errors: they surface as
/// [`ToolResult::Error`](super::ToolResult::Error) data instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("tool already registered: {0}")]
    Duplicate(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("execution failed: {0}")]
    Execution(String),
}
