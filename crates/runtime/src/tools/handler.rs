//! Tool handler trait.

use super::{ToolArguments, ToolError, ToolResult};
use async_trait::async_trait;

/// The executable body of a tool.
///
/// Handlers receive arguments already bound to the tool's parameter list and
/// perform their own I/O. This is the boundary between the pipeline and side
/// effects.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: &ToolArguments) -> Result<ToolResult, ToolError>;
}
