//! Tool dispatch.

use serde_json::Value;
use tracing::info;

use super::{ToolArguments, ToolError, ToolRegistry, ToolResult, ToolSelection};
use crate::debug::DebugLog;

/// Resolves tool selections against a registry and runs them.
#[derive(Debug, Clone)]
pub struct Executor {
    registry: ToolRegistry,
    debug: DebugLog,
}

impl Executor {
    pub fn new(registry: ToolRegistry, debug: DebugLog) -> Self {
        Self { registry, debug }
    }

    /// Execute a tool selection.
    ///
    /// Unknown tools and bad arguments are errors. Upstream failures come
    /// back as [`ToolResult::Error`].
    pub async fn execute(&self, selection: &ToolSelection) -> Result<ToolResult, ToolError> {
        self.debug.log(
            "TOOL INVOKED",
            &serde_json::to_value(selection).unwrap_or(Value::Null),
        );

        let spec = self.registry.resolve(&selection.name)?;
        let args = ToolArguments::bind(&spec.parameters, &selection.arguments)?;

        info!(tool = spec.name.as_str(), "invoking tool");
        let result = spec.handler().call(&args).await?;

        match &result {
            ToolResult::Success(output) => self.debug.log("TOOL RESPONSE", output),
            ToolResult::Error(err) => {
                info!(
                    tool = spec.name.as_str(),
                    error = err.error.as_str(),
                    "tool reported an error"
                );
            }
        }
        Ok(result)
    }
}
