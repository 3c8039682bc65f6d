//! Tool registry, execution, and the built-in tools.

pub mod builtin;
pub mod errors;
mod executor;
mod handler;
mod registry;
pub mod types;

pub use builtin::Endpoints;
pub use errors::ToolError;
pub use executor::Executor;
pub use handler::ToolHandler;
pub use registry::{ToolRegistry, ToolSpec};
pub use types::{ErrorResult, ParamType, Parameter, ToolArguments, ToolResult, ToolSelection};
