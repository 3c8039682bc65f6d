//! Ordered tool registry.

use std::sync::Arc;

use super::{ParamType, Parameter, ToolError, ToolHandler};

/// A tool definition exposed to the model, paired with its handler.
#[derive(Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    handler: Arc<dyn ToolHandler>,
}

impl ToolSpec {
    /// Create a tool with no parameters.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Append a parameter. Order is preserved for positional binding.
    pub fn param(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            ty,
        });
        self
    }

    /// One-line description, e.g. `add(first: int, second: int) - Add two integers.`
    pub fn describe(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({params}) - {}", self.name, self.description)
    }

    pub(crate) fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// The set of tools available to the model, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, spec: ToolSpec) -> Result<(), ToolError> {
        if self.tools.iter().any(|t| t.name == spec.name) {
            return Err(ToolError::Duplicate(spec.name));
        }
        self.tools.push(spec);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, spec: ToolSpec) -> Result<Self, ToolError> {
        self.register(spec)?;
        Ok(self)
    }

    /// Render every tool, one per line, for embedding in the system prompt.
    pub fn describe_all(&self) -> String {
        self.tools
            .iter()
            .map(ToolSpec::describe)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Result<&ToolSpec, ToolError> {
        self.tools
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    pub fn specs(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
