//! Tool-related types.

use super::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Primitive type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    /// Short name used in rendered tool signatures.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "str",
            Self::Integer => "int",
        }
    }

    /// Check a raw argument against this type, coercing where unambiguous.
    fn coerce(self, name: &str, value: &Value) -> Result<Value, ToolError> {
        match (self, value) {
            (Self::String, Value::String(_)) => Ok(value.clone()),
            (Self::Integer, Value::Number(n)) if n.is_i64() => Ok(value.clone()),
            (Self::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| type_mismatch(name, self, value)),
            _ => Err(type_mismatch(name, self, value)),
        }
    }
}

fn type_mismatch(name: &str, ty: ParamType, value: &Value) -> ToolError {
    ToolError::InvalidInput(format!(
        "argument '{name}' must be {}, got {value}",
        ty.as_str()
    ))
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed tool parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: ParamType,
}

/// The model's choice of tool and arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSelection {
    pub name: String,
    /// Raw arguments: an object keyed by parameter name, or an array in
    /// parameter order.
    #[serde(default)]
    pub arguments: Value,
}

impl ToolSelection {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Arguments bound to a tool's parameter list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments(Map<String, Value>);

impl ToolArguments {
    /// Bind raw selection arguments to `params`.
    ///
    /// Objects bind by name, arrays bind by position, `null` means no
    /// arguments. Every parameter must be supplied exactly once.
    pub fn bind(params: &[Parameter], raw: &Value) -> Result<Self, ToolError> {
        let mut bound = Map::new();
        match raw {
            Value::Null => {}
            Value::Object(map) => {
                if let Some(unknown) = map.keys().find(|k| !params.iter().any(|p| &p.name == *k)) {
                    return Err(ToolError::InvalidInput(format!(
                        "unexpected argument '{unknown}'"
                    )));
                }
                for (name, value) in map {
                    bound.insert(name.clone(), value.clone());
                }
            }
            Value::Array(values) => {
                if values.len() != params.len() {
                    return Err(ToolError::InvalidInput(format!(
                        "expected {} arguments, got {}",
                        params.len(),
                        values.len()
                    )));
                }
                for (param, value) in params.iter().zip(values) {
                    bound.insert(param.name.clone(), value.clone());
                }
            }
            other => {
                return Err(ToolError::InvalidInput(format!(
                    "arguments must be an object or array, got {other}"
                )));
            }
        }

        for param in params {
            let value = bound.get(&param.name).ok_or_else(|| {
                ToolError::InvalidInput(format!("missing argument '{}'", param.name))
            })?;
            let coerced = param.ty.coerce(&param.name, value)?;
            bound.insert(param.name.clone(), coerced);
        }

        Ok(Self(bound))
    }

    /// Get a string argument.
    pub fn string(&self, name: &str) -> Result<&str, ToolError> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidInput(format!("missing string argument '{name}'")))
    }

    /// Get an integer argument.
    pub fn integer(&self, name: &str) -> Result<i64, ToolError> {
        self.0
            .get(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| ToolError::InvalidInput(format!("missing integer argument '{name}'")))
    }
}

/// Structured failure reported by a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
}

/// The outcome of running a tool.
///
/// Serializes untagged: a success is the tool's JSON verbatim and an error
/// is `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResult {
    Success(Value),
    Error(ErrorResult),
}

impl ToolResult {
    pub fn success(output: Value) -> Self {
        Self::Success(output)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorResult {
            error: message.into(),
        })
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The result as a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success(output) => output.clone(),
            Self::Error(err) => serde_json::json!({ "error": err.error }),
        }
    }
}
