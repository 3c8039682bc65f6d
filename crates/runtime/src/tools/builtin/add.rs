use async_trait::async_trait;
use serde_json::json;

use crate::tools::{ParamType, ToolArguments, ToolError, ToolHandler, ToolResult, ToolSpec};

struct Add;

#[async_trait]
impl ToolHandler for Add {
    async fn call(&self, args: &ToolArguments) -> Result<ToolResult, ToolError> {
        let first = args.integer("first")?;
        let second = args.integer("second")?;
        let sum = first
            .checked_add(second)
            .ok_or_else(|| ToolError::InvalidInput(format!("{first} + {second} overflows")))?;
        Ok(ToolResult::success(json!({ "result": sum })))
    }
}

/// `add(first, second)`: sum of two integers.
pub fn add() -> ToolSpec {
    ToolSpec::new("add", "Add two integers.", Add)
        .param("first", ParamType::Integer)
        .param("second", ParamType::Integer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn adds_negative_numbers() {
        let spec = add();
        let args = ToolArguments::bind(&spec.parameters, &json!([-4, 10])).unwrap();
        let result = spec.handler().call(&args).await.unwrap();
        assert_eq!(result, ToolResult::success(json!({"result": 6})));
    }

    #[tokio::test]
    async fn overflow_is_invalid_input() {
        let spec = add();
        let args = ToolArguments::bind(&spec.parameters, &json!([i64::MAX, 1])).unwrap();
        let err = spec.handler().call(&args).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
