//! Prompt templates and the stage-1 reply parser.

use serde_json::Value;
use thiserror::Error;

use crate::tools::{ToolResult, ToolSelection};

const SYSTEM_TEMPLATE: &str = "\
You are an assistant that has access to the following set of tools.
You should only answer with a JSON blob as output and nothing else.
Here are the names and descriptions for each tool:

{rendered_tools}

Given the user input, return the name and input of the tool to use.
Return your response as a JSON blob with 'name' (string) and 'arguments' (array) keys.
The value associated with the 'arguments' key should be a dictionary of parameters.
";

const USER_TEMPLATE: &str = "\
Use the following JSON to answer the user question in the end.
Never mention the JSON to the user just use it to answer the user question.

{tool_output}

User question: {input}
";

/// The model's stage-1 reply was not a usable tool selection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PromptError {
    #[error("malformed model output: {reason}: {reply}")]
    MalformedOutput { reason: String, reply: String },
}

impl PromptError {
    fn malformed(reason: impl Into<String>, reply: &str) -> Self {
        Self::MalformedOutput {
            reason: reason.into(),
            reply: reply.to_string(),
        }
    }
}

/// System prompt listing the available tools.
pub fn build_system_prompt(tool_descriptions: &str) -> String {
    SYSTEM_TEMPLATE.replace("{rendered_tools}", tool_descriptions)
}

/// Answer prompt embedding the tool output and the original question.
pub fn build_user_prompt(tool_output: &ToolResult, input: &str) -> String {
    let rendered = serde_json::to_string_pretty(tool_output)
        .unwrap_or_else(|_| tool_output.to_value().to_string());
    USER_TEMPLATE
        .replace("{tool_output}", &rendered)
        .replace("{input}", input)
}

/// Parse a stage-1 reply into a tool selection.
///
/// Accepts a bare JSON object, or one inside a Markdown code fence anywhere
/// in the reply (with or without a `json` info string). The object needs a
/// string `name`; `arguments` may be an object, an array, `null`, or absent.
pub fn parse_selection(reply: &str) -> Result<ToolSelection, PromptError> {
    let body = reply.trim();
    let value: Value = serde_json::from_str(body)
        .or_else(|_| serde_json::from_str(fenced_body(body)))
        .map_err(|e| PromptError::malformed(format!("invalid JSON ({e})"), reply))?;

    let Value::Object(mut object) = value else {
        return Err(PromptError::malformed("expected a JSON object", reply));
    };

    let name = match object.remove("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => name,
        Some(_) => return Err(PromptError::malformed("'name' must be a non-empty string", reply)),
        None => return Err(PromptError::malformed("missing 'name'", reply)),
    };

    let arguments = match object.remove("arguments") {
        None => Value::Null,
        Some(args @ (Value::Null | Value::Object(_) | Value::Array(_))) => args,
        Some(_) => {
            return Err(PromptError::malformed(
                "'arguments' must be an object or array",
                reply,
            ));
        }
    };

    Ok(ToolSelection::new(name, arguments))
}

/// Text between the first opening fence and the last closing fence.
fn fenced_body(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };
    let rest = &text[start + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.rfind("```").map_or(rest, |end| &rest[..end]).trim()
}
