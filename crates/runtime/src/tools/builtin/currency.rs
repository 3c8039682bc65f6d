use async_trait::async_trait;

use super::{endpoint_url, fetch_json};
use crate::tools::{ParamType, ToolArguments, ToolError, ToolHandler, ToolResult, ToolSpec};

const UNAVAILABLE: &str =
    "Server is experiencing some problems, could not retrieve conversion rates for currency.";

struct Currency {
    client: reqwest::Client,
    base_url: String,
}

#[async_trait]
impl ToolHandler for Currency {
    async fn call(&self, args: &ToolArguments) -> Result<ToolResult, ToolError> {
        let code = args.string("source_currency")?;
        let url = endpoint_url(&self.base_url, code)?;

        fetch_json(
            &self.client,
            url,
            format!("Currency '{code}' not found."),
            UNAVAILABLE,
        )
        .await
    }
}

/// `convert_currency(source_currency)`: latest rates keyed by a base code.
pub fn convert_currency(client: reqwest::Client, base_url: impl Into<String>) -> ToolSpec {
    ToolSpec::new(
        "convert_currency",
        "Gets currency rate for source_currency.",
        Currency {
            client,
            base_url: base_url.into(),
        },
    )
    .param("source_currency", ParamType::String)
}
