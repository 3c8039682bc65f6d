use async_trait::async_trait;

use super::{endpoint_url, fetch_json};
use crate::tools::{ParamType, ToolArguments, ToolError, ToolHandler, ToolResult, ToolSpec};

const UNAVAILABLE: &str =
    "Server is experiencing some problems, could not retrieve weather for location.";

struct Weather {
    client: reqwest::Client,
    base_url: String,
}

#[async_trait]
impl ToolHandler for Weather {
    async fn call(&self, args: &ToolArguments) -> Result<ToolResult, ToolError> {
        let location = args.string("location")?;
        let mut url = endpoint_url(&self.base_url, location)?;
        url.query_pairs_mut().append_pair("format", "j2");

        fetch_json(
            &self.client,
            url,
            format!("Location '{location}' does not exist."),
            UNAVAILABLE,
        )
        .await
    }
}

/// `get_weather(location)`: current conditions from wttr.in.
pub fn get_weather(client: reqwest::Client, base_url: impl Into<String>) -> ToolSpec {
    ToolSpec::new(
        "get_weather",
        "Gets the weather for specific location.",
        Weather {
            client,
            base_url: base_url.into(),
        },
    )
    .param("location", ParamType::String)
}
