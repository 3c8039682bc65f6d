//! Built-in tools: weather lookup, currency rates, and integer addition.

mod add;
mod currency;
mod weather;

pub use add::add;
pub use currency::convert_currency;
pub use weather::get_weather;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ToolError, ToolRegistry, ToolResult};

const DEFAULT_WEATHER_URL: &str = "https://wttr.in";
const DEFAULT_CURRENCY_URL: &str = "https://open.er-api.com/v6/latest";

/// Base URLs of the upstream services backing the built-in tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub weather_url: String,
    pub currency_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            currency_url: DEFAULT_CURRENCY_URL.to_string(),
        }
    }
}

impl ToolRegistry {
    /// Registry holding `get_weather`, `add`, and `convert_currency`, in that order.
    pub fn builtin(client: reqwest::Client, endpoints: &Endpoints) -> Result<Self, ToolError> {
        ToolRegistry::new()
            .with(get_weather(client.clone(), &endpoints.weather_url))?
            .with(add())?
            .with(convert_currency(client, &endpoints.currency_url))
    }
}

/// Append `segment` as a single percent-encoded path segment of `base`.
fn endpoint_url(base: &str, segment: &str) -> Result<Url, ToolError> {
    let mut url =
        Url::parse(base).map_err(|e| ToolError::Execution(format!("bad url {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ToolError::Execution(format!("url cannot take a path: {base}")))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// GET `url` and map the status to a tool result.
///
/// 4xx becomes `not_found`, 5xx becomes `unavailable`, anything else is the
/// JSON body verbatim.
async fn fetch_json(
    client: &reqwest::Client,
    url: Url,
    not_found: String,
    unavailable: &str,
) -> Result<ToolResult, ToolError> {
    debug!(%url, "fetching upstream");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ToolError::Execution(e.to_string()))?;

    let status = response.status();
    if status.is_client_error() {
        return Ok(ToolResult::error(not_found));
    }
    if status.is_server_error() {
        return Ok(ToolResult::error(unavailable));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| ToolError::Execution(format!("decode response: {e}")))?;
    Ok(ToolResult::success(body))
}
