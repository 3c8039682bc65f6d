//! Ollama chat backend.

use crate::model::{Backend, Message, ModelError, ModelRequest, ModelResponse, Role, Usage};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    message: Option<ApiMessage>,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: String,
}

/// Builder for creating an Ollama backend.
#[derive(Debug, Clone)]
pub struct OllamaBackendBuilder {
    model: String,
    endpoint: String,
    client: Option<reqwest::Client>,
}

impl OllamaBackendBuilder {
    /// Create a new builder for the given model name.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client: None,
        }
    }

    /// Set the base URL of the Ollama server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Reuse an existing HTTP client.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the backend.
    pub fn build(self) -> OllamaBackend {
        OllamaBackend {
            client: self.client.unwrap_or_default(),
            url: format!("{}{CHAT_PATH}", self.endpoint.trim_end_matches('/')),
            model: self.model,
        }
    }
}

/// Ollama `/api/chat` backend.
pub struct OllamaBackend {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a builder for the Ollama backend.
    pub fn builder(model: impl Into<String>) -> OllamaBackendBuilder {
        OllamaBackendBuilder::new(model)
    }
}

impl std::fmt::Display for OllamaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ollama({}, {})", self.model, self.url)
    }
}

impl Backend for OllamaBackend {
    async fn call(&self, request: ModelRequest<'_>) -> Result<ModelResponse, ModelError> {
        let api_request = ApiRequest {
            model: &self.model,
            messages: request.messages,
            stream: false,
        };

        debug!(
            model = self.model.as_str(),
            messages = request.messages.len(),
            "sending request to ollama"
        );

        let response = self
            .client
            .post(&self.url)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(format!("{status}: {body}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        let content = api_response
            .message
            .ok_or_else(|| ModelError::InvalidResponse("missing message".into()))?
            .content;

        let usage = Usage {
            input_tokens: api_response.prompt_eval_count,
            output_tokens: api_response.eval_count,
        };
        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "received response from ollama"
        );

        Ok(ModelResponse {
            message: Message::new(Role::Assistant, content),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn display_names_model_and_url() {
        let backend = OllamaBackend::builder("llama3")
            .endpoint("http://localhost:11434/")
            .build();
        assert_eq!(
            backend.to_string(),
            "ollama(llama3, http://localhost:11434/api/chat)"
        );
    }

    #[tokio::test]
    async fn chat_returns_message_content_and_usage() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(json!({
                "model": "llama3",
                "stream": false,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message":{"role":"assistant","content":"hello"},"done":true,"prompt_eval_count":12,"eval_count":3}"#,
            )
            .create_async()
            .await;

        let backend = OllamaBackend::builder("llama3")
            .endpoint(server.url())
            .build();
        let messages = [Message::system("sys"), Message::user("hi")];
        let response = backend
            .call(ModelRequest {
                messages: &messages,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text(), "hello");
        assert_eq!(response.message.role, Role::Assistant);
        assert_eq!(response.usage.total_tokens(), 15);
    }

    #[tokio::test]
    async fn error_status_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model 'nope' not found"}"#)
            .create_async()
            .await;

        let backend = OllamaBackend::builder("nope").endpoint(server.url()).build();
        let err = backend
            .call(ModelRequest { messages: &[] })
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::Api(ref msg) if msg.contains("not found")));
    }

    #[tokio::test]
    async fn missing_message_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"done":true}"#)
            .create_async()
            .await;

        let backend = OllamaBackend::builder("llama3")
            .endpoint(server.url())
            .build();
        let err = backend
            .call(ModelRequest { messages: &[] })
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::InvalidResponse(_)));
    }
}
