//! Configuration loading from toolchat.toml and the environment.

use runtime::Endpoints;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable selecting the debug level (`DEBUG` enables output).
pub const LOG_ENV: &str = "LOG";
/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "TOOLCHAT_MODEL";
/// Environment variable overriding the model server address.
pub const HOST_ENV: &str = "OLLAMA_HOST";

/// Top-level configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Model server configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Upstream services backing the tools.
    #[serde(default)]
    pub endpoints: Endpoints,

    /// HTTP client settings shared by the model backend and the tools.
    #[serde(default)]
    pub http: HttpConfig,

    /// Debug level, read from `LOG`.
    #[serde(skip, default = "default_log_level")]
    pub log_level: String,
}

/// Model server configuration.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Model to use.
    #[serde(default = "default_model")]
    pub name: String,

    /// Base URL of the Ollama server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

/// Settings for the shared HTTP client.
#[derive(Debug, Default, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout for every outbound call. Unset means no timeout.
    pub request_timeout_secs: Option<u64>,
}

fn default_model() -> String {
    "hf.co/bartowski/Meta-Llama-3.1-8B-Instruct-GGUF".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default_config())
        }
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Create a default configuration.
    pub fn default_config() -> Self {
        Self {
            model: ModelConfig::default(),
            endpoints: Endpoints::default(),
            http: HttpConfig::default(),
            log_level: default_log_level(),
        }
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup(LOG_ENV) {
            self.log_level = level;
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.is_empty()) {
            self.model.name = model;
        }
        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.is_empty()) {
            self.model.endpoint = if host.contains("://") {
                host
            } else {
                format!("http://{host}")
            };
        }
    }

    /// Build the HTTP client shared by the model backend and the tools.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.http.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default_config();
        assert_eq!(config.model.endpoint, "http://localhost:11434");
        assert_eq!(config.endpoints, Endpoints::default());
        assert_eq!(config.log_level, "INFO");
        assert!(config.http.request_timeout_secs.is_none());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.model.name, default_model());
        assert_eq!(config.endpoints.weather_url, "https://wttr.in");
        assert_eq!(config.log_level, "INFO");
    }

    #[test]
    fn parses_sections() {
        let config = Config::parse(
            r#"
            [model]
            name = "llama3.1"
            endpoint = "http://gpu-box:11434"

            [endpoints]
            weather_url = "http://weather.local"

            [http]
            request_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.model.name, "llama3.1");
        assert_eq!(config.model.endpoint, "http://gpu-box:11434");
        assert_eq!(config.http.request_timeout_secs, Some(30));
        assert_eq!(config.endpoints.weather_url, "http://weather.local");
        assert_eq!(config.endpoints.currency_url, Endpoints::default().currency_url);
    }

    #[test]
    fn timeout_belongs_to_http_section() {
        let config = Config::parse(
            r#"
            [model]
            request_timeout_secs = 30
            "#,
        )
        .unwrap();
        assert!(config.http.request_timeout_secs.is_none());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::parse("[model\nname = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("definitely/not/here/toolchat.toml").unwrap();
        assert_eq!(config.model.name, default_model());
    }

    #[test]
    fn env_overrides() {
        let mut config = Config::default_config();
        config.apply_env(env(&[
            ("LOG", "DEBUG"),
            ("TOOLCHAT_MODEL", "qwen3"),
            ("OLLAMA_HOST", "127.0.0.1:11500"),
        ]));

        assert_eq!(config.log_level, "DEBUG");
        assert_eq!(config.model.name, "qwen3");
        assert_eq!(config.model.endpoint, "http://127.0.0.1:11500");
    }

    #[test]
    fn env_without_overrides_keeps_config() {
        let mut config = Config::default_config();
        config.apply_env(env(&[("TOOLCHAT_MODEL", "")]));
        assert_eq!(config.model.name, default_model());
        assert_eq!(config.log_level, "INFO");
    }

    #[test]
    fn http_client_builds() {
        let mut config = Config::default_config();
        config.http.request_timeout_secs = Some(5);
        assert!(config.http_client().is_ok());
    }
}
