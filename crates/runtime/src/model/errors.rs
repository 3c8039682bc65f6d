use thiserror::Error;

/// Errors from model backend calls.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The model server could not be reached.
    #[error("network: {0}")]
    Network(String),

    /// The model server returned an error response.
    #[error("model api: {0}")]
    Api(String),

    /// The model server response could not be parsed.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}
