//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror. Every
//! failure of the Gemini adapter is terminal: nothing here is retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GEMINI_API_KEY is required")]
    MissingCredential,

    #[error("Invalid model: {model}. Allowed: {}", allowed.join(", "))]
    InvalidModel { model: String, allowed: Vec<String> },

    #[error("At least one image is required")]
    NoImagesProvided,

    /// Non-success HTTP status from the provider.
    #[error("Gemini API error ({status}): {body}")]
    Transport { status: u16, body: String },

    /// Error object carried in an otherwise successful response.
    #[error("Gemini API error: {0}")]
    Provider(String),

    #[error("No image generated - empty response from Gemini")]
    EmptyResponse,

    #[error("No response from Gemini")]
    NoResponse,

    #[error("No image data in Gemini response")]
    NoImageData,

    #[error("No description in Gemini response")]
    NoDescription,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_model_lists_allowed_models() {
        let err = Error::InvalidModel {
            model: "../../x".to_string(),
            allowed: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "Invalid model: ../../x. Allowed: a, b");
    }

    #[test]
    fn test_transport_error_carries_status_and_body() {
        let err = Error::Transport {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini API error (401): Unauthorized");
    }

    #[test]
    fn test_empty_and_no_response_are_worded_differently() {
        assert_ne!(
            Error::EmptyResponse.to_string(),
            Error::NoResponse.to_string()
        );
    }
}
