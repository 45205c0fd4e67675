//! Error types for the shopping assistant.

use thiserror::Error;

/// Errors that can occur while running a dispatch cycle.
///
/// Domain-level validation failures (no search matches, unresolvable cart
/// items) are NOT errors: they travel back to the model as `success: false`
/// tool results. Everything here aborts the dispatch cycle.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Model API returned an error.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model returned no usable message content.
    #[error("model returned an empty message")]
    EmptyResponse,

    /// A tool invocation's arguments did not match the declared schema.
    /// This fails the whole dispatch cycle; there is no per-tool recovery.
    #[error("invalid arguments for tool {tool}: {message}")]
    ToolArguments {
        /// Tool the model tried to invoke.
        tool: String,
        /// What was wrong with the payload.
        message: String,
    },
}

/// API error response from the model provider.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_error_display() {
        let err = AssistantError::RateLimited(60);
        assert_eq!(err.to_string(), "rate limited, retry after 60 seconds");

        let err = AssistantError::Api {
            error_type: "invalid_request_error".to_string(),
            message: "Invalid API key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (invalid_request_error): Invalid API key"
        );

        let err = AssistantError::ToolArguments {
            tool: "add_to_cart".to_string(),
            message: "missing field `items`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid arguments for tool add_to_cart: missing field `items`"
        );
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "type": "error",
            "error": {
                "type": "invalid_request_error",
                "message": "max_tokens is too large"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error_type, "error");
        assert_eq!(response.error.error_type, "invalid_request_error");
        assert_eq!(response.error.message, "max_tokens is too large");
    }
}
