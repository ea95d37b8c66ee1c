//! Error types for the LLM layer using thiserror.

use thiserror::Error;

/// Errors surfaced by commit message generation and scope suggestion.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("no API key found; set one of: {}", .sources.join(", "))]
    ApiKeyMissing { sources: Vec<String> },

    #[error("OpenAI request failed: {0}")]
    OpenAiRequest(#[source] RequestFailure),

    #[error("failed to parse structured model response as JSON: {0}")]
    JsonParse(#[source] serde_json::Error),
}

/// What went wrong while talking to the chat completion endpoint.
#[derive(Error, Debug)]
pub enum RequestFailure {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status} - {body}")]
    Status { status: u16, body: String },

    #[error("malformed chat completion response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("no choices returned")]
    NoChoices,

    #[error("model refused the request: {0}")]
    Refused(String),
}

impl From<RequestFailure> for LlmError {
    fn from(failure: RequestFailure) -> Self {
        LlmError::OpenAiRequest(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_missing_names_every_source() {
        let err = LlmError::ApiKeyMissing {
            sources: vec!["KOMMIT_API_KEY".into(), "OPENAI_API_KEY".into()],
        };
        assert_eq!(
            err.to_string(),
            "no API key found; set one of: KOMMIT_API_KEY, OPENAI_API_KEY"
        );
    }

    #[test]
    fn request_failure_keeps_status_and_body() {
        let err: LlmError = RequestFailure::Status {
            status: 429,
            body: "rate limited".into(),
        }
        .into();
        assert_eq!(err.to_string(), "OpenAI request failed: HTTP 429 - rate limited");
        assert!(std::error::Error::source(&err).is_some());
    }
}
