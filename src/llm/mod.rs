pub mod credentials;
pub mod openai;
pub mod prompt_builder;
mod prompts;
pub mod schema;
mod scopes;

use crate::config::Config;
use crate::error::LlmError;

pub use credentials::{CredentialResolver, CredentialSource, EnvVar};
pub use openai::{ChatRequest, ChatResponse, ChatTransport, HttpTransport, OpenAiClient};
pub use schema::{NamedSchema, Scopes, StructuredOutput, generate_schema};

/// Trait for talking to an LLM.
pub trait LlmClient: Send + Sync {
    /// Conventional Commit message for `diff`, using the configured model,
    /// commit types and scopes.
    fn generate_commit_message(&self, config: &Config, diff: &str) -> Result<String, LlmError>;

    /// Suggest module or package names to use as commit scopes.
    fn generate_scopes_from_filenames(
        &self,
        model: &str,
        filenames: &[String],
        existing_scopes: &[String],
    ) -> Result<Vec<String>, LlmError>;
}

/// Generate a commit message with the key from `KOMMIT_API_KEY` or
/// `OPENAI_API_KEY`.
pub fn generate_commit_message(config: &Config, diff: &str) -> Result<String, LlmError> {
    OpenAiClient::from_config(config).generate_commit_message(config, diff)
}

/// Suggest scopes with the key from `KOMMIT_API_KEY` or `OPENAI_API_KEY`.
///
/// Always talks to the default OpenAI endpoint; `config.llm.api_base_url` is
/// not consulted. Use [`OpenAiClient::new`] with [`LlmClient`] to target
/// another endpoint.
pub fn generate_scopes_from_filenames(
    model: &str,
    filenames: &[String],
    existing_scopes: &[String],
) -> Result<Vec<String>, LlmError> {
    OpenAiClient::default().generate_scopes_from_filenames(model, filenames, existing_scopes)
}
