use super::credentials::CredentialResolver;
use super::prompt_builder;
use super::prompts;
use super::schema::{NamedSchema, Scopes, StructuredOutput};
use super::{LlmClient, scopes};
use crate::config::Config;
use crate::error::{LlmError, RequestFailure};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";

/// Every request is bounded by this timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const TEMPERATURE: f64 = 0.0;
const TOP_P: f64 = 1.0;
const PRESENCE_PENALTY: f64 = 0.0;
const FREQUENCY_PENALTY: f64 = 0.0;

/// Request body for the OpenAI Chat Completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub top_p: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// System + user messages with the fixed sampling parameters.
    pub fn new(model: &str, system: impl Into<String>, user: impl Into<String>) -> Self {
        ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: system.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
            temperature: TEMPERATURE,
            top_p: TOP_P,
            presence_penalty: PRESENCE_PENALTY,
            frequency_penalty: FREQUENCY_PENALTY,
            response_format: None,
        }
    }

    pub fn with_schema(mut self, schema: &NamedSchema) -> Self {
        self.response_format = Some(ResponseFormat::JsonSchema {
            json_schema: schema.clone(),
        });
        self
    }

    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonSchema { json_schema: NamedSchema },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

impl ChatResponse {
    /// Content of the first choice.
    pub fn into_content(self) -> Result<String, RequestFailure> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(RequestFailure::NoChoices)?;

        if let Some(refusal) = choice.message.refusal {
            return Err(RequestFailure::Refused(refusal));
        }

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessageResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageResponse {
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Delivers a chat request to a completion endpoint.
pub trait ChatTransport: Send + Sync {
    fn send(&self, api_key: &str, request: &ChatRequest) -> Result<ChatResponse, RequestFailure>;
}

impl<T: ChatTransport + ?Sized> ChatTransport for &T {
    fn send(&self, api_key: &str, request: &ChatRequest) -> Result<ChatResponse, RequestFailure> {
        (**self).send(api_key, request)
    }
}

/// Talks to an OpenAI-compatible endpoint over HTTPS.
///
/// A fresh `reqwest` client is built for every request; nothing is pooled
/// between calls.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    api_base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        HttpTransport {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn chat_url(&self) -> String {
        if self.api_base_url.ends_with("/v1") {
            format!("{}/chat/completions", self.api_base_url)
        } else {
            format!("{}/v1/chat/completions", self.api_base_url)
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::new(DEFAULT_API_BASE_URL)
    }
}

impl ChatTransport for HttpTransport {
    fn send(&self, api_key: &str, request: &ChatRequest) -> Result<ChatResponse, RequestFailure> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(RequestFailure::ClientBuild)?;

        log::info!("Calling OpenAI model {:?}", &request.model);

        let resp = client
            .post(self.chat_url())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .map_err(RequestFailure::Transport)?;

        let status = resp.status();
        let text = resp.text().map_err(RequestFailure::Transport)?;

        if !status.is_success() {
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        log::trace!("OpenAI raw JSON response: {text}");

        let chat_resp: ChatResponse =
            serde_json::from_str(&text).map_err(RequestFailure::MalformedResponse)?;

        if let Some(usage) = &chat_resp.usage {
            log::info!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        Ok(chat_resp)
    }
}

/// OpenAI-based implementation of [`LlmClient`].
pub struct OpenAiClient<T = HttpTransport> {
    credentials: CredentialResolver,
    transport: T,
}

impl OpenAiClient<HttpTransport> {
    /// Key from the environment, requests to `api_base_url`.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        OpenAiClient::with_transport(CredentialResolver::from_env(), HttpTransport::new(api_base_url))
    }

    pub fn from_config(config: &Config) -> Self {
        OpenAiClient::new(config.llm.api_base_url.clone())
    }
}

impl Default for OpenAiClient<HttpTransport> {
    fn default() -> Self {
        OpenAiClient::new(DEFAULT_API_BASE_URL)
    }
}

impl<T: ChatTransport> OpenAiClient<T> {
    pub fn with_transport(credentials: CredentialResolver, transport: T) -> Self {
        OpenAiClient {
            credentials,
            transport,
        }
    }

    /// Send the prompt and return the first choice's text verbatim.
    pub fn chat(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.credentials.resolve()?;
        let req = ChatRequest::new(model, prompts::SYSTEM_INSTRUCTIONS, prompt);

        let content = self.transport.send(&api_key, &req)?.into_content()?;
        Ok(content)
    }

    /// Send the prompt constrained to `schema` and decode the reply into `R`.
    pub fn chat_structured<R: StructuredOutput>(
        &self,
        model: &str,
        prompt: &str,
        schema: &NamedSchema,
    ) -> Result<R, LlmError> {
        let api_key = self.credentials.resolve()?;
        let req = ChatRequest::new(model, prompt_builder::structured_system_prompt(), prompt)
            .with_schema(schema);

        let content = self.transport.send(&api_key, &req)?.into_content()?;
        serde_json::from_str(&content).map_err(LlmError::JsonParse)
    }
}

impl<T: ChatTransport> LlmClient for OpenAiClient<T> {
    fn generate_commit_message(&self, config: &Config, diff: &str) -> Result<String, LlmError> {
        let prompt =
            prompt_builder::commit_message_prompt(&config.commit.types, &config.commit.scopes, diff);

        log::debug!("Using model {} for commit message", config.llm.model);
        log::trace!("Commit-message prompt:\n{}", truncate(&prompt, 3000));

        self.chat(&config.llm.model, &prompt)
    }

    fn generate_scopes_from_filenames(
        &self,
        model: &str,
        filenames: &[String],
        existing_scopes: &[String],
    ) -> Result<Vec<String>, LlmError> {
        let prompt = prompt_builder::scopes_prompt(filenames, existing_scopes);

        log::trace!("Scope suggestion prompt:\n{}", truncate(&prompt, 3000));

        let result: Scopes = self.chat_structured(model, &prompt, &Scopes::named_schema())?;

        Ok(scopes::filter_suggestions(result.scopes))
    }
}

/// Truncate long strings for debug logging.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...\n[truncated {} chars]", &s[..end], s.len() - end)
}
