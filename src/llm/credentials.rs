use std::env;

use crate::error::LlmError;

/// Primary environment variable for the API key.
pub const PRIMARY_KEY_VAR: &str = "KOMMIT_API_KEY";

/// Consulted when the primary variable is unset or empty.
pub const FALLBACK_KEY_VAR: &str = "OPENAI_API_KEY";

/// A named place an API key can come from.
pub trait CredentialSource: Send + Sync {
    /// Name shown to the user when no source yields a key.
    fn name(&self) -> &str;

    fn lookup(&self) -> Option<String>;
}

/// Reads the key from a process environment variable.
#[derive(Debug, Clone)]
pub struct EnvVar(pub String);

impl EnvVar {
    pub fn new(name: impl Into<String>) -> Self {
        EnvVar(name.into())
    }
}

impl CredentialSource for EnvVar {
    fn name(&self) -> &str {
        &self.0
    }

    fn lookup(&self) -> Option<String> {
        env::var(&self.0).ok()
    }
}

/// Resolves the API key from an ordered list of sources.
///
/// Earlier sources take precedence. A source that is set but empty counts as
/// absent, so the next one is consulted.
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        CredentialResolver { sources }
    }

    /// `KOMMIT_API_KEY`, then `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        CredentialResolver::new(vec![
            Box::new(EnvVar::new(PRIMARY_KEY_VAR)),
            Box::new(EnvVar::new(FALLBACK_KEY_VAR)),
        ])
    }

    pub fn resolve(&self) -> Result<String, LlmError> {
        for source in &self.sources {
            match source.lookup() {
                Some(key) if !key.is_empty() => {
                    log::debug!("Using API key from {}", source.name());
                    return Ok(key);
                }
                _ => log::trace!("No API key in {}", source.name()),
            }
        }

        Err(LlmError::ApiKeyMissing {
            sources: self.sources.iter().map(|s| s.name().to_string()).collect(),
        })
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        CredentialResolver::from_env()
    }
}
