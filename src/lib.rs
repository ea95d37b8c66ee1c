//! Conventional Commit messages and scope suggestions from an LLM.
//!
//! [`llm::generate_commit_message`] turns a unified diff plus the allowed
//! commit types and scopes from [`config::Config`] into a commit message.
//! [`llm::generate_scopes_from_filenames`] asks the model for module names to
//! use as scopes, constrained to a strict JSON schema.

pub mod config;
pub mod error;
pub mod llm;
pub mod logging;

pub use config::Config;
pub use error::{LlmError, RequestFailure};
pub use llm::{LlmClient, generate_commit_message, generate_scopes_from_filenames};
