//! Shared fakes for generation tests.

#![allow(dead_code)]

use std::sync::Mutex;

use kommit::RequestFailure;
use kommit::llm::{ChatRequest, ChatResponse, ChatTransport, CredentialResolver, CredentialSource};

/// A credential source with a fixed value.
pub struct Fixed {
    pub name: &'static str,
    pub value: Option<&'static str>,
}

impl CredentialSource for Fixed {
    fn name(&self) -> &str {
        self.name
    }

    fn lookup(&self) -> Option<String> {
        self.value.map(str::to_string)
    }
}

pub fn resolver_with_key(key: &'static str) -> CredentialResolver {
    CredentialResolver::new(vec![Box::new(Fixed {
        name: "KOMMIT_API_KEY",
        value: Some(key),
    })])
}

pub fn resolver_without_key() -> CredentialResolver {
    CredentialResolver::new(vec![
        Box::new(Fixed {
            name: "KOMMIT_API_KEY",
            value: None,
        }),
        Box::new(Fixed {
            name: "OPENAI_API_KEY",
            value: None,
        }),
    ])
}

/// Replies with canned content and records every request it is handed.
pub struct RecordingTransport {
    content: String,
    pub calls: Mutex<Vec<(String, ChatRequest)>>,
}

impl RecordingTransport {
    pub fn replying(content: &str) -> Self {
        RecordingTransport {
            content: content.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ChatRequest {
        self.calls.lock().unwrap().last().unwrap().1.clone()
    }
}

impl ChatTransport for RecordingTransport {
    fn send(&self, api_key: &str, request: &ChatRequest) -> Result<ChatResponse, RequestFailure> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));

        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": self.content}}]
        });
        Ok(serde_json::from_value(body).unwrap())
    }
}
