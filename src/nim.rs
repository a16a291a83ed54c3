//! NVIDIA NIM chat-completion client (OpenAI-compatible endpoint).
//!
//! One blocking POST per interaction check. No retries: the caller surfaces
//! the failure to the user instead of queueing work against a paid endpoint.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model calls dominate request latency; the timeout bounds a hung upstream.
const COMPLETION_TIMEOUT_SECS: u64 = 60;

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 4096;
const TOP_P: f32 = 0.9;

#[derive(Error, Debug)]
pub enum NimError {
    #[error("NVIDIA_API_KEY not configured. Please add your API key from build.nvidia.com.")]
    MissingApiKey,

    #[error("NVIDIA NIM API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Request failed: {0}")]
    HttpClient(String),

    #[error("Request timed out after {COMPLETION_TIMEOUT_SECS}s")]
    Timeout,

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Model returned no choices")]
    EmptyResponse,
}

/// Seam over the chat-completion call so the pipeline can be exercised
/// without a credential or network access.
pub trait ChatCompletion: Send + Sync {
    /// Send one system + user message pair, return the assistant content.
    fn complete(&self, system: &str, user: &str) -> Result<String, NimError>;
}

/// Blocking client for the hosted NIM endpoint.
pub struct NimClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl NimClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(COMPLETION_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ChatCompletion for NimClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, NimError> {
        if self.api_key.is_empty() {
            return Err(NimError::MissingApiKey);
        }

        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    NimError::Timeout
                } else {
                    NimError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NimError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| NimError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(NimError::EmptyResponse)
    }
}

impl<T: ChatCompletion + ?Sized> ChatCompletion for std::sync::Arc<T> {
    fn complete(&self, system: &str, user: &str) -> Result<String, NimError> {
        (**self).complete(system, user)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

/// Mock chat client for testing — returns a canned reply or failure and
/// records the last prompt it was given.
pub struct MockChatClient {
    reply: Result<String, String>,
    last_prompt: Mutex<Option<String>>,
}

impl MockChatClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    /// The user prompt from the most recent `complete` call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl ChatCompletion for MockChatClient {
    fn complete(&self, _system: &str, user: &str) -> Result<String, NimError> {
        *self.last_prompt.lock().unwrap() = Some(user.to_string());
        match &self.reply {
            Ok(content) => Ok(content.clone()),
            Err(message) => Err(NimError::HttpClient(message.clone())),
        }
    }
}
