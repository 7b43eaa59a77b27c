//! Oracle backend abstraction and implementations.
//!
//! Enum-based dispatch over concrete backends, avoiding the
//! dyn-compatibility issues with async trait methods. HTTP backends
//! exist for the Ollama generate API, OpenAI-compatible chat
//! completions, and the Anthropic Messages API; a scripted backend
//! replays canned responses for tests and offline runs.
//!
//! The arbiter does not care which model is behind the endpoint -- it
//! sends a prompt and expects text containing a JSON decision back.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::{OracleConfig, Provider};
use crate::error::RunnerError;
use crate::prompt::RenderedPrompt;

/// An oracle backend that can answer a rendered prompt.
pub enum OracleClient {
    /// Ollama `/api/generate`.
    Ollama(OllamaBackend),
    /// OpenAI-compatible `/chat/completions`.
    OpenAi(OpenAiBackend),
    /// Anthropic `/messages`.
    Anthropic(AnthropicBackend),
    /// Canned responses, no network.
    Scripted(ScriptedOracle),
}

impl OracleClient {
    /// Send a prompt and return the raw response text.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Oracle`] if the HTTP call fails or the
    /// response text cannot be extracted.
    pub async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        match self {
            Self::Ollama(backend) => backend.complete(prompt).await,
            Self::OpenAi(backend) => backend.complete(prompt).await,
            Self::Anthropic(backend) => backend.complete(prompt).await,
            Self::Scripted(backend) => backend.complete(),
        }
    }

    /// Human-readable backend name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ollama(_) => "ollama",
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
            Self::Scripted(_) => "scripted",
        }
    }
}

/// Create an oracle client from configuration.
pub fn create_client(config: &OracleConfig) -> OracleClient {
    match config.provider {
        Provider::Ollama => OracleClient::Ollama(OllamaBackend::new(config)),
        Provider::OpenAi => OracleClient::OpenAi(OpenAiBackend::new(config)),
        Provider::Anthropic => OracleClient::Anthropic(AnthropicBackend::new(config)),
        Provider::Scripted => OracleClient::Scripted(ScriptedOracle::default()),
    }
}

// ---------------------------------------------------------------------------
// Ollama generate API
// ---------------------------------------------------------------------------

/// Backend for a local Ollama server's generate endpoint.
///
/// Sends the whole prompt as a single string to `{base}/api/generate`
/// and reads the `response` field back.
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend.
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "prompt": format!("{}\n\n{}", prompt.system, prompt.user),
            "stream": false,
            "options": {"temperature": 0.2}
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RunnerError::Oracle(format!("Ollama request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(RunnerError::Oracle(format!(
                "Ollama returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RunnerError::Oracle(format!("Ollama response parse failed: {e}")))?;

        json.get("response")
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or_else(|| RunnerError::Oracle("Ollama response missing 'response'".to_owned()))
    }
}

// ---------------------------------------------------------------------------
// OpenAI-compatible chat completions
// ---------------------------------------------------------------------------

/// Backend for OpenAI-compatible chat completions APIs.
pub struct OpenAiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    /// Create a new OpenAI-compatible backend.
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": 0.2,
            "max_tokens": 500,
            "response_format": {"type": "json_object"}
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RunnerError::Oracle(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(RunnerError::Oracle(format!(
                "OpenAI returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RunnerError::Oracle(format!("OpenAI response parse failed: {e}")))?;

        extract_openai_content(&json)
    }
}

/// Extract the text content from an OpenAI chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, RunnerError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            RunnerError::Oracle("OpenAI response missing choices[0].message.content".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Anthropic Messages API
// ---------------------------------------------------------------------------

/// Backend for the Anthropic Messages API.
///
/// Anthropic differs from OpenAI: `x-api-key` instead of a bearer
/// token, system as a top-level field, and `content[0].text` in the
/// response.
pub struct AnthropicBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicBackend {
    /// Create a new Anthropic backend.
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let url = format!("{}/messages", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": 500,
            "system": prompt.system,
            "messages": [
                {"role": "user", "content": prompt.user}
            ]
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RunnerError::Oracle(format!("Anthropic request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(RunnerError::Oracle(format!(
                "Anthropic returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RunnerError::Oracle(format!("Anthropic response parse failed: {e}")))?;

        extract_anthropic_content(&json)
    }
}

/// Extract the text content from an Anthropic Messages API response.
fn extract_anthropic_content(json: &serde_json::Value) -> Result<String, RunnerError> {
    json.get("content")
        .and_then(|c| c.get(0))
        .and_then(|b| b.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            RunnerError::Oracle("Anthropic response missing content[0].text".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Scripted backend
// ---------------------------------------------------------------------------

/// A no-network backend that replays queued responses in order.
///
/// Once the queue runs dry every call fails like a dead endpoint, which
/// is also useful in tests. Tracks how many times it was consulted so
/// tests can assert the rule engine short-circuited the oracle.
#[derive(Default)]
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicU32,
}

impl ScriptedOracle {
    /// A scripted oracle that replays the given responses in order.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU32::new(0),
        }
    }

    /// How many times the oracle has been consulted.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn complete(&self) -> Result<String, RunnerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Ok(mut queue) = self.responses.lock() else {
            return Err(RunnerError::Oracle("scripted oracle poisoned".to_owned()));
        };
        queue
            .pop_front()
            .ok_or_else(|| RunnerError::Oracle("scripted oracle exhausted".to_owned()))
    }
}
