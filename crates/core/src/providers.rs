//! HTTP-backed AI providers implementing [`Translator`].
//!
//! Three request shapes are supported: Ollama's generate endpoint, the OpenAI chat
//! completions API (and compatible servers) and the Anthropic messages API.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::translation::{Prompt, Translator};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MAX_TOKENS: u32 = 300;
const EXCERPT_LENGTH: usize = 200;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Ollama,
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    fn path(self) -> &'static str {
        match self {
            ProviderKind::Ollama => "/api/generate",
            ProviderKind::OpenAi => "/v1/chat/completions",
            ProviderKind::Anthropic => "/v1/messages",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            _ => Err(Error::UnknownProviderKind(value.to_string())),
        }
    }
}

/// Connection settings for one provider, as stored in the configuration file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub endpoint: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ProviderSettings {
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an http(s) URL.
    pub fn new(
        kind: ProviderKind,
        endpoint: &str,
        model: &str,
        api_key: Option<String>,
    ) -> Result<Self> {
        validate_endpoint(endpoint)?;

        Ok(Self {
            kind,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), self.kind.path())
    }
}

/// # Errors
///
/// Returns [`Error::InvalidEndpoint`] unless `endpoint` starts with `http://` or `https://`.
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::InvalidEndpoint(endpoint.to_string()))
    }
}

#[derive(Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// A provider reached over blocking HTTP.
pub struct HttpTranslator {
    settings: ProviderSettings,
    agent: ureq::Agent,
}

impl HttpTranslator {
    /// # Errors
    ///
    /// Returns an error if the configured endpoint is not an http(s) URL.
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        validate_endpoint(&settings.endpoint)?;

        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Ok(Self { settings, agent })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn request_body(&self, prompt: &Prompt) -> Value {
        let model = &self.settings.model;

        match self.settings.kind {
            ProviderKind::Ollama => json!({
                "model": model,
                "prompt": format!("{}\n\n{}", prompt.system, prompt.user),
                "stream": false,
            }),
            ProviderKind::OpenAi => json!({
                "model": model,
                "messages": [
                    { "role": "system", "content": prompt.system },
                    { "role": "user", "content": prompt.user },
                ],
                "temperature": prompt.temperature,
            }),
            ProviderKind::Anthropic => json!({
                "model": model,
                "system": prompt.system,
                "messages": [
                    { "role": "user", "content": prompt.user },
                ],
                "max_tokens": ANTHROPIC_MAX_TOKENS,
            }),
        }
    }

    fn send(&self, body: Value) -> Result<String> {
        let url = self.settings.url();
        debug!("Sending {} request to `{}`", self.settings.kind, url);

        let mut request = self.agent.post(&url).set("Content-Type", "application/json");

        if let Some(api_key) = &self.settings.api_key {
            request = match self.settings.kind {
                ProviderKind::Anthropic => request
                    .set("x-api-key", api_key)
                    .set("anthropic-version", ANTHROPIC_VERSION),
                _ => request.set("Authorization", &format!("Bearer {api_key}")),
            };
        } else if self.settings.kind == ProviderKind::Anthropic {
            request = request.set("anthropic-version", ANTHROPIC_VERSION);
        }

        match request.send_json(body) {
            Ok(response) => response.into_string().map_err(|e| {
                Error::TranslationFailure(format!(
                    "could not read the {} response: {e}",
                    self.settings.kind
                ))
            }),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(status_failure(self.settings.kind, status, &body))
            }
            Err(ureq::Error::Transport(transport)) => Err(transport_failure(
                self.settings.kind,
                &self.settings.endpoint,
                &transport.to_string(),
            )),
        }
    }
}

impl Translator for HttpTranslator {
    fn complete(&self, prompt: &Prompt) -> Result<String> {
        let body = self.send(self.request_body(prompt))?;
        extract_text(self.settings.kind, &body)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_LENGTH).collect()
}

fn malformed(kind: ProviderKind, body: &str) -> Error {
    Error::TranslationFailure(format!(
        "malformed response from {kind}: {}",
        excerpt(body)
    ))
}

fn status_failure(kind: ProviderKind, status: u16, body: &str) -> Error {
    match status {
        401 | 403 => Error::TranslationFailure(format!(
            "authentication with {kind} failed (HTTP {status}). Check the API key with `aliasctl configure-ai`."
        )),
        _ => Error::TranslationFailure(format!(
            "{kind} returned HTTP {status}: {}",
            excerpt(body)
        )),
    }
}

fn transport_failure(kind: ProviderKind, endpoint: &str, cause: &str) -> Error {
    let hint = match kind {
        ProviderKind::Ollama => " Is Ollama running? Start it with `ollama serve`.",
        _ => " Check your network connection and the configured endpoint.",
    };

    Error::TranslationFailure(format!(
        "could not reach {kind} at `{endpoint}`: {cause}.{hint}"
    ))
}

/// Pulls the completion text out of a provider's JSON answer.
fn extract_text(kind: ProviderKind, body: &str) -> Result<String> {
    let text = match kind {
        ProviderKind::Ollama => {
            let response: OllamaResponse =
                serde_json::from_str(body).map_err(|_| malformed(kind, body))?;
            if let Some(error) = response.error.filter(|error| !error.is_empty()) {
                return Err(Error::TranslationFailure(format!(
                    "ollama reported an error: {error}"
                )));
            }
            response.response
        }
        ProviderKind::OpenAi => {
            let response: ChatResponse =
                serde_json::from_str(body).map_err(|_| malformed(kind, body))?;
            response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| malformed(kind, body))?
        }
        ProviderKind::Anthropic => {
            let response: MessagesResponse =
                serde_json::from_str(body).map_err(|_| malformed(kind, body))?;
            response
                .content
                .into_iter()
                .next()
                .map(|block| block.text)
                .ok_or_else(|| malformed(kind, body))?
        }
    };

    if text.trim().is_empty() {
        return Err(malformed(kind, body));
    }

    Ok(text.trim().to_string())
}
