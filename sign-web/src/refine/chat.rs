//! Chat-completion refiner (OpenAI, Groq, local Ollama)
//!
//! All three speak the OpenAI chat-completions format. Uses ureq (sync
//! HTTP); refinement is user-triggered and off the frame path.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{RefineProvider, RefineSettings};
use super::{RefineError, Refiner};

/// System prompt for Groq and Ollama
pub const SYSTEM_PROMPT: &str = "You are an ASL (American Sign Language) translator. \
Convert ASL word sequences into proper, grammatically correct English sentences. \
ASL has different grammar from English - signs may be in different order, \
lack articles (a, an, the), and use different word forms. \
Return ONLY the refined sentence, nothing else.";

/// Shorter system prompt for OpenAI
pub const OPENAI_SYSTEM_PROMPT: &str = "You are an ASL translator. Convert ASL word sequences into \
proper English sentences. Return only the refined sentence.";

/// (system prompt, user message) for one provider
fn prompts(provider: RefineProvider, text: &str) -> (&'static str, String) {
    match provider {
        RefineProvider::OpenAi => (OPENAI_SYSTEM_PROMPT, format!("Convert: {text}")),
        _ => (
            SYSTEM_PROMPT,
            format!("Convert this ASL sequence to proper English: {text}"),
        ),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

pub struct ChatRefiner {
    settings: RefineSettings,
    url: &'static str,
    api_key: Option<String>,
    agent: ureq::Agent,
}

impl ChatRefiner {
    pub fn new(settings: RefineSettings, api_key: Option<String>) -> Result<Self, RefineError> {
        let url = settings
            .provider
            .api_url()
            .ok_or(RefineError::Disabled)?;
        if let Some(env_var) = settings.provider.env_key() {
            if api_key.as_deref().map_or(true, str::is_empty) {
                return Err(RefineError::MissingApiKey {
                    env_var: env_var.to_string(),
                });
            }
        }
        Ok(Self {
            settings,
            url,
            api_key,
            agent: make_agent(),
        })
    }

    /// Read the API key from the provider's environment variable
    pub fn from_env(settings: RefineSettings) -> Result<Self, RefineError> {
        let api_key = settings.provider.env_key().and_then(|k| env::var(k).ok());
        Self::new(settings, api_key)
    }

    pub fn provider(&self) -> RefineProvider {
        self.settings.provider
    }

    pub fn request_body(&self, text: &str) -> ChatRequest {
        let (system, user) = prompts(self.settings.provider, text);
        ChatRequest {
            model: self.settings.model().to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: system.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: user,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens(),
        }
    }
}

impl Refiner for ChatRefiner {
    fn refine(&self, words: &[String]) -> Result<String, RefineError> {
        if words.is_empty() {
            return Ok(String::new());
        }
        let text = words.join(" ");
        let body = self.request_body(&text);
        debug!(provider = self.settings.provider.as_str(), model = %body.model, "Refining sentence");

        let mut req = self
            .agent
            .post(self.url)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", &format!("Bearer {key}"));
        }

        let response = req.send_json(&body).map_err(|e| RefineError::Http {
            status: 0,
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(RefineError::Http { status, message });
        }

        let parsed: ChatResponse = response
            .into_body()
            .read_json()
            .map_err(|e| RefineError::Parse(e.to_string()))?;
        let refined = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| RefineError::Parse("no choices in response".into()))?;

        if refined.is_empty() {
            return Err(RefineError::Empty);
        }
        Ok(refined)
    }

    fn name(&self) -> &'static str {
        self.settings.provider.as_str()
    }
}
