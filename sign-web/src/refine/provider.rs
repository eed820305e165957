//! Refinement provider selection and settings

use serde::{Deserialize, Serialize};

/// Chat-completion services that can refine sentences
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefineProvider {
    /// Local formatting only
    #[default]
    None,
    #[serde(rename = "openai")]
    OpenAi,
    Groq,
    Ollama,
}

impl RefineProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefineProvider::None => "none",
            RefineProvider::OpenAi => "openai",
            RefineProvider::Groq => "groq",
            RefineProvider::Ollama => "ollama",
        }
    }

    /// Environment variable holding the API key, if the provider needs one
    pub fn env_key(&self) -> Option<&'static str> {
        match self {
            RefineProvider::OpenAi => Some("OPENAI_API_KEY"),
            RefineProvider::Groq => Some("GROQ_API_KEY"),
            RefineProvider::None | RefineProvider::Ollama => None,
        }
    }

    pub fn api_url(&self) -> Option<&'static str> {
        match self {
            RefineProvider::None => None,
            RefineProvider::OpenAi => Some("https://api.openai.com/v1/chat/completions"),
            RefineProvider::Groq => Some("https://api.groq.com/openai/v1/chat/completions"),
            RefineProvider::Ollama => Some("http://localhost:11434/v1/chat/completions"),
        }
    }

    /// Response budget when the settings leave `max_tokens` unset
    pub fn default_max_tokens(&self) -> u32 {
        match self {
            RefineProvider::OpenAi => 150,
            RefineProvider::None | RefineProvider::Groq | RefineProvider::Ollama => 200,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            RefineProvider::None => "",
            RefineProvider::OpenAi => "gpt-3.5-turbo",
            RefineProvider::Groq => "mixtral-8x7b-32768",
            RefineProvider::Ollama => "llama3",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineSettings {
    pub provider: RefineProvider,
    /// Empty selects the provider default
    pub model: String,
    pub temperature: f32,
    /// Unset selects the provider default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for RefineSettings {
    fn default() -> Self {
        Self {
            provider: RefineProvider::None,
            model: String::new(),
            temperature: 0.3,
            max_tokens: None,
        }
    }
}

impl RefineSettings {
    pub fn model(&self) -> &str {
        if self.model.is_empty() {
            self.provider.default_model()
        } else {
            self.model.as_str()
        }
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or_else(|| self.provider.default_max_tokens())
    }
}
