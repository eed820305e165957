//! Refine module - turns committed sign glosses into an English sentence
//!
//! Refinement may fail or be unconfigured; callers fall back to
//! `fallback_format`.

mod basic;
#[cfg(feature = "llm")]
mod chat;
mod provider;

pub use basic::{fallback_format, BasicRefiner};
#[cfg(feature = "llm")]
pub use chat::{ChatMessage, ChatRefiner, ChatRequest, OPENAI_SYSTEM_PROMPT, SYSTEM_PROMPT};
pub use provider::{RefineProvider, RefineSettings};

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum RefineError {
    #[error("missing API key: {env_var} not set")]
    MissingApiKey { env_var: String },

    #[error("refinement request failed: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("failed to parse refinement response: {0}")]
    Parse(String),

    #[error("refinement returned an empty sentence")]
    Empty,

    #[error("refinement provider disabled")]
    Disabled,
}

pub trait Refiner: Send + Sync {
    fn refine(&self, words: &[String]) -> Result<String, RefineError>;

    fn name(&self) -> &'static str;
}

/// Refiner for `settings`, degrading to `BasicRefiner` when the provider is
/// unavailable
pub fn build_refiner(settings: &RefineSettings) -> Box<dyn Refiner> {
    if settings.provider == RefineProvider::None {
        return Box::new(BasicRefiner);
    }

    #[cfg(feature = "llm")]
    {
        match ChatRefiner::from_env(settings.clone()) {
            Ok(refiner) => Box::new(refiner),
            Err(e) => {
                warn!(provider = settings.provider.as_str(), error = %e, "Using basic formatting");
                Box::new(BasicRefiner)
            }
        }
    }

    #[cfg(not(feature = "llm"))]
    {
        warn!(
            provider = settings.provider.as_str(),
            "Built without the llm feature, using basic formatting"
        );
        Box::new(BasicRefiner)
    }
}
