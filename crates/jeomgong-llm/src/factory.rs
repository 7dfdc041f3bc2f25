//! Backend construction from configuration.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::{
    AnthropicBackend, GeminiBackend, LlmBackend, LlmError, OpenAiCompatibleBackend,
    OLLAMA_BASE_URL, OPENAI_BASE_URL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// No LLM; the zero adjustment is always used.
    #[default]
    None,
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
    Anthropic,
    Ollama,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::None             => "none",
            BackendKind::Gemini           => "gemini",
            BackendKind::OpenAi           => "openai",
            BackendKind::OpenAiCompatible => "openai_compatible",
            BackendKind::Anthropic        => "anthropic",
            BackendKind::Ollama           => "ollama",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            BackendKind::None             => "",
            BackendKind::Gemini           => "gemini-1.5-flash",
            BackendKind::OpenAi           => "gpt-4o-mini",
            BackendKind::OpenAiCompatible => "local-model",
            BackendKind::Anthropic        => "claude-3-5-haiku-latest",
            BackendKind::Ollama           => "llama3:8b",
        }
    }

    fn requires_api_key(&self) -> bool {
        matches!(self, BackendKind::Gemini | BackendKind::OpenAi | BackendKind::Anthropic)
    }
}

/// Everything needed to build one backend.
#[derive(Debug, Clone)]
pub struct BackendSpec {
    pub kind: BackendKind,
    /// Empty → the kind's default model.
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Build the configured backend. `Ok(None)` means no LLM is configured.
pub fn build_backend(spec: &BackendSpec) -> Result<Option<Arc<dyn LlmBackend>>, LlmError> {
    let model = if spec.model.is_empty() {
        spec.kind.default_model().to_string()
    } else {
        spec.model.clone()
    };
    let api_key = spec.api_key.clone().filter(|k| !k.is_empty());

    if spec.kind.requires_api_key() && api_key.is_none() {
        return Err(LlmError::MissingApiKey(spec.kind.as_str().to_string()));
    }
    // Checked just above for every kind that unwraps it
    let key = || api_key.clone().unwrap_or_default();

    let backend: Arc<dyn LlmBackend> = match spec.kind {
        BackendKind::None => return Ok(None),
        BackendKind::Gemini => {
            let mut b = GeminiBackend::new(key(), model, spec.timeout);
            if let Some(url) = &spec.base_url {
                b = b.with_base_url(url.clone());
            }
            Arc::new(b)
        }
        BackendKind::Anthropic => {
            let mut b = AnthropicBackend::new(key(), model, spec.timeout);
            if let Some(url) = &spec.base_url {
                b = b.with_base_url(url.clone());
            }
            Arc::new(b)
        }
        BackendKind::OpenAi => Arc::new(OpenAiCompatibleBackend::new(
            spec.base_url.clone().unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            model,
            api_key.clone(),
            spec.timeout,
        )),
        BackendKind::Ollama => Arc::new(OpenAiCompatibleBackend::new(
            spec.base_url.clone().unwrap_or_else(|| OLLAMA_BASE_URL.to_string()),
            model,
            None,
            spec.timeout,
        )),
        BackendKind::OpenAiCompatible => {
            let url = spec.base_url.clone().ok_or_else(|| {
                LlmError::Unavailable("openai_compatible backend needs a base_url".to_string())
            })?;
            Arc::new(OpenAiCompatibleBackend::new(url, model, api_key.clone(), spec.timeout))
        }
    };

    tracing::info!(
        backend = spec.kind.as_str(),
        model = backend.model_id(),
        is_local = backend.is_local(),
        "LLM backend ready"
    );
    Ok(Some(backend))
}
