//! Configuration loading for Jeomgong.
//! Reads jeomgong.toml from the current directory or path in JEOMGONG_CONFIG env var.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jeomgong_common::ScoringConfig;
use jeomgong_llm::{BackendKind, BackendSpec};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "JEOMGONG_CONFIG";
pub const API_KEY_ENV: &str = "JEOMGONG_LLM_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: BackendKind,
    /// Empty → the provider's default model.
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Empty → read from JEOMGONG_LLM_API_KEY.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 15 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider:     BackendKind::None,
            model:        String::new(),
            base_url:     None,
            api_key:      String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the backend spec; `env_key` is consulted only when no key is
    /// set in the file.
    pub fn backend_spec(&self, env_key: Option<String>) -> BackendSpec {
        let api_key = if self.api_key.is_empty() {
            env_key.filter(|k| !k.is_empty())
        } else {
            Some(self.api_key.clone())
        };
        BackendSpec {
            kind:     self.provider,
            model:    self.model.clone(),
            base_url: self.base_url.clone(),
            api_key,
            timeout:  self.timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
}

fn default_history_path() -> PathBuf { PathBuf::from("jeomgong-history.json") }

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { path: default_history_path() }
    }
}


impl Config {
    /// Load configuration from jeomgong.toml.
    /// Checks JEOMGONG_CONFIG env var first, then current directory.
    /// A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| "jeomgong.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(
                "Config file not found: {}. Using defaults (no AI adjustment).",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
