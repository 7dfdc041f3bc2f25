//! Audit records for LLM adjustment calls.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentAudit {
    pub id: Uuid,
    pub backend: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    /// SHA-256 of the raw reply, so replies can be matched without storing them.
    pub reply_hash: String,
    /// Factor after clamping; `None` when the reply was unusable.
    pub factor: Option<f64>,
    pub latency_ms: u64,
    pub called_at: chrono::DateTime<Utc>,
}

impl AdjustmentAudit {
    pub fn new(
        backend: &str,
        model: &str,
        prompt_tokens: u32,
        completion_tokens: u32,
        reply: &str,
        factor: Option<f64>,
        latency_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            backend: backend.to_string(),
            model: model.to_string(),
            prompt_tokens,
            completion_tokens,
            reply_hash: sha256_hex(reply),
            factor,
            latency_ms,
            called_at: Utc::now(),
        }
    }

    /// Emit the record on the `jeomgong::audit` target.
    pub fn log(&self) {
        tracing::info!(
            target: "jeomgong::audit",
            id = %self.id,
            backend = %self.backend,
            model = %self.model,
            prompt_tokens = self.prompt_tokens,
            completion_tokens = self.completion_tokens,
            reply_hash = %self.reply_hash,
            factor = ?self.factor,
            latency_ms = self.latency_ms,
            "LLM adjustment call"
        );
    }
}

fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}
