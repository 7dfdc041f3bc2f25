//! LLM-backed [`ExternalAdjustmentProvider`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jeomgong_ranker::{ExternalAdjustment, ExternalAdjustmentProvider, PredictionInput};
use tracing::{debug, warn};

use crate::audit::AdjustmentAudit;
use crate::backend::{LlmBackend, LlmError};
use crate::prompt::{build_request, parse_reply};

/// Prefix of every neutral fallback reason.
pub const UNAVAILABLE_PREFIX: &str = "AI analysis unavailable";

pub struct LlmAdjustmentProvider {
    backend: Arc<dyn LlmBackend>,
    backend_name: String,
    timeout: Duration,
}

impl LlmAdjustmentProvider {
    pub fn new(backend: Arc<dyn LlmBackend>, backend_name: impl Into<String>, timeout: Duration) -> Self {
        Self { backend, backend_name: backend_name.into(), timeout }
    }

    async fn try_adjustment(&self, input: &PredictionInput) -> Result<ExternalAdjustment, LlmError> {
        let now = chrono::Local::now().naive_local();
        let req = build_request(input, now);

        let started = Instant::now();
        let resp = tokio::time::timeout(self.timeout, self.backend.complete(req))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;
        let latency_ms = started.elapsed().as_millis() as u64;

        let parsed = parse_reply(&resp.content)
            .map(|(raw, reason)| (raw, ExternalAdjustment::bounded(raw, reason)));

        AdjustmentAudit::new(
            &self.backend_name,
            &resp.model,
            resp.prompt_tokens,
            resp.completion_tokens,
            &resp.content,
            parsed.as_ref().ok().map(|(_, adj)| adj.factor),
            latency_ms,
        )
        .log();

        let (raw, adjustment) = parsed?;
        if adjustment.factor != raw {
            debug!(raw, clamped = adjustment.factor, "Clamped out-of-range adjustment factor");
        }
        Ok(adjustment)
    }
}

#[async_trait]
impl ExternalAdjustmentProvider for LlmAdjustmentProvider {
    async fn get_adjustment(&self, input: &PredictionInput) -> ExternalAdjustment {
        match self.try_adjustment(input).await {
            Ok(adj) => {
                debug!(factor = adj.factor, reason = %adj.reason, "LLM adjustment received");
                adj
            }
            Err(e) => {
                warn!(backend = %self.backend_name, error = %e, "Falling back to neutral adjustment");
                ExternalAdjustment::neutral(format!("{UNAVAILABLE_PREFIX}: {e}"))
            }
        }
    }

    fn name(&self) -> &str {
        &self.backend_name
    }
}
