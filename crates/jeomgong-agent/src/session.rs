//! Two-phase prediction flow for one user session.
//!
//! Each calculation first returns an instant result computed with the zero
//! adjustment, then a refined result once the adjustment provider answers.
//! A refinement is only delivered if no newer calculation has started since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use jeomgong_common::ValidationError;
use jeomgong_ranker::{
    ExternalAdjustment, ExternalAdjustmentProvider, PredictionEngine, PredictionInput,
    PredictionResult,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Caller-side form state, passed by value into each calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub institution: String,
    pub department: String,
    pub input: PredictionInput,
}

impl SessionState {
    /// `institution/department`, the saved-history key.
    pub fn key(&self) -> String {
        format!("{}/{}", self.institution.trim(), self.department.trim())
    }
}

/// Identifies one calculation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

pub struct PredictionSession {
    engine: PredictionEngine,
    provider: Arc<dyn ExternalAdjustmentProvider>,
    generation: AtomicU64,
}

impl PredictionSession {
    pub fn new(engine: PredictionEngine, provider: Arc<dyn ExternalAdjustmentProvider>) -> Self {
        Self { engine, provider, generation: AtomicU64::new(0) }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Start a calculation and return the zero-adjustment result.
    ///
    /// Supersedes every earlier ticket, even when validation fails.
    pub fn instant(
        &self,
        state: &SessionState,
        now: NaiveDateTime,
    ) -> Result<(Ticket, PredictionResult), ValidationError> {
        let ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        let input = pinned(state, now);
        let result = self.engine.predict(&input, &ExternalAdjustment::default(), now)?;
        info!(
            key = %state.key(),
            realistic = result.ranks.realistic,
            label = %result.probabilities.realistic.label,
            "Instant prediction"
        );
        Ok((ticket, result))
    }

    /// Ask the provider for an adjustment and recompute.
    ///
    /// Returns `Ok(None)` when `ticket` has been superseded while waiting.
    pub async fn refine(
        &self,
        ticket: Ticket,
        state: &SessionState,
        now: NaiveDateTime,
    ) -> Result<Option<PredictionResult>, ValidationError> {
        let input = pinned(state, now);
        let adjustment = self.provider.get_adjustment(&input).await;

        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "Discarding stale adjustment");
            return Ok(None);
        }

        let result = self.engine.predict(&input, &adjustment, now)?;
        info!(
            key = %state.key(),
            ai_factor = result.breakdown.ai_factor,
            realistic = result.ranks.realistic,
            "Refined prediction"
        );
        Ok(Some(result))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

/// Fix the analysis time so both phases and the provider prompt agree.
fn pinned(state: &SessionState, now: NaiveDateTime) -> PredictionInput {
    let mut input = state.input.clone();
    input.analysis_timestamp.get_or_insert(now);
    input
}
