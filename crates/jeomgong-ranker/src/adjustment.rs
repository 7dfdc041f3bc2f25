//! External micro-adjustment of the base weight.
//!
//! The engine consumes an opaque `{factor, reason}` pair. Where it comes
//! from (an LLM call, a heuristic, nothing at all) is a strategy chosen by
//! the caller through [`ExternalAdjustmentProvider`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::input::PredictionInput;

/// Contractual bound on `factor`.
pub const MAX_ADJUSTMENT: f64 = 0.09;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalAdjustment {
    /// Added to the auto-derived base weight, in [-0.09, 0.09].
    pub factor: f64,
    /// Advisory text; never used in computation.
    pub reason: String,
}

impl Default for ExternalAdjustment {
    fn default() -> Self {
        Self::neutral("")
    }
}

impl ExternalAdjustment {
    /// Build an adjustment, clamping `factor` into the contractual bound.
    /// Non-finite factors collapse to zero.
    pub fn bounded(factor: f64, reason: impl Into<String>) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT)
        } else {
            0.0
        };
        Self { factor, reason: reason.into() }
    }

    /// The zero adjustment, annotated with why it is zero.
    pub fn neutral(reason: impl Into<String>) -> Self {
        Self { factor: 0.0, reason: reason.into() }
    }

    pub fn is_neutral(&self) -> bool {
        self.factor == 0.0
    }
}

/// Best-effort source of an [`ExternalAdjustment`].
///
/// Implementations must not fail: any internal error is reported as
/// `ExternalAdjustment::neutral(<diagnostic>)`.
#[async_trait]
pub trait ExternalAdjustmentProvider: Send + Sync {
    async fn get_adjustment(&self, input: &PredictionInput) -> ExternalAdjustment;

    fn name(&self) -> &str;
}

/// Always returns the zero adjustment.
#[derive(Debug, Clone, Default)]
pub struct NoAdjustment;

#[async_trait]
impl ExternalAdjustmentProvider for NoAdjustment {
    async fn get_adjustment(&self, _input: &PredictionInput) -> ExternalAdjustment {
        ExternalAdjustment::neutral("AI analysis disabled")
    }

    fn name(&self) -> &str { "none" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_clamps_factor() {
        assert_eq!(ExternalAdjustment::bounded(0.5, "x").factor, MAX_ADJUSTMENT);
        assert_eq!(ExternalAdjustment::bounded(-0.5, "x").factor, -MAX_ADJUSTMENT);
        assert_eq!(ExternalAdjustment::bounded(0.03, "x").factor, 0.03);
        assert_eq!(ExternalAdjustment::bounded(f64::NAN, "x").factor, 0.0);
        assert_eq!(ExternalAdjustment::bounded(f64::INFINITY, "x").factor, 0.0);
    }

    #[test]
    fn test_default_is_neutral() {
        assert!(ExternalAdjustment::default().is_neutral());
    }

    #[tokio::test]
    async fn test_no_adjustment_is_neutral() {
        let input = PredictionInput::new(10, 40, 20, 3);
        let adj = NoAdjustment.get_adjustment(&input).await;
        assert!(adj.is_neutral());
        assert_eq!(NoAdjustment.name(), "none");
    }
}
