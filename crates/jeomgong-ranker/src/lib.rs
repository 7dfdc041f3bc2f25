//! jeomgong-ranker — Admission rank prediction engine.
//!
//! Turns a partial score-reveal snapshot (quota, applicants, revealers, own
//! rank among revealers) into optimistic / realistic / pessimistic rank
//! estimates, a waiting-list number and an admission-likelihood tier.

pub mod input;
pub mod timing;
pub mod weights;
pub mod scorer;
pub mod classify;
pub mod adjustment;
pub mod engine;

pub use adjustment::{ExternalAdjustment, ExternalAdjustmentProvider, NoAdjustment};
pub use classify::{Probability, ProbabilityTier};
pub use engine::{predict, PredictionEngine, PredictionResult};
pub use input::PredictionInput;
