//! jeomgong-llm — LLM backends and the LLM-backed adjustment provider.
//!
//! The provider asks a model for a small correction to the base weight and
//! never fails: any error collapses to the neutral adjustment.

pub mod backend;
pub mod factory;
pub mod prompt;
pub mod provider;
pub mod audit;
pub mod mock;

pub use backend::{LlmBackend, LlmError, LlmRequest, LlmResponse, Message};
pub use factory::{build_backend, BackendKind, BackendSpec};
pub use provider::LlmAdjustmentProvider;
