//! Scripted backend for tests and offline runs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::backend::{LlmBackend, LlmError, LlmRequest, LlmResponse};

enum Scripted {
    Reply(String),
    Fail(String),
}

/// Returns queued replies in order; fails with `Unavailable` once the queue
/// is empty.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Scripted>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reply(self, content: impl Into<String>) -> Self {
        self.push(Scripted::Reply(content.into()))
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Fail(message.into()))
    }

    /// Sleep before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(self, item: Scripted) -> Self {
        if let Ok(mut q) = self.script.lock() {
            q.push_back(item);
        }
        self
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Dequeue before sleeping so replies follow request order
        let next = self.script.lock().ok().and_then(|mut q| q.pop_front());
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        match next {
            Some(Scripted::Reply(content)) => Ok(LlmResponse {
                content,
                model: "scripted".to_string(),
                prompt_tokens: 0,
                completion_tokens: 0,
            }),
            Some(Scripted::Fail(msg)) => Err(LlmError::Unavailable(msg)),
            None => Err(LlmError::Unavailable("script exhausted".to_string())),
        }
    }

    fn model_id(&self) -> &str { "scripted" }
    fn is_local(&self) -> bool { true }
}
