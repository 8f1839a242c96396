//! In-process stand-ins for the generation backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{CompletionBackend, LlmError};

/// Backend whose reply is computed by a closure over `(system, prompt)`.
/// Counts every call so tests can assert the backend was (not) reached.
pub struct FnBackend<F> {
    reply: F,
    calls: Arc<AtomicUsize>,
}

impl<F> FnBackend<F>
where
    F: Fn(&str, &str) -> Result<String, LlmError> + Send + Sync,
{
    pub fn new(reply: F) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter; stays readable after the backend is moved into an `Arc<dyn _>`.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl<F> CompletionBackend for FnBackend<F>
where
    F: Fn(&str, &str) -> Result<String, LlmError> + Send + Sync,
{
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(system, prompt)
    }
}

/// Backend that always answers with the same text.
pub fn fixed(reply: &str) -> Arc<dyn CompletionBackend> {
    let reply = reply.to_string();
    Arc::new(FnBackend::new(move |_, _| Ok(reply.clone())))
}

/// Backend that always fails like an unreachable service.
pub fn failing() -> Arc<dyn CompletionBackend> {
    Arc::new(FnBackend::new(|_, _| Err(service_unavailable())))
}

pub fn service_unavailable() -> LlmError {
    LlmError::Api {
        status: 503,
        message: "service unavailable".to_string(),
    }
}
