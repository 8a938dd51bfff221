//! Scripted completion backend for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionBackend, LlmError};

/// Replays queued replies in order and records every prompt it receives.
/// `Err` entries surface as a 500 API error; an empty queue does too.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(replies.into_iter().map(|r| Ok(r.into())))
    }

    pub fn with_results<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, String>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::with_results(std::iter::empty())
    }

    /// `(prompt, system)` pairs in call order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), system.to_string()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LlmError::Api {
                status: 500,
                message,
            }),
            None => Err(LlmError::Api {
                status: 500,
                message: "no scripted reply".to_string(),
            }),
        }
    }
}
