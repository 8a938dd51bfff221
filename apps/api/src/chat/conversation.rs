//! Transcript-driven chat turns. The whole transcript is replayed to the model
//! on every turn; the caller persists it back to the session afterwards.

use tracing::debug;

use crate::chat::prompts::BUILDER_GUIDE;
use crate::llm_client::prompts::{MENTOR_SYSTEM, RESUME_ASSISTANT_SYSTEM};
use crate::llm_client::{CompletionBackend, LlmError};
use crate::models::chat::{transcript_text, ChatTurn};

/// Role recorded for the model's turns in each transcript.
pub const MENTOR_ROLE: &str = "assistant";
pub const BUILDER_ROLE: &str = "ai";

pub fn build_mentor_prompt(history: &[ChatTurn]) -> String {
    format!("{}\nassistant: ", transcript_text(history))
}

pub fn build_builder_prompt(conversation: &[ChatTurn]) -> String {
    format!(
        "{BUILDER_GUIDE}\n{}\nassistant:",
        transcript_text(conversation)
    )
}

/// Appends the user turn, asks the mentor, and appends its reply.
/// On failure the user turn stays in the history.
pub async fn mentor_turn(
    history: &mut Vec<ChatTurn>,
    message: &str,
    backend: &dyn CompletionBackend,
) -> Result<String, LlmError> {
    history.push(ChatTurn::new("user", message));
    let reply = backend
        .complete(&build_mentor_prompt(history), MENTOR_SYSTEM)
        .await?;
    debug!("Mentor replied after {} turns", history.len());
    history.push(ChatTurn::new(MENTOR_ROLE, reply.clone()));
    Ok(reply)
}

/// Same as [`mentor_turn`] for the free-form builder transcript.
pub async fn builder_turn(
    conversation: &mut Vec<ChatTurn>,
    message: &str,
    backend: &dyn CompletionBackend,
) -> Result<String, LlmError> {
    conversation.push(ChatTurn::new("user", message));
    let reply = backend
        .complete(&build_builder_prompt(conversation), RESUME_ASSISTANT_SYSTEM)
        .await?;
    conversation.push(ChatTurn::new(BUILDER_ROLE, reply.clone()));
    Ok(reply)
}
