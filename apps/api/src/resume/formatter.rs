//! Conversation → `ResumeRecord` conversion with a best-effort fallback.

use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, CompletionBackend, LlmError};
use crate::models::chat::{transcript_text, ChatTurn};
use crate::models::resume::ResumeRecord;
use crate::resume::prompts::STRUCTURED_RESUME_PROMPT_TEMPLATE;

pub fn build_structured_prompt(conversation: &[ChatTurn]) -> String {
    STRUCTURED_RESUME_PROMPT_TEMPLATE.replace("{conversation}", &transcript_text(conversation))
}

/// Asks the model for a structured resume. Output that is not JSON of the
/// expected shape becomes a summary-only record; only a failed call errors.
pub async fn structured_resume(
    conversation: &[ChatTurn],
    backend: &dyn CompletionBackend,
) -> Result<ResumeRecord, LlmError> {
    let prompt = build_structured_prompt(conversation);
    let raw = backend.complete(&prompt, JSON_ONLY_SYSTEM).await?;
    Ok(parse_resume_output(&raw))
}

/// Parses model output into a record, falling back to the raw text as summary.
pub fn parse_resume_output(raw: &str) -> ResumeRecord {
    match serde_json::from_str::<ResumeRecord>(strip_json_fences(raw)) {
        Ok(record) => {
            info!(
                "Structured resume parsed: {} education, {} experience, {} skills, {} projects",
                record.education.len(),
                record.experience.len(),
                record.skills.len(),
                record.projects.len()
            );
            record
        }
        Err(e) => {
            warn!("Structured resume output was not valid JSON ({e}); using fallback record");
            ResumeRecord::fallback(raw)
        }
    }
}
