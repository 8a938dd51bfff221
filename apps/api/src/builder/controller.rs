//! Dialogue controller for the guided resume builder.
//!
//! Flow: compulsory questions (Q1..Q5) → one model call for follow-up
//! questions → follow-up answers (CustomQ1..) → one model call to draft the
//! resume. Slash commands short-circuit the flow at any point.
//!
//! The controller is a pure transition over `BuilderState`; the caller loads
//! the state from the session before and stores it back after.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::builder::prompts::{
    COMPULSORY_QUESTIONS, CONTINUE_REPLY, DOWNLOAD_REPLY, DRAFT_FAILED_TEXT,
    DRAFT_PROMPT_TEMPLATE, EMPTY_MESSAGE_REPLY, FALLBACK_FOLLOW_UPS, FINALIZED_REPLY,
    FOLLOW_UP_PROMPT_TEMPLATE, NOTHING_LEFT_HINT, NOT_READY_PREFIX, NO_RESUME_REPLY, READY_REPLY,
    RESTART_REPLY,
};
use crate::llm_client::prompts::RESUME_ASSISTANT_SYSTEM;
use crate::llm_client::{CompletionBackend, LlmError};
use crate::models::resume::ResumeRecord;

/// Fewer generated follow-ups than this and the static list is used instead.
const MIN_FOLLOW_UPS: usize = 3;

/// Leading list markers the model adds despite being told not to.
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+[).\s-]|[-•*]\s)").expect("valid list marker regex"));

static SKILL_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;\n]").expect("valid skill separator regex"));

// ────────────────────────────────────────────────────────────────────────────
// State
// ────────────────────────────────────────────────────────────────────────────

/// One stored answer, keyed `Q{n}` for compulsory and `CustomQ{n}` for follow-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderAnswer {
    pub key: String,
    pub question: String,
    pub answer: String,
}

/// Per-session builder progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderState {
    /// Compulsory questions answered so far (0..=5).
    pub step: usize,
    pub answers: Vec<BuilderAnswer>,
    pub custom_questions: Vec<String>,
    /// Follow-up questions answered so far.
    pub custom_step: usize,
    pub final_resume: Option<String>,
}

impl BuilderState {
    pub fn compulsory_remaining(&self) -> usize {
        COMPULSORY_QUESTIONS.len().saturating_sub(self.step)
    }

    pub fn follow_ups_remaining(&self) -> usize {
        self.custom_questions.len().saturating_sub(self.custom_step)
    }

    pub fn is_finalized(&self) -> bool {
        self.final_resume.is_some()
    }

    pub fn answer(&self, key: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.answer.as_str())
    }

    fn record_answer(&mut self, key: String, question: &str, answer: &str) {
        self.answers.retain(|a| a.key != key);
        self.answers.push(BuilderAnswer {
            key,
            question: question.to_string(),
            answer: answer.to_string(),
        });
    }

    /// Builds a renderable record from the finalized builder session.
    /// Contact comes from the first three answers, skills from Q5, and the
    /// drafted text becomes the summary.
    pub fn to_record(&self) -> Option<ResumeRecord> {
        let draft = self.final_resume.as_ref()?;

        let contact = ["Q1", "Q2", "Q3"]
            .iter()
            .filter_map(|key| self.answer(key))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ");

        let skills = self
            .answer("Q5")
            .map(|raw| {
                SKILL_SPLIT_RE
                    .split(raw)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Some(ResumeRecord {
            contact,
            summary: draft.clone(),
            skills,
            ..ResumeRecord::default()
        })
    }
}

/// JSON reply of the builder endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

impl BuilderReply {
    fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            resume: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Restart,
    Status,
    Download,
}

impl Command {
    fn parse(message: &str) -> Option<Self> {
        match message.to_lowercase().as_str() {
            "/restart_resume" => Some(Command::Restart),
            "/resume" => Some(Command::Status),
            "/download" => Some(Command::Download),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transitions
// ────────────────────────────────────────────────────────────────────────────

/// Applies one user message to the builder state and returns the reply.
///
/// Model failures never surface as errors: follow-up generation falls back to
/// a static list and drafting falls back to a fixed apology text.
pub async fn handle_message(
    state: &mut BuilderState,
    message: &str,
    backend: &dyn CompletionBackend,
) -> BuilderReply {
    let message = message.trim();
    if message.is_empty() {
        return BuilderReply::text(EMPTY_MESSAGE_REPLY);
    }

    if let Some(command) = Command::parse(message) {
        return handle_command(state, command);
    }

    if state.step < COMPULSORY_QUESTIONS.len() {
        return answer_compulsory(state, message, backend).await;
    }

    if state.custom_step < state.custom_questions.len() {
        return answer_follow_up(state, message, backend).await;
    }

    // Nothing left to collect: forget any stale follow-ups and invite the user on.
    state.custom_questions.clear();
    state.custom_step = 0;
    BuilderReply::text(CONTINUE_REPLY)
}

fn handle_command(state: &mut BuilderState, command: Command) -> BuilderReply {
    match command {
        Command::Restart => {
            *state = BuilderState::default();
            info!("Resume builder restarted");
            BuilderReply::text(RESTART_REPLY)
        }
        Command::Status => {
            if state.is_finalized() {
                return BuilderReply::text(READY_REPLY);
            }
            let mut pieces = Vec::new();
            let compulsory = state.compulsory_remaining();
            if compulsory > 0 {
                pieces.push(format!("{compulsory} compulsory question(s) remaining."));
            }
            let follow_ups = state.follow_ups_remaining();
            if follow_ups > 0 {
                pieces.push(format!("{follow_ups} follow-up question(s) remaining."));
            }
            if pieces.is_empty() {
                pieces.push(NOTHING_LEFT_HINT.to_string());
            }
            BuilderReply::text(format!("{NOT_READY_PREFIX}{}", pieces.join(" ")))
        }
        Command::Download => {
            if state.is_finalized() {
                BuilderReply::text(DOWNLOAD_REPLY)
            } else {
                BuilderReply::text(NO_RESUME_REPLY)
            }
        }
    }
}

async fn answer_compulsory(
    state: &mut BuilderState,
    message: &str,
    backend: &dyn CompletionBackend,
) -> BuilderReply {
    let index = state.step;
    state.record_answer(format!("Q{}", index + 1), COMPULSORY_QUESTIONS[index], message);
    state.step = index + 1;

    if let Some(next) = COMPULSORY_QUESTIONS.get(state.step) {
        return BuilderReply::text(*next);
    }

    let skills = state.answer("Q5").unwrap_or_default().to_string();
    state.custom_questions = generate_follow_ups(&skills, backend).await;
    state.custom_step = 0;
    info!(
        "Compulsory questions complete; {} follow-ups queued",
        state.custom_questions.len()
    );

    // generate_follow_ups never returns fewer than MIN_FOLLOW_UPS questions.
    BuilderReply::text(state.custom_questions[0].clone())
}

async fn answer_follow_up(
    state: &mut BuilderState,
    message: &str,
    backend: &dyn CompletionBackend,
) -> BuilderReply {
    let index = state.custom_step;
    let question = state.custom_questions[index].clone();
    state.record_answer(format!("CustomQ{}", index + 1), &question, message);
    state.custom_step = index + 1;

    if let Some(next) = state.custom_questions.get(state.custom_step) {
        return BuilderReply::text(next.clone());
    }

    let draft = match draft_resume(&state.answers, backend).await {
        Ok(draft) => draft,
        Err(e) => {
            warn!("Resume draft failed: {e}");
            DRAFT_FAILED_TEXT.to_string()
        }
    };
    let draft = draft.trim().to_string();
    info!("Resume draft finalized ({} chars)", draft.len());
    state.final_resume = Some(draft.clone());

    BuilderReply {
        reply: FINALIZED_REPLY.to_string(),
        resume: Some(draft),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Model calls
// ────────────────────────────────────────────────────────────────────────────

async fn generate_follow_ups(skills: &str, backend: &dyn CompletionBackend) -> Vec<String> {
    let prompt = FOLLOW_UP_PROMPT_TEMPLATE.replace("{skills}", skills);
    match backend.complete(&prompt, RESUME_ASSISTANT_SYSTEM).await {
        Ok(raw) => {
            let questions = parse_follow_ups(&raw);
            if questions.len() >= MIN_FOLLOW_UPS {
                return questions;
            }
            warn!(
                "Only {} follow-up questions generated; using fallback list",
                questions.len()
            );
        }
        Err(e) => warn!("Follow-up generation failed, using fallback list: {e}"),
    }
    FALLBACK_FOLLOW_UPS.iter().map(|q| q.to_string()).collect()
}

/// Splits model output into one question per non-empty line, removing list markers.
pub fn parse_follow_ups(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| LIST_MARKER_RE.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

async fn draft_resume(
    answers: &[BuilderAnswer],
    backend: &dyn CompletionBackend,
) -> Result<String, LlmError> {
    let answers_json = serde_json::to_string_pretty(answers)?;
    let prompt = DRAFT_PROMPT_TEMPLATE.replace("{answers_json}", &answers_json);
    backend.complete(&prompt, RESUME_ASSISTANT_SYSTEM).await
}
