use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;

use crate::chat::conversation::{builder_turn, mentor_turn};
use crate::chat::prompts::EMPTY_MESSAGE_REPLY;
use crate::errors::AppError;
use crate::models::chat::ChatTurn;
use crate::session;
use crate::state::AppState;

/// Body of every chat-style POST. A missing or malformed body reads as empty.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

impl ChatRequest {
    pub fn from_payload(payload: Option<Json<ChatRequest>>) -> Self {
        payload.map(|Json(req)| req).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    session: Session,
    payload: Option<Json<ChatRequest>>,
) -> Result<Json<ChatReply>, AppError> {
    let request = ChatRequest::from_payload(payload);
    let message = request.message.trim();
    if message.is_empty() {
        return Ok(Json(ChatReply {
            reply: EMPTY_MESSAGE_REPLY.to_string(),
        }));
    }

    let mut history: Vec<ChatTurn> = session::load(&session, session::CHAT_SESSION).await?;
    let result = mentor_turn(&mut history, message, state.llm.as_ref()).await;
    session::store(&session, session::CHAT_SESSION, &history).await?;

    let reply = result.unwrap_or_else(|e| {
        warn!("Mentor chat failed: {e}");
        format!("Error: {e}")
    });
    Ok(Json(ChatReply { reply }))
}

/// POST /resume_builder
///
/// Free-form builder chat. The transcript is what /generate_resume and
/// /generate_resume_docx later turn into a document.
pub async fn handle_resume_builder_chat(
    State(state): State<AppState>,
    session: Session,
    payload: Option<Json<ChatRequest>>,
) -> Result<Json<ChatReply>, AppError> {
    let request = ChatRequest::from_payload(payload);
    let message = request.message.trim();
    if message.is_empty() {
        return Ok(Json(ChatReply {
            reply: EMPTY_MESSAGE_REPLY.to_string(),
        }));
    }

    let mut conversation: Vec<ChatTurn> = session::load(&session, session::CONVERSATION).await?;
    let result = builder_turn(&mut conversation, message, state.llm.as_ref()).await;
    session::store(&session, session::CONVERSATION, &conversation).await?;

    let reply = result.unwrap_or_else(|e| {
        warn!("Builder chat failed: {e}");
        format!("Error: {e}")
    });
    Ok(Json(ChatReply { reply }))
}
