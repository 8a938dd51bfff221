use axum::{extract::State, Json};
use tower_sessions::Session;

use crate::builder::controller::{handle_message, BuilderReply, BuilderState};
use crate::chat::handlers::ChatRequest;
use crate::errors::AppError;
use crate::session;
use crate::state::AppState;

/// POST /builder
///
/// One step of the guided builder: load progress, apply the message, save it back.
pub async fn handle_builder(
    State(state): State<AppState>,
    session: Session,
    payload: Option<Json<ChatRequest>>,
) -> Result<Json<BuilderReply>, AppError> {
    let request = ChatRequest::from_payload(payload);

    let mut builder: BuilderState = session::load(&session, session::RESUME_BUILDER).await?;
    let reply = handle_message(&mut builder, &request.message, state.llm.as_ref()).await;
    session::store(&session, session::RESUME_BUILDER, &builder).await?;

    Ok(Json(reply))
}
