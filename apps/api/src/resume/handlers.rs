//! Document export endpoints.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::{info, warn};

use crate::builder::controller::BuilderState;
use crate::errors::AppError;
use crate::models::chat::ChatTurn;
use crate::models::resume::ResumeRecord;
use crate::render::docx::build_docx;
use crate::render::pdf::build_pdf;
use crate::render::{RenderError, DOCX_FILENAME, DOCX_MIME, PDF_FILENAME, PDF_MIME};
use crate::resume::structured_resume;
use crate::session;
use crate::state::AppState;

pub async fn render_pdf(record: ResumeRecord) -> Result<Vec<u8>, RenderError> {
    tokio::task::spawn_blocking(move || build_pdf(&record)).await?
}

pub async fn render_docx(record: ResumeRecord) -> Result<Vec<u8>, RenderError> {
    tokio::task::spawn_blocking(move || build_docx(&record)).await?
}

fn attachment(bytes: Vec<u8>, mime: &str, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// POST /generate_resume
///
/// Converts the free-form builder conversation into a structured record,
/// remembers it for DOCX export, and returns it as a PDF.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let conversation: Vec<ChatTurn> = session::load(&session, session::CONVERSATION).await?;
    if conversation.is_empty() {
        return Err(AppError::Plain(StatusCode::BAD_REQUEST, "No conversation yet."));
    }

    let record = structured_resume(&conversation, state.llm.as_ref()).await?;
    if record.is_empty() {
        warn!("Structured resume has no content; rendering an empty document");
    }
    session::store(&session, session::RESUME_JSON, &record).await?;

    let bytes = render_pdf(record).await?;
    info!("Generated PDF resume ({} bytes)", bytes.len());
    Ok(attachment(bytes, PDF_MIME, PDF_FILENAME))
}

/// POST /generate_resume_docx
///
/// Reuses the record from the last PDF export when present; otherwise builds
/// one from the conversation.
pub async fn handle_generate_resume_docx(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let record = match session::load_opt::<ResumeRecord>(&session, session::RESUME_JSON).await? {
        Some(record) => record,
        None => {
            let conversation: Vec<ChatTurn> =
                session::load(&session, session::CONVERSATION).await?;
            if conversation.is_empty() {
                return Err(AppError::Plain(
                    StatusCode::BAD_REQUEST,
                    "No data to build resume.",
                ));
            }
            let record = structured_resume(&conversation, state.llm.as_ref()).await?;
            session::store(&session, session::RESUME_JSON, &record).await?;
            record
        }
    };

    let bytes = render_docx(record).await?;
    info!("Generated DOCX resume ({} bytes)", bytes.len());
    Ok(attachment(bytes, DOCX_MIME, DOCX_FILENAME))
}

/// GET /download_resume
///
/// PDF of the guided builder's finalized resume.
pub async fn handle_download_resume(session: Session) -> Result<Response, AppError> {
    let builder: BuilderState = session::load(&session, session::RESUME_BUILDER).await?;
    let record = builder.to_record().ok_or(AppError::Plain(
        StatusCode::BAD_REQUEST,
        "No resume generated yet.",
    ))?;

    let bytes = render_pdf(record).await?;
    Ok(attachment(bytes, PDF_MIME, PDF_FILENAME))
}
