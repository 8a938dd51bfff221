use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::analyzer::extract::{extract_text, DocumentKind};
use crate::analyzer::prompts::{build_ats_prompt, MISSING_INPUT_ERROR, UNSUPPORTED_FILE_ERROR};
use crate::llm_client::prompts::RESUME_ASSISTANT_SYSTEM;
use crate::state::AppState;

/// Request body cap for `/analyze_resume`, covering uploaded file and form fields.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Either the model's analysis or a user-facing error message.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Analysis { analysis: String },
    Error { error: String },
}

#[derive(Debug, Default)]
struct AnalyzeForm {
    job_description: String,
    resume_text: String,
    upload: Option<(String, Bytes)>,
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, MultipartError> {
    let mut form = AnalyzeForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "jobDescription" => form.job_description = field.text().await?,
            "resumeText" => form.resume_text = field.text().await?,
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if !file_name.is_empty() {
                    form.upload = Some((file_name, data));
                }
            }
            _ => {}
        }
    }
    Ok(form)
}

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<AnalyzeResponse>) {
    (
        status,
        Json(AnalyzeResponse::Error {
            error: message.into(),
        }),
    )
}

/// POST /analyze_resume
///
/// Multipart form: `jobDescription`, `resumeText`, optional file `resume`.
/// An uploaded file takes precedence over pasted text.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Json<AnalyzeResponse>) {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => return error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let job_description = form.job_description.trim().to_string();
    let mut resume_text = form.resume_text.trim().to_string();

    if let Some((file_name, data)) = form.upload {
        let Some(kind) = DocumentKind::from_filename(&file_name) else {
            return error(StatusCode::BAD_REQUEST, UNSUPPORTED_FILE_ERROR);
        };
        let extracted = tokio::task::spawn_blocking(move || extract_text(kind, &data)).await;
        resume_text = match extracted {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Resume extraction failed for {file_name}: {e}");
                return error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
            }
            Err(e) => {
                warn!("Resume extraction task failed for {file_name}: {e}");
                return error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "The uploaded file could not be read",
                );
            }
        };
        info!("Extracted {} chars from {file_name}", resume_text.len());
    }

    if job_description.is_empty() || resume_text.is_empty() {
        return error(StatusCode::BAD_REQUEST, MISSING_INPUT_ERROR);
    }

    let prompt = build_ats_prompt(&resume_text, &job_description);
    match state.llm.complete(&prompt, RESUME_ASSISTANT_SYSTEM).await {
        Ok(analysis) => (StatusCode::OK, Json(AnalyzeResponse::Analysis { analysis })),
        Err(e) => {
            warn!("Resume analysis failed: {e}");
            error(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
