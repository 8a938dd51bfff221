// Document rendering: turns a `ResumeRecord` into PDF or DOCX bytes.
// Rendering is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod docx;
pub mod font_metrics;
pub mod layout;
pub mod pdf;
pub mod text;

use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_FILENAME: &str = "My_Resume.pdf";
pub const DOCX_FILENAME: &str = "My_Resume.docx";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
