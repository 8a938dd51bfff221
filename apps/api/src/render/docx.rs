//! DOCX writer built on docx-rs.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use tracing::debug;

use crate::models::resume::{ResumeRecord, SectionBody};
use crate::render::RenderError;

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading1";
const LIST_BULLET: &str = "• ";

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

/// Renders the record as a Word document and returns the file bytes.
pub fn build_docx(record: &ResumeRecord) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new()
        .add_style(
            Style::new(TITLE_STYLE, StyleType::Paragraph)
                .name("Title")
                .size(52)
                .bold(),
        )
        .add_style(
            Style::new(HEADING_STYLE, StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold()
                .color("2F5496"),
        );

    let contact = record.contact.trim();
    if !contact.is_empty() {
        docx = docx.add_paragraph(text_paragraph(contact).style(TITLE_STYLE));
    }
    docx = docx.add_paragraph(Paragraph::new());

    for section in record.sections() {
        docx = docx.add_paragraph(text_paragraph(section.title).style(HEADING_STYLE));
        match section.body {
            SectionBody::Paragraph(text) => {
                docx = docx.add_paragraph(text_paragraph(&text));
            }
            SectionBody::Items(items) => {
                for item in items {
                    docx = docx.add_paragraph(text_paragraph(&format!("{LIST_BULLET}{item}")));
                }
            }
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    let bytes = buf.into_inner();
    debug!("Rendered DOCX: {} bytes", bytes.len());
    Ok(bytes)
}
