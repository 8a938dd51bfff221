//! PDF writer: paints laid-out pages with the builtin Helvetica faces.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

use crate::models::resume::ResumeRecord;
use crate::render::font_metrics::Face;
use crate::render::layout::{layout_resume, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::render::RenderError;

const DOCUMENT_TITLE: &str = "Resume";
const LAYER_NAME: &str = "Layer 1";

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Renders the record as an A4 PDF and returns the file bytes.
pub fn build_pdf(record: &ResumeRecord) -> Result<Vec<u8>, RenderError> {
    let pages = layout_resume(record);

    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        pt_to_mm(PAGE_WIDTH_PT),
        pt_to_mm(PAGE_HEIGHT_PT),
        LAYER_NAME,
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(pt_to_mm(PAGE_WIDTH_PT), pt_to_mm(PAGE_HEIGHT_PT), LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for placed in page.iter().filter(|p| !p.text.is_empty()) {
            let font = match placed.face {
                Face::Regular => &regular,
                Face::Bold => &bold,
            };
            layer.use_text(
                placed.text.clone(),
                placed.size_pt,
                pt_to_mm(placed.x_pt),
                pt_to_mm(placed.y_pt),
                font,
            );
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    debug!("Rendered PDF: {} pages, {} bytes", pages.len(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pdf_produces_pdf_bytes() {
        let record = ResumeRecord {
            contact: "Ada Lovelace".to_string(),
            summary: "Mathematician.".to_string(),
            skills: vec!["Analysis".to_string()],
            ..ResumeRecord::default()
        };
        let bytes = build_pdf(&record).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_build_pdf_multi_page() {
        let record = ResumeRecord {
            projects: (0..200).map(|i| format!("Project number {i}")).collect(),
            ..ResumeRecord::default()
        };
        let bytes = build_pdf(&record).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_build_pdf_empty_record() {
        assert!(build_pdf(&ResumeRecord::default()).is_ok());
    }
}
