//! Plain-text extraction from uploaded resume files.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Classifies an upload by file extension. `.doc` is accepted and read as DOCX.
    pub fn from_filename(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())?;
        match extension.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" | "doc" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// Extracts trimmed text from the document bytes.
pub fn extract_text(kind: DocumentKind, data: &[u8]) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?,
        DocumentKind::Docx => {
            extract_docx_text(data).map_err(|e| ExtractError::Docx(e.to_string()))?
        }
    };
    Ok(text.trim().to_string())
}

/// Reads `word/document.xml` and returns one line per non-empty paragraph.
pub fn extract_docx_text(data: &[u8]) -> anyhow::Result<String> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut document_file = archive.by_name("word/document.xml")?;
    let mut xml = String::new();
    document_file.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => current.push(' '),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if !current.trim().is_empty() {
                        lines.push(current.trim().to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    current.push_str(&e.xml_content()?);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text {
                    if let Some(c) = resolve_entity(&e.decode()?) {
                        current.push(c);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.into()),
            _ => {}
        }

        buf.clear();
    }

    Ok(lines.join("\n"))
}

/// Resolves the predefined XML entities and numeric character references.
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}
