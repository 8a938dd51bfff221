//! Page layout for the PDF renderer.
//!
//! Produces absolutely positioned text lines per page, in points with the
//! origin at the bottom-left corner, the way PDF content streams expect.
//! Keeping layout separate from the PDF writer makes it testable on its own.

use crate::models::resume::{ResumeRecord, SectionBody};
use crate::render::font_metrics::{get_metrics, Face};
use crate::render::text::to_pdf_safe;

/// A4 in points.
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;

const MARGIN_LEFT_PT: f32 = 36.0;
const MARGIN_RIGHT_PT: f32 = 36.0;
const MARGIN_TOP_PT: f32 = 54.0;
const MARGIN_BOTTOM_PT: f32 = 36.0;

const BULLET: &str = "-";
const BULLET_INDENT_PT: f32 = 12.0;
const BULLET_TEXT_GAP_PT: f32 = 8.0;

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    face: Face,
    size_pt: f32,
    leading_pt: f32,
    space_before_pt: f32,
    space_after_pt: f32,
}

const TITLE: TextStyle = TextStyle {
    face: Face::Bold,
    size_pt: 20.0,
    leading_pt: 24.0,
    space_before_pt: 0.0,
    space_after_pt: 8.0,
};

const SECTION_HEADER: TextStyle = TextStyle {
    face: Face::Bold,
    size_pt: 14.0,
    leading_pt: 17.0,
    space_before_pt: 10.0,
    space_after_pt: 6.0,
};

const BODY: TextStyle = TextStyle {
    face: Face::Regular,
    size_pt: 10.0,
    leading_pt: 12.0,
    space_before_pt: 0.0,
    space_after_pt: 2.0,
};

/// Vertical gap after the contact block (0.15 in).
const AFTER_TITLE_GAP_PT: f32 = 10.8;
/// Vertical gap after each section (0.08 in).
const AFTER_SECTION_GAP_PT: f32 = 5.76;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x_pt: f32,
    /// Baseline position measured from the bottom edge.
    pub y_pt: f32,
    pub size_pt: f32,
    pub face: Face,
}

pub type Page = Vec<PlacedText>;

struct Cursor {
    pages: Vec<Page>,
    /// Top of the next line, measured from the bottom edge.
    y_pt: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y_pt: PAGE_HEIGHT_PT - MARGIN_TOP_PT,
        }
    }

    fn gap(&mut self, pt: f32) {
        self.y_pt = (self.y_pt - pt).max(MARGIN_BOTTOM_PT);
    }

    fn ensure_room(&mut self, leading_pt: f32) {
        if self.y_pt - leading_pt < MARGIN_BOTTOM_PT {
            self.pages.push(Vec::new());
            self.y_pt = PAGE_HEIGHT_PT - MARGIN_TOP_PT;
        }
    }

    fn place(&mut self, text: String, x_pt: f32, style: &TextStyle) {
        self.ensure_room(style.leading_pt);
        let baseline = self.y_pt - style.size_pt;
        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedText {
                text,
                x_pt,
                y_pt: baseline,
                size_pt: style.size_pt,
                face: style.face,
            });
        }
        self.y_pt -= style.leading_pt;
    }

    fn paragraph(&mut self, text: &str, x_pt: f32, width_pt: f32, style: &TextStyle) {
        self.gap(style.space_before_pt);
        for line in get_metrics(style.face).wrap(text, style.size_pt, width_pt) {
            self.place(line, x_pt, style);
        }
        self.gap(style.space_after_pt);
    }

    fn bullet_item(&mut self, text: &str, width_pt: f32) {
        let bullet_x = MARGIN_LEFT_PT + BULLET_INDENT_PT;
        let text_x = bullet_x + BULLET_TEXT_GAP_PT;
        let text_width = width_pt - (text_x - MARGIN_LEFT_PT);
        let lines = get_metrics(BODY.face).wrap(text, BODY.size_pt, text_width);
        for (i, line) in lines.into_iter().enumerate() {
            self.ensure_room(BODY.leading_pt);
            if i == 0 {
                let baseline = self.y_pt - BODY.size_pt;
                if let Some(page) = self.pages.last_mut() {
                    page.push(PlacedText {
                        text: BULLET.to_string(),
                        x_pt: bullet_x,
                        y_pt: baseline,
                        size_pt: BODY.size_pt,
                        face: BODY.face,
                    });
                }
            }
            self.place(line, text_x, &BODY);
        }
        self.gap(BODY.space_after_pt);
    }
}

/// Lays out a resume record onto as many A4 pages as it needs.
pub fn layout_resume(record: &ResumeRecord) -> Vec<Page> {
    let width = PAGE_WIDTH_PT - MARGIN_LEFT_PT - MARGIN_RIGHT_PT;
    let mut cursor = Cursor::new();

    let contact = to_pdf_safe(record.contact.trim());
    if !contact.trim().is_empty() {
        cursor.paragraph(&contact, MARGIN_LEFT_PT, width, &TITLE);
        cursor.gap(AFTER_TITLE_GAP_PT);
    }

    for section in record.sections() {
        cursor.paragraph(section.title, MARGIN_LEFT_PT, width, &SECTION_HEADER);
        match section.body {
            SectionBody::Paragraph(text) => {
                cursor.paragraph(&to_pdf_safe(&text), MARGIN_LEFT_PT, width, &BODY);
            }
            SectionBody::Items(items) => {
                for item in items {
                    cursor.bullet_item(&to_pdf_safe(item), width);
                }
            }
        }
        cursor.gap(AFTER_SECTION_GAP_PT);
    }

    cursor.pages
}
