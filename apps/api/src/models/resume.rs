use serde::{Deserialize, Deserializer, Serialize};

/// Maximum characters of raw model output kept when a structured parse fails.
const FALLBACK_SUMMARY_CHARS: usize = 800;

/// Fixed-shape resume record rendered by both document renderers.
/// Every field defaults to empty, whether missing or `null`, so partial model
/// output still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub contact: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a rendered section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody<'a> {
    Paragraph(String),
    Items(&'a [String]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub title: &'static str,
    pub body: SectionBody<'a>,
}

impl ResumeRecord {
    /// Minimal record wrapping unparseable model output as the summary.
    pub fn fallback(raw: &str) -> Self {
        Self {
            summary: raw.trim().chars().take(FALLBACK_SUMMARY_CHARS).collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contact.trim().is_empty() && self.sections().is_empty()
    }

    /// Non-empty sections in render order. Skills collapse into one
    /// comma-separated paragraph; the other lists stay itemized.
    pub fn sections(&self) -> Vec<Section<'_>> {
        let mut sections = Vec::new();

        let summary = self.summary.trim();
        if !summary.is_empty() {
            sections.push(Section {
                title: "Summary",
                body: SectionBody::Paragraph(summary.to_string()),
            });
        }
        if !self.education.is_empty() {
            sections.push(Section {
                title: "Education",
                body: SectionBody::Items(&self.education),
            });
        }
        if !self.experience.is_empty() {
            sections.push(Section {
                title: "Experience",
                body: SectionBody::Items(&self.experience),
            });
        }
        if !self.skills.is_empty() {
            sections.push(Section {
                title: "Skills",
                body: SectionBody::Paragraph(self.skills.join(", ")),
            });
        }
        if !self.projects.is_empty() {
            sections.push(Section {
                title: "Projects",
                body: SectionBody::Items(&self.projects),
            });
        }

        sections
    }
}
