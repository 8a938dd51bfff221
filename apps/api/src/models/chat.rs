use serde::{Deserialize, Serialize};

/// One message of a stored transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Renders a transcript as `role: content` lines, the shape every prompt uses.
pub fn transcript_text(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_text_one_line_per_turn() {
        let turns = vec![
            ChatTurn::new("user", "I like robots"),
            ChatTurn::new("assistant", "Have you looked at robotics?"),
        ];
        assert_eq!(
            transcript_text(&turns),
            "user: I like robots\nassistant: Have you looked at robotics?"
        );
    }

    #[test]
    fn test_transcript_text_empty() {
        assert_eq!(transcript_text(&[]), "");
    }
}
