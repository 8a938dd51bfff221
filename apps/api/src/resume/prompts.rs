/// Conversation → structured resume prompt. Replace `{conversation}` before sending.
pub const STRUCTURED_RESUME_PROMPT_TEMPLATE: &str = r#"Convert the following conversation into a concise, structured resume JSON.

Rules:
- Return ONLY valid JSON (no prose).
- Keys: contact (string), summary (string), education (list of strings),
        experience (list of strings), skills (list of strings), projects (list of strings)

Conversation:
{conversation}"#;
