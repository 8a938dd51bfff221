// Resume formatting: turns a stored transcript into a structured `ResumeRecord`.
// All model calls go through llm_client.

pub mod formatter;
pub mod handlers;
pub mod prompts;

pub use formatter::structured_resume;
