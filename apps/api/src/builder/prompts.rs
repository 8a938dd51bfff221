/// Compulsory questions, asked in order before any follow-ups.
pub const COMPULSORY_QUESTIONS: [&str; 5] = [
    "What is your full name?",
    "What is your email?",
    "What is your phone number?",
    "What is your field of interest?",
    "What are your top skills?",
];

/// Used when the model's follow-up questions are missing or too few.
pub const FALLBACK_FOLLOW_UPS: [&str; 5] = [
    "Tell me about a project where you used those skills.",
    "What achievements are you most proud of?",
    "Any certifications or courses completed?",
    "What tools/technologies do you use most?",
    "What kind of roles are you targeting next?",
];

/// Follow-up generation prompt. Replace `{skills}` before sending.
pub const FOLLOW_UP_PROMPT_TEMPLATE: &str = "Generate 5 short, distinct questions (one per line) \
    to ask a candidate with skills: {skills}, to make a strong resume. Do not number them.";

/// Draft prompt. Replace `{answers_json}` before sending.
pub const DRAFT_PROMPT_TEMPLATE: &str = "Create a professional, concise resume in clean text \
    (not code) based on the following details:\n{answers_json}";

pub const DRAFT_FAILED_TEXT: &str =
    "Resume draft could not be generated automatically. Please try again.";

pub const EMPTY_MESSAGE_REPLY: &str = "⚠ Please type something.";
pub const RESTART_REPLY: &str = "🔄 Restarting… Let's start again. What is your full name?";
pub const READY_REPLY: &str = "✅ Your resume is ready! Type /download to get your PDF.";
pub const FINALIZED_REPLY: &str =
    "✅ Your resume is ready! Type /download to get the PDF or /restart_resume to start again.";
pub const NOT_READY_PREFIX: &str = "⚠ Your resume isn’t ready yet. ";
pub const NOTHING_LEFT_HINT: &str = "Say anything to continue and I’ll finalize it.";
pub const NO_RESUME_REPLY: &str =
    "⚠ No resume generated yet. Type /resume when you're done answering questions.";
pub const DOWNLOAD_REPLY: &str = "⬇ Click to download your PDF: \
    <a href='/download_resume' target='_blank'>Download Resume</a>";
pub const CONTINUE_REPLY: &str = "I’m ready to continue. Tell me more about your projects or \
    type /resume to generate your resume.";
