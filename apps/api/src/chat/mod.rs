// Conversational endpoints backed by the AI gateway: the career mentor chat and
// the free-form resume-builder chat whose transcript feeds document export.

pub mod conversation;
pub mod handlers;
pub mod prompts;
