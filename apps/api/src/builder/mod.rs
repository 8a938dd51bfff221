// Guided resume builder: the per-session dialogue controller that walks a user
// through compulsory questions, model-generated follow-ups, and finalization.

pub mod controller;
pub mod handlers;
pub mod prompts;
