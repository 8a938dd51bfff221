// Resume analyzer: extracts text from an uploaded resume and asks the model for
// an ATS-style evaluation against a job description.

pub mod extract;
pub mod handlers;
pub mod prompts;
