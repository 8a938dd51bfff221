/// ATS evaluator instructions, sent ahead of the resume and job description.
const ATS_TASKS: &str = r#"You are an advanced Applicant Tracking System (ATS) evaluator.

TASKS:
1. Calculate an ATS Compatibility Score (0-100) of the resume against the job description.
2. Provide detailed suggestions on how the resume can be improved to match the job description better (skills, keywords, formatting, etc.).
3. Suggest job opportunities / roles that the candidate could apply for, based on their resume content and skillset."#;

const ATS_RESPONSE_FORMAT: &str = r#"Respond in the following structured format:
- ATS Score: <score out of 100>
- Suggestions: <bullet points>
- Job Opportunities: <list of possible job roles>"#;

pub const UNSUPPORTED_FILE_ERROR: &str = "Only PDF or DOCX files are supported";
pub const MISSING_INPUT_ERROR: &str = "⚠️ Resume text/file and job description are required";

/// User text is interpolated once and never rescanned, so braces in a resume
/// or job description are kept literally.
pub fn build_ats_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{ATS_TASKS}\n\nResume:\n{resume_text}\n\nJob Description:\n{job_description}\n\n{ATS_RESPONSE_FORMAT}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_places_resume_before_job_description() {
        let prompt = build_ats_prompt("Ada, Rust and maths", "Rust engineer");
        let resume_at = prompt.find("Resume:\nAda, Rust and maths").unwrap();
        let job_at = prompt.find("Job Description:\nRust engineer").unwrap();
        assert!(resume_at < job_at);
        assert!(prompt.ends_with("- Job Opportunities: <list of possible job roles>"));
    }

    #[test]
    fn test_braces_in_user_text_are_kept_literally() {
        let prompt = build_ats_prompt(
            "Built a {job_description} templating engine",
            "Needs {resume_text} parsing",
        );
        assert!(prompt.contains("Resume:\nBuilt a {job_description} templating engine\n"));
        assert!(prompt.contains("Job Description:\nNeeds {resume_text} parsing\n"));
    }
}
