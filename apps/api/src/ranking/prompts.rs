// All LLM prompt constants for the ranking pipeline.

/// System prompt for criteria extraction.
pub const CRITERIA_SYSTEM: &str =
    "You are an AI assistant for extracting ranking criteria from job descriptions.";

/// Criteria extraction prompt template. Replace `{jd_text}` before sending.
pub const CRITERIA_PROMPT_TEMPLATE: &str = "Extract key ranking criteria such as skills, \
certifications, experience, and qualifications from the following job description. \
Provide the results as a JSON list of strings.

Job Description:
{jd_text}";

/// System prompt for resume scoring.
pub const SCORING_SYSTEM: &str = "You are an AI assistant for evaluating resumes.";

/// Closing instruction of the scoring prompt: score range, name extraction and reply shape.
pub const SCORING_INSTRUCTIONS: &str = "For each criterion, assign a score from 0 (not present) \
to 5 (fully matches). Extract the candidate's name if available. \
Return a JSON object in the following format:
{\"candidate_name\": \"Name\", \"scores\": [score1, score2, ...]}";

pub fn build_criteria_prompt(jd_text: &str) -> String {
    CRITERIA_PROMPT_TEMPLATE.replace("{jd_text}", jd_text)
}

/// Numbered criteria (1-based, input order), then the resume verbatim, then
/// the reply contract.
pub fn build_scoring_prompt(resume_text: &str, criteria: &[String]) -> String {
    let mut prompt =
        String::from("Evaluate the following resume against these ranking criteria.\n\nCriteria:\n");
    for (idx, criterion) in criteria.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", idx + 1, criterion));
    }
    prompt.push_str("\nResume Text:\n");
    prompt.push_str(resume_text);
    prompt.push_str("\n\n");
    prompt.push_str(SCORING_INSTRUCTIONS);
    prompt
}
