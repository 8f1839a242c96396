//! Criteria Extractor: turns job-description text into an ordered list of
//! ranking criteria with one backend call.
//!
//! Never fails: a backend error yields an empty list, and a reply that is
//! not a JSON array of strings is split into lines instead.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::llm_client::sanitize::sanitize;
use crate::llm_client::CompletionBackend;
use crate::ranking::prompts::{build_criteria_prompt, CRITERIA_SYSTEM};
use crate::ranking::ParseOutcome;

#[derive(Clone)]
pub struct CriteriaExtractor {
    backend: Arc<dyn CompletionBackend>,
}

impl CriteriaExtractor {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub async fn extract_criteria(&self, jd_text: &str) -> Vec<String> {
        let prompt = build_criteria_prompt(jd_text);

        let raw = match self.backend.complete(CRITERIA_SYSTEM, &prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = ?e, "Criteria extraction call failed: {e}");
                return Vec::new();
            }
        };
        debug!("LLM response for criteria extraction: {raw}");

        let outcome = parse_criteria(&raw);
        if outcome.is_fallback() {
            info!("Criteria resolved by line splitting");
        }
        outcome.into_inner()
    }
}

/// Sanitizes `raw` and parses it as a JSON array of strings. Anything else
/// falls back to one criterion per non-blank, trimmed line.
pub fn parse_criteria(raw: &str) -> ParseOutcome<Vec<String>> {
    let cleaned = sanitize(raw);

    match serde_json::from_str::<Vec<String>>(&cleaned) {
        Ok(criteria) => ParseOutcome::Parsed(criteria),
        Err(e) => {
            warn!("Criteria reply is not a JSON list of strings ({e}); splitting lines instead");
            ParseOutcome::Fallback(
                cleaned
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake;

    #[test]
    fn test_parse_valid_array_keeps_order() {
        let outcome = parse_criteria(r#"["5+ years Java experience", "AWS certification"]"#);
        assert_eq!(
            outcome,
            ParseOutcome::Parsed(vec![
                "5+ years Java experience".to_string(),
                "AWS certification".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_fenced_array_with_comments() {
        let raw = "```json\n[\n  \"Rust\", // core language\n  \"Kubernetes\"\n]\n```";
        let outcome = parse_criteria(raw);
        assert_eq!(
            outcome,
            ParseOutcome::Parsed(vec!["Rust".to_string(), "Kubernetes".to_string()])
        );
    }

    #[test]
    fn test_parse_freeform_text_splits_non_blank_lines() {
        let raw = "Here are the criteria:\n\n- Python\n   \n- SQL  \n- Leadership";
        let outcome = parse_criteria(raw);
        assert!(outcome.is_fallback());
        assert_eq!(
            outcome.into_inner(),
            vec!["Here are the criteria:", "- Python", "- SQL", "- Leadership"]
        );
    }

    #[test]
    fn test_parse_non_string_array_falls_back() {
        let outcome = parse_criteria(r#"[{"skill": "Rust"}]"#);
        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_inner(), vec![r#"[{"skill": "Rust"}]"#]);
    }

    #[test]
    fn test_parse_empty_reply_is_empty_list() {
        let outcome = parse_criteria("```json\n```");
        assert!(outcome.is_fallback());
        assert!(outcome.into_inner().is_empty());
    }

    #[test]
    fn test_parse_empty_json_array() {
        assert_eq!(parse_criteria("[]"), ParseOutcome::Parsed(vec![]));
    }

    #[tokio::test]
    async fn test_extract_returns_backend_list() {
        let extractor =
            CriteriaExtractor::new(fake::fixed(r#"["5+ years Java experience","AWS certification"]"#));
        let criteria = extractor
            .extract_criteria("Requires 5 years Java, AWS certified")
            .await;
        assert_eq!(criteria, vec!["5+ years Java experience", "AWS certification"]);
    }

    #[tokio::test]
    async fn test_extract_sends_role_and_jd_text() {
        let backend = fake::FnBackend::new(|system: &str, prompt: &str| {
            assert_eq!(system, CRITERIA_SYSTEM);
            assert!(prompt.contains("Job Description:\nSenior Rust engineer"));
            Ok("[\"Rust\"]".to_string())
        });
        let calls = backend.call_counter();
        let extractor = CriteriaExtractor::new(Arc::new(backend));

        assert_eq!(extractor.extract_criteria("Senior Rust engineer").await, vec!["Rust"]);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_extract_backend_error_yields_empty_list() {
        let extractor = CriteriaExtractor::new(fake::failing());
        assert!(extractor.extract_criteria("any JD").await.is_empty());
    }

    #[tokio::test]
    async fn test_extract_freeform_reply_counts_lines() {
        let extractor = CriteriaExtractor::new(fake::fixed("Python\nSQL\n\nDocker\n"));
        assert_eq!(extractor.extract_criteria("JD").await.len(), 3);
    }
}
