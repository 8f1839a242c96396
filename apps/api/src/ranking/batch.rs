//! Batch scoring: runs the Resume Scorer over every uploaded resume with a
//! bounded number of backend calls in flight.
//!
//! Results come back in input order regardless of completion order. A
//! failing resume cannot abort its siblings: the scorer already resolves
//! every failure to a fallback result.

use std::sync::Arc;

use futures_util::{stream, StreamExt};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::ranking::scorer::{CandidateResult, ResumeScorer};

/// A resume whose text has already been extracted.
#[derive(Debug, Clone)]
pub struct ResumeText {
    pub filename: String,
    pub text: String,
}

pub async fn score_batch(
    scorer: &ResumeScorer,
    criteria: &[String],
    resumes: Vec<ResumeText>,
    concurrency: usize,
) -> Vec<CandidateResult> {
    let batch_id = Uuid::new_v4();
    let span = info_span!("score_batch", %batch_id, resumes = resumes.len());
    let criteria: Arc<[String]> = Arc::from(criteria);

    async move {
        info!(
            "Scoring {} resumes against {} criteria",
            resumes.len(),
            criteria.len()
        );

        stream::iter(resumes)
            .map(|resume| {
                let scorer = scorer.clone();
                let criteria = Arc::clone(&criteria);
                async move {
                    let result = scorer.score_resume(&resume.text, &criteria).await;
                    info!(
                        "Scored {}: {} (total {})",
                        resume.filename, result.candidate_name, result.total_score
                    );
                    result
                }
            })
            .buffered(concurrency.max(1))
            .collect::<Vec<_>>()
            .await
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{fake, CompletionBackend, LlmError};

    fn resumes(texts: &[&str]) -> Vec<ResumeText> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| ResumeText {
                filename: format!("resume-{}.pdf", i + 1),
                text: text.to_string(),
            })
            .collect()
    }

    fn criteria() -> Vec<String> {
        vec!["Java".to_string(), "AWS".to_string()]
    }

    /// Replies slower for earlier resumes so completion order is reversed,
    /// and tracks the peak number of concurrent calls.
    struct SlowFirstBackend {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl CompletionBackend for SlowFirstBackend {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let (name, delay_ms) = if prompt.contains("Alice") {
                ("Alice", 300)
            } else if prompt.contains("Bob") {
                ("Bob", 200)
            } else {
                ("Carol", 100)
            };
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(format!(r#"{{"candidate_name":"{name}","scores":[1,2]}}"#))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_preserves_input_order() {
        let backend = Arc::new(SlowFirstBackend {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let scorer = ResumeScorer::new(backend.clone());

        let results = score_batch(&scorer, &criteria(), resumes(&["Alice", "Bob", "Carol"]), 3).await;

        let names: Vec<_> = results.iter().map(|r| r.candidate_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(backend.peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_respects_concurrency_limit() {
        let backend = Arc::new(SlowFirstBackend {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let scorer = ResumeScorer::new(backend.clone());

        let results = score_batch(&scorer, &criteria(), resumes(&["Alice", "Bob", "Carol"]), 1).await;

        assert_eq!(results.len(), 3);
        assert_eq!(backend.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_resume_does_not_abort_batch() {
        let backend = fake::FnBackend::new(|_: &str, prompt: &str| {
            if prompt.contains("resume two") {
                Err(fake::service_unavailable())
            } else if prompt.contains("resume one") {
                Ok(r#"{"candidate_name":"One","scores":[4,5]}"#.to_string())
            } else {
                Ok(r#"{"candidate_name":"Three","scores":[2,3]}"#.to_string())
            }
        });
        let scorer = ResumeScorer::new(Arc::new(backend));

        let results = score_batch(
            &scorer,
            &criteria(),
            resumes(&["resume one", "resume two", "resume three"]),
            2,
        )
        .await;

        assert_eq!(
            results,
            vec![
                CandidateResult::new("One", vec![4, 5]),
                CandidateResult::new("Unknown", vec![0, 0]),
                CandidateResult::new("Three", vec![2, 3]),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let scorer = ResumeScorer::new(fake::failing());
        assert!(score_batch(&scorer, &criteria(), Vec::new(), 4).await.is_empty());
    }
}
