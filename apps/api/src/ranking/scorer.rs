//! Resume Scorer: one backend call per resume, producing a candidate name
//! and one 0–5 score per criterion.
//!
//! The backend is untrusted. Malformed replies and failed calls both resolve
//! to `CandidateResult::unknown`, and well-formed replies are normalised so
//! the score vector always lines up with the criteria:
//! - missing `candidate_name` → "Unknown"
//! - missing `scores` → all zeros
//! - extra scores are dropped, missing trailing scores are 0
//! - each score is rounded and clamped to 0..=5

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::llm_client::sanitize::sanitize;
use crate::llm_client::CompletionBackend;
use crate::ranking::prompts::{build_scoring_prompt, SCORING_SYSTEM};
use crate::ranking::ParseOutcome;

pub const UNKNOWN_CANDIDATE: &str = "Unknown";
pub const MAX_SCORE: u32 = 5;

/// One resume's evaluation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateResult {
    pub candidate_name: String,
    pub scores: Vec<u32>,
    pub total_score: u32,
}

impl CandidateResult {
    pub fn new(candidate_name: impl Into<String>, scores: Vec<u32>) -> Self {
        let total_score = scores.iter().sum();
        Self {
            candidate_name: candidate_name.into(),
            scores,
            total_score,
        }
    }

    /// Default result for a resume the backend could not score.
    pub fn unknown(criteria_count: usize) -> Self {
        Self::new(UNKNOWN_CANDIDATE, vec![0; criteria_count])
    }
}

/// Reply shape requested from the backend. Both keys optional; wrong types
/// are a parse failure.
#[derive(Debug, Deserialize)]
struct ScoreReply {
    candidate_name: Option<String>,
    scores: Option<Vec<f64>>,
}

#[derive(Clone)]
pub struct ResumeScorer {
    backend: Arc<dyn CompletionBackend>,
}

impl ResumeScorer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub async fn score_resume(&self, resume_text: &str, criteria: &[String]) -> CandidateResult {
        let prompt = build_scoring_prompt(resume_text, criteria);

        let raw = match self.backend.complete(SCORING_SYSTEM, &prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = ?e, "Resume scoring call failed: {e}");
                return CandidateResult::unknown(criteria.len());
            }
        };
        debug!("LLM response for resume scoring: {raw}");

        let outcome = parse_score_reply(&raw, criteria.len());
        if outcome.is_fallback() {
            info!("Resume scored with the zero-score fallback");
        }
        outcome.into_inner()
    }
}

/// Sanitizes and parses a scoring reply for `criteria_count` criteria.
pub fn parse_score_reply(raw: &str, criteria_count: usize) -> ParseOutcome<CandidateResult> {
    let cleaned = sanitize(raw);

    let reply = match serde_json::from_str::<ScoreReply>(&cleaned) {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Scoring reply could not be parsed ({e}); using zero scores");
            return ParseOutcome::Fallback(CandidateResult::unknown(criteria_count));
        }
    };

    let candidate_name = reply
        .candidate_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string());

    let scores = match reply.scores {
        Some(raw_scores) => normalize_scores(&raw_scores, criteria_count),
        None => {
            warn!("Scoring reply for '{candidate_name}' has no scores; using zero scores");
            vec![0; criteria_count]
        }
    };

    ParseOutcome::Parsed(CandidateResult::new(candidate_name, scores))
}

/// Fits backend scores to the criteria list: truncates or zero-pads to
/// `criteria_count`, rounds, and clamps each value to `0..=MAX_SCORE`.
fn normalize_scores(raw_scores: &[f64], criteria_count: usize) -> Vec<u32> {
    if raw_scores.len() != criteria_count {
        warn!(
            "Backend returned {} scores for {} criteria; adjusting",
            raw_scores.len(),
            criteria_count
        );
    }

    (0..criteria_count)
        .map(|idx| raw_scores.get(idx).map_or(0, |&score| clamp_score(score)))
        .collect()
}

fn clamp_score(score: f64) -> u32 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, MAX_SCORE as f64) as u32
}
