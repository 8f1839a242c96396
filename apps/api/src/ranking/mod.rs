// Ranking pipeline: criteria extraction, resume scoring, batch orchestration, CSV report.
// All backend calls go through llm_client::CompletionBackend.

pub mod batch;
pub mod criteria;
pub mod handlers;
pub mod prompts;
pub mod report;
pub mod scorer;

/// Outcome of parsing an untrusted backend reply.
///
/// Callers only ever see the resolved value; the variant exists so the
/// parse path can log and test which branch was taken.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    Fallback(T),
}

impl<T> ParseOutcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseOutcome::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            ParseOutcome::Parsed(value) | ParseOutcome::Fallback(value) => value,
        }
    }
}
