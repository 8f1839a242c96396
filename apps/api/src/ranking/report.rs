//! CSV report of a scoring batch. Rows follow upload order; no sorting.

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::ranking::scorer::CandidateResult;

pub const REPORT_FILENAME: &str = "candidate_scores.csv";

/// Total score per result, in input order.
pub fn aggregate(results: &[CandidateResult]) -> Vec<u32> {
    results.iter().map(|r| r.total_score).collect()
}

/// Header columns: name, one "Criterion N" per criterion, total.
pub fn header(criteria_count: usize) -> Vec<String> {
    std::iter::once("Candidate Name".to_string())
        .chain((1..=criteria_count).map(|i| format!("Criterion {i}")))
        .chain(std::iter::once("Total Score".to_string()))
        .collect()
}

/// Serializes `results` as CSV: the header row, then `[name] + scores + [total]`
/// per result.
pub fn render_table(criteria: &[String], results: &[CandidateResult]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    writer
        .write_record(header(criteria.len()))
        .context("Failed to write report header")?;

    for (result, total) in results.iter().zip(aggregate(results)) {
        let row = std::iter::once(result.candidate_name.clone())
            .chain(result.scores.iter().map(u32::to_string))
            .chain(std::iter::once(total.to_string()));
        writer
            .write_record(row)
            .with_context(|| format!("Failed to write report row for '{}'", result.candidate_name))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush report: {}", e.error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_columns() {
        assert_eq!(
            header(2),
            vec!["Candidate Name", "Criterion 1", "Criterion 2", "Total Score"]
        );
        assert_eq!(header(0), vec!["Candidate Name", "Total Score"]);
    }

    #[test]
    fn test_aggregate_keeps_order() {
        let results = vec![
            CandidateResult::new("A", vec![1, 2]),
            CandidateResult::new("B", vec![5, 5]),
        ];
        assert_eq!(aggregate(&results), vec![3, 10]);
    }

    #[test]
    fn test_render_single_row() {
        let csv = render_table(
            &criteria(&["5+ years Java experience", "AWS certification"]),
            &[CandidateResult::new("A. Lee", vec![4, 5])],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "Candidate Name,Criterion 1,Criterion 2,Total Score\nA. Lee,4,5,9\n"
        );
    }

    #[test]
    fn test_render_quotes_names_with_commas() {
        let csv = render_table(
            &criteria(&["Rust"]),
            &[CandidateResult::new("Doe, Jane", vec![3])],
        )
        .unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert!(text.ends_with("\"Doe, Jane\",3,3\n"));
    }

    #[test]
    fn test_render_no_results_is_header_only() {
        let csv = render_table(&criteria(&["Rust"]), &[]).unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "Candidate Name,Criterion 1,Total Score\n"
        );
    }
}
