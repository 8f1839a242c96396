//! Cleans raw backend replies before structured parsing.
//!
//! Models like to wrap JSON in markdown fences and sprinkle `//` comments
//! between array items. Both are removed here so serde gets a fair shot.

const FENCE: &str = "```";

/// Strips a leading ```` ```lang ```` fence line, a trailing fence line and
/// every `//` comment suffix, then trims the result.
///
/// The comment stripper is line-based and does not understand string
/// literals: `"https://example.com"` loses everything from the `//` on.
/// Never fails; degenerate input yields an empty string.
pub fn sanitize(raw: &str) -> String {
    let mut lines: Vec<&str> = raw.trim().lines().collect();

    if lines.first().is_some_and(|l| l.starts_with(FENCE)) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.starts_with(FENCE)) {
        lines.pop();
    }

    lines
        .into_iter()
        .map(strip_line_comment)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}
