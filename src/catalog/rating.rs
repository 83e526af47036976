// Numeric rating extraction from curated rating labels.
//
// The dataset stores ratings as free text ("8.5/10 (MDL)", "9/10", "N/A").
// The first decimal number in the label is taken as the rating.

use std::sync::OnceLock;

use regex_lite::Regex;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+(\.\d+)?)").expect("static regex is valid"))
}

/// Extract the first number from a rating label.
///
/// Non-breaking spaces are normalized first. Returns `None` when the label
/// contains no number.
pub fn extract_numeric_rating(label: &str) -> Option<f64> {
    let cleaned = label.trim().replace('\u{a0}', " ");
    number_pattern()
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
