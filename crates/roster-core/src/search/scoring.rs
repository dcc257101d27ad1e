//! Part-based scoring
//!
//! A query is split into whitespace-separated parts; a candidate scores the
//! fraction of parts it contains, and an exact full-name match always scores
//! 1.0 regardless of the part score.

/// Parts shorter than this many characters are treated as noise.
pub const MIN_PART_CHARS: usize = 2;

/// Score assigned to an exact full-name match.
pub const EXACT_SCORE: f64 = 1.0;

/// Scoring outcome for one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartMatch {
    pub score: f64,
    pub strategy: &'static str,
}

/// Split a normalized query into parts, dropping noise tokens.
pub fn query_parts(normalized_query: &str) -> Vec<String> {
    normalized_query
        .split_whitespace()
        .filter(|part| part.chars().count() >= MIN_PART_CHARS)
        .map(str::to_string)
        .collect()
}

/// Score a normalized candidate name against a normalized query.
///
/// Returns `None` when the candidate contains none of the parts and is not an
/// exact match.
pub fn score_candidate(normalized_query: &str, parts: &[String], normalized_name: &str) -> Option<PartMatch> {
    if normalized_name == normalized_query {
        return Some(PartMatch {
            score: EXACT_SCORE,
            strategy: "exact",
        });
    }

    if parts.is_empty() {
        return None;
    }

    let found = parts
        .iter()
        .filter(|part| normalized_name.contains(part.as_str()))
        .count();

    if found == 0 {
        return None;
    }

    Some(PartMatch {
        score: found as f64 / parts.len() as f64,
        strategy: "parts",
    })
}
