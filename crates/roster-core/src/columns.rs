//! Name column detection
//!
//! Rosters arrive with arbitrary headers (usually converted from spreadsheets),
//! so the column holding the person's name is found by label rather than by
//! position.

use crate::normalize::Normalizer;
use crate::row::Row;

/// Candidate labels in priority order. Compared after normalization.
pub const NAME_CANDIDATES: &[&str] = &[
    "الاسم الكامل",
    "الاسم بالكامل",
    "الاسم رباعي",
    "الاسم",
    "full name",
    "name",
];

/// Token accepted when no candidate label matches.
pub const NAME_FALLBACK_TOKEN: &str = "اسم";

/// Locate the name column in `sample` using the default normalization policy.
pub fn detect_name_column(sample: &Row) -> Option<&str> {
    detect_name_column_with(sample, &Normalizer::new())
}

/// Locate the name column in `sample`.
///
/// Candidates are tried in priority order; for each candidate the first column
/// (in declaration order) whose normalized label contains it wins.
pub fn detect_name_column_with<'a>(sample: &'a Row, normalizer: &Normalizer) -> Option<&'a str> {
    let columns: Vec<(&str, String)> = sample
        .columns()
        .map(|name| (name, normalizer.normalize(name)))
        .collect();

    for candidate in NAME_CANDIDATES {
        let candidate = normalizer.normalize(candidate);
        if let Some((name, _)) = columns.iter().find(|(_, label)| label.contains(&candidate)) {
            return Some(name);
        }
    }

    let fallback = normalizer.normalize(NAME_FALLBACK_TOKEN);
    columns
        .iter()
        .find(|(_, label)| label.contains(&fallback))
        .map(|(name, _)| *name)
}
