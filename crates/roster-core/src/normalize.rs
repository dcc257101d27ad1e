//! Script-aware name normalization
//!
//! Collapses the letter forms that Arabic writers use interchangeably into a
//! single canonical form so that equality and containment checks are stable
//! across spelling variation. The pipeline, in order:
//!
//! 1. Strip directional and invisible formatting marks
//! 2. Strip Arabic diacritics (harakat, tanween, Quranic annotation marks)
//! 3. Canonicalize letter-shape variants (alef, yaa, hamza carriers)
//! 4. Strip tatweel
//! 5. Drop everything that is not a letter, number or whitespace
//! 6. Collapse whitespace runs and trim
//! 7. Lowercase (Latin fallback names)
//!
//! Steps 1-5 and 7 are per-character, step 6 is per-run; they are fused into a
//! single pass over the input.

/// Normalization policy.
///
/// The only policy knob is whether taa-marbouta (`ة`) folds into haa (`ه`).
/// Stored names and queries must go through the same policy, so an engine
/// owns exactly one `Normalizer` and hands it to everything that compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    pub fold_taa_marbouta: bool,
}

impl Normalizer {
    /// Default policy: taa-marbouta is kept distinct from haa.
    pub const fn new() -> Self {
        Self {
            fold_taa_marbouta: false,
        }
    }

    /// Strict policy: taa-marbouta folds into haa.
    pub const fn strict() -> Self {
        Self {
            fold_taa_marbouta: true,
        }
    }

    /// Normalize `raw` into its canonical comparison form.
    ///
    /// Total and idempotent; garbage input degrades towards the empty string.
    pub fn normalize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut pending_space = false;

        for c in raw.chars() {
            if is_format_mark(c) || is_arabic_diacritic(c) || c == TATWEEL {
                continue;
            }

            let c = self.canonical_letter(c);

            if c.is_whitespace() {
                pending_space = true;
                continue;
            }

            if !is_kept(c) {
                continue;
            }

            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;

            // Lowercasing may expand into combining marks (e.g. U+0130), which
            // step 5 would strip on a second pass, so filter the expansion too.
            for lower in c.to_lowercase().filter(|l| is_kept(*l)) {
                out.push(lower);
            }
        }

        out
    }

    fn canonical_letter(&self, c: char) -> char {
        match c {
            '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0671}' => ALEF,
            '\u{0649}' | '\u{06CC}' => YAA,
            '\u{0624}' => WAW,
            '\u{0626}' => YAA,
            TAA_MARBOUTA if self.fold_taa_marbouta => HAA,
            other => other,
        }
    }
}

/// Normalize with the default policy.
pub fn normalize(raw: &str) -> String {
    Normalizer::new().normalize(raw)
}

const ALEF: char = '\u{0627}';
const YAA: char = '\u{064A}';
const WAW: char = '\u{0648}';
const HAA: char = '\u{0647}';
const TAA_MARBOUTA: char = '\u{0629}';
const TATWEEL: char = '\u{0640}';

#[inline]
fn is_format_mark(c: char) -> bool {
    matches!(
        c,
        '\u{061C}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
    )
}

#[inline]
fn is_arabic_diacritic(c: char) -> bool {
    matches!(
        c,
        '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{06D6}'..='\u{06DC}'
            | '\u{06DF}'..='\u{06E8}'
            | '\u{06EA}'..='\u{06ED}'
    )
}

#[inline]
fn is_kept(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}
