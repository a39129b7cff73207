//! Text segmentation: turns a normalized OCR text blob into an ordered,
//! deduplicated list of candidate ingredient names. Never fails; the
//! worst input yields an empty list.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::MAX_NAME_TOKENS;

/// Delimiters that separate ingredient names on a label. OCR output also
/// splits on colons so "ingredients:water" separates correctly.
static DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;:\.\(\)\[\]{}•·▪◦|]").unwrap());

/// Leading bullet, list numbering, or a joining "and " left over from
/// prose like "water and glycerin".
static LEADING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:[-–—•·▪◦*>+]+\s*|\d+[.)]\s+|and\s+)+").unwrap());

/// Punctuation that OCR tends to leave dangling at fragment ends.
static TRAILING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-–—.,;:!?*'\u{2019}]+$").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase and collapse all whitespace runs to single spaces. Applied
/// to OCR output before segmentation so downstream matching is
/// case-stable.
pub fn normalize_text(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    WHITESPACE.replace_all(lowered.trim(), " ").into_owned()
}

/// Split normalized label text into candidate ingredient names.
///
/// Fragments longer than [`MAX_NAME_TOKENS`] whitespace tokens are
/// discarded as prose: OCR frequently captures marketing copy alongside
/// the ingredient list, and that copy must not reach the resolver.
/// Output preserves first-seen order and is deduplicated
/// case-insensitively.
pub fn segment(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // A label like "ingredients:water" needs a separator after the colon
    // before splitting, so the colon split never glues tokens together.
    let spaced = text.replace(':', ": ");
    let collapsed = WHITESPACE.replace_all(&spaced, " ");

    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for fragment in DELIMITERS.split(&collapsed) {
        let fragment = fragment.trim();
        let fragment = LEADING_PREFIX.replace(fragment, "");

        if fragment.split_whitespace().count() > MAX_NAME_TOKENS {
            tracing::debug!(tokens = fragment.split_whitespace().count(), "Dropping prose fragment");
            continue;
        }

        let fragment = TRAILING_PUNCT.replace(&fragment, "");
        let name = capitalize_first(fragment.trim());
        if name.is_empty() {
            continue;
        }

        // Digits-only fragments are list-numbering residue: the period or
        // bracket that followed the number was itself a delimiter.
        if name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        if seen.insert(name.to_lowercase()) {
            names.push(name);
        }
    }

    names
}

/// Uppercase the first letter, leave the rest unchanged. Deterministic
/// and idempotent.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
