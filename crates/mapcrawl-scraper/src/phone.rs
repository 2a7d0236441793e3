//! Best-guess phone extraction from raw listing card text.
//!
//! Card text mixes the phone number with ratings, review counts, opening
//! hours and similar numeric noise. The heuristic over-matches anything
//! phone-shaped, drops short numeric tokens, then prefers international
//! (`+`-prefixed) numbers over the longest remaining digit run.

use std::sync::LazyLock;

use mapcrawl_core::NO_PHONE;
use regex::Regex;

/// Optional `+`, a digit, then at least five digits, whitespace, hyphens or parentheses.
static CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d[\d\s\-()]{5,}").expect("valid phone candidate regex")
});

static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid digit regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Candidates with fewer digits than this are ratings, counts or hours.
const MIN_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PhoneCandidate<'a> {
    raw_text: &'a str,
    digit_count: usize,
    has_plus_prefix: bool,
}

/// Extracts the most likely phone number from `raw_card_text`.
///
/// Never fails: returns [`NO_PHONE`] when nothing phone-shaped with at least
/// six digits is present.
#[must_use]
pub fn extract_phone(raw_card_text: &str) -> String {
    select_candidate(raw_card_text).map_or_else(
        || NO_PHONE.to_owned(),
        |candidate| normalize_phone(candidate.raw_text),
    )
}

/// Normalizes a matched phone string: parentheses removed, whitespace runs
/// collapsed to one space, ends trimmed. Digits, `+` and hyphens are kept.
///
/// Parentheses go first so that removing them can never leave a double
/// space behind, which keeps the function idempotent.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let without_parens: String = raw.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    WHITESPACE_RE
        .replace_all(&without_parens, " ")
        .trim()
        .to_owned()
}

fn select_candidate(raw_card_text: &str) -> Option<PhoneCandidate<'_>> {
    let mut candidates = scan_candidates(raw_card_text);
    // Stable: equal digit counts keep scan order.
    candidates.sort_by_key(|c| std::cmp::Reverse(c.digit_count));

    candidates
        .iter()
        .find(|c| c.has_plus_prefix)
        .or_else(|| candidates.first())
        .copied()
}

fn scan_candidates(raw_card_text: &str) -> Vec<PhoneCandidate<'_>> {
    CANDIDATE_RE
        .find_iter(raw_card_text)
        .filter_map(|m| {
            let raw_text = m.as_str().trim();
            let digit_count = DIGIT_RE.find_iter(raw_text).count();
            (digit_count >= MIN_DIGITS).then(|| PhoneCandidate {
                raw_text,
                digit_count,
                has_plus_prefix: raw_text.contains('+'),
            })
        })
        .collect()
}
