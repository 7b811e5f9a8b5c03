/*!
 * Word tokenization and N-gram extraction for source strings.
 *
 * Also hosts the case-insensitive literal search helpers shared by the span
 * aligner and the term checker. The aligner works in character offsets; the
 * boundary test works on byte ranges of the original text.
 */

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Maximal runs of letters, decimal digits, apostrophes and hyphens.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{Nd}'-]+").unwrap());

/// Split text into word tokens, discarding every separator character.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract every distinct word N-gram with `min_n <= n <= max_n`.
///
/// N-grams are space-joined tokens in first-seen order, shorter lengths first.
pub fn extract_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let words = tokenize(text);
    if words.is_empty() {
        return Vec::new();
    }

    let mut ngrams = Vec::new();
    let mut seen = HashSet::new();

    for n in min_n.max(1)..=max_n {
        if n > words.len() {
            break;
        }

        for window in words.windows(n) {
            let ngram = window.join(" ");
            if seen.insert(ngram.clone()) {
                ngrams.push(ngram);
            }
        }
    }

    ngrams
}

/// Case-insensitive equality of whole strings.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive matcher for the literal text `needle`.
///
/// Returns `None` for an empty needle, which matches nothing.
pub fn literal_ignore_case(needle: &str) -> Option<Regex> {
    if needle.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Character range of the first case-insensitive occurrence of `needle`.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let m = literal_ignore_case(needle)?.find(haystack)?;
    let start = haystack[..m.start()].chars().count();
    Some((start, start + m.as_str().chars().count()))
}

/// Byte ranges of every match of `matcher`, overlapping ones included.
pub fn match_ranges(haystack: &str, matcher: &Regex) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut at = 0;

    while at <= haystack.len() {
        let Some(m) = matcher.find_at(haystack, at) else {
            break;
        };
        ranges.push((m.start(), m.end()));
        at = m.start() + haystack[m.start()..].chars().next().map_or(1, char::len_utf8);
    }

    ranges
}
