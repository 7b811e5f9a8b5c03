/*!
 * Heuristic source-phrase to target-span alignment.
 *
 * The aligner assumes a phrase sits at roughly the same relative position in
 * the translation as it does in the source, projects the character range
 * across, and snaps it outward to the nearest break characters. This is an
 * approximation: reordered translations produce skewed spans, and the phrase
 * miner's scoring is calibrated against exactly that behavior.
 */

use super::lexicon::AlignmentRules;
use super::tokenizer::{eq_ignore_case, find_ignore_case};

/// Align `phrase` into `target_text` using the default break/particle tables.
pub fn align(source_text: &str, target_text: &str, phrase: &str) -> Option<String> {
    align_with(&AlignmentRules::default(), source_text, target_text, phrase)
}

/// Align `phrase` into `target_text` using explicit rules.
///
/// Returns `None` when the phrase does not occur in the source or the
/// projected span collapses.
pub fn align_with(
    rules: &AlignmentRules,
    source_text: &str,
    target_text: &str,
    phrase: &str,
) -> Option<String> {
    if eq_ignore_case(source_text, phrase) {
        return Some(target_text.to_string());
    }

    let (offset, _) = find_ignore_case(source_text, phrase)?;

    let source_len = source_text.chars().count() as f64;
    let relative_start = offset as f64 / source_len;
    let relative_end = (offset + phrase.chars().count()) as f64 / source_len;

    let target: Vec<char> = target_text.chars().collect();
    if target.is_empty() {
        return None;
    }
    let target_len = target.len();

    let mut start = ((relative_start * target_len as f64) as usize).min(target_len);
    let mut end = ((relative_end * target_len as f64) as usize).min(target_len);
    if start >= end {
        return None;
    }

    while start > 0 && !rules.is_break(target[start - 1]) {
        start -= 1;
    }
    while end < target_len && !rules.is_break(target[end]) {
        end += 1;
    }

    let span: String = target[start..end].iter().collect();
    let trimmed = span.trim().trim_matches(|c| rules.is_particle(c));

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
