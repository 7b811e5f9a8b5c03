/*!
 * Detection of divergent translations for identical source strings.
 *
 * Records are grouped by `(mod_id, source_text)`. A group with more than one
 * distinct target string becomes a `ConsistencyIssue` unless it is filtered
 * out as noise:
 * - banner lines, bare placeholders and very short symbol strings
 * - an official translation next to a single community translation
 * - two variants that differ only in spacing or separator punctuation
 */

use log::debug;
use std::collections::{BTreeMap, HashMap};

use super::lexicon::{self, BANNER_INFIX, BANNER_PREFIXES, BARE_PLACEHOLDERS, TRIVIAL_CHARS};
use super::models::{ConsistencyIssue, PairStatus, SuggestionReason, TranslationPair};
use super::terms::TermDictionary;

/// One distinct translation within a group.
#[derive(Debug)]
struct Variant<'a> {
    text: &'a str,
    count: usize,
    /// Status of the first record that produced this text
    status: PairStatus,
}

/// All records sharing a mod and a source text.
#[derive(Debug)]
struct Group<'a> {
    mod_id: &'a str,
    source_text: &'a str,
    variants: Vec<Variant<'a>>,
    keys: Vec<String>,
}

impl<'a> Group<'a> {
    fn add(&mut self, pair: &'a TranslationPair) {
        match self.variants.iter_mut().find(|v| v.text == pair.target_text) {
            Some(variant) => variant.count += 1,
            None => self.variants.push(Variant {
                text: &pair.target_text,
                count: 1,
                status: pair.status,
            }),
        }
        self.keys.push(pair.key.clone());
    }

    /// Exactly one official and one translated variant.
    fn is_official_vs_translated(&self) -> bool {
        if self.variants.len() != 2 {
            return false;
        }
        let has = |status| self.variants.iter().any(|v| v.status == status);
        has(PairStatus::Official) && has(PairStatus::Translated)
    }

    /// Earliest-seen variant among those with the highest count.
    fn most_frequent(&self) -> Option<&Variant<'a>> {
        self.variants
            .iter()
            .fold(None, |best: Option<&Variant<'a>>, v| match best {
                Some(b) if b.count >= v.count => Some(b),
                _ => Some(v),
            })
    }

    fn official(&self) -> Option<&Variant<'a>> {
        self.variants.iter().find(|v| v.status == PairStatus::Official)
    }
}

/// Source strings that are not worth tracking for consistency.
pub fn is_non_actionable_source(source: &str) -> bool {
    if BANNER_PREFIXES.iter().any(|prefix| source.starts_with(prefix)) {
        return true;
    }
    if source.contains(BANNER_INFIX) {
        return true;
    }

    let trimmed = source.trim();
    if BARE_PLACEHOLDERS.contains(&trimmed) {
        return true;
    }

    trimmed.chars().count() <= 2 && !trimmed.chars().any(lexicon::is_target_script)
}

fn strip_trivial(text: &str) -> String {
    text.chars().filter(|c| !TRIVIAL_CHARS.contains(c)).collect()
}

/// Two variants that are equal once spacing and separators are removed.
pub fn is_trivial_difference(variants: &[&str]) -> bool {
    match variants {
        [a, b] => strip_trivial(a) == strip_trivial(b),
        _ => false,
    }
}

/// Find groups with divergent translations.
///
/// Returns the issues, most affected keys first, and the number of records examined.
pub fn find_consistency_issues(
    pairs: &[TranslationPair],
    dictionary: &TermDictionary,
    mod_filter: Option<&str>,
) -> (Vec<ConsistencyIssue>, usize) {
    let pairs: Vec<&TranslationPair> = pairs
        .iter()
        .filter(|pair| mod_filter.is_none_or(|id| pair.mod_id == id))
        .collect();
    let total = pairs.len();

    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<Group<'_>> = Vec::new();

    for pair in pairs.iter().copied() {
        let slot = *index
            .entry((pair.mod_id.as_str(), pair.source_text.as_str()))
            .or_insert_with(|| {
                groups.push(Group {
                    mod_id: &pair.mod_id,
                    source_text: &pair.source_text,
                    variants: Vec::new(),
                    keys: Vec::new(),
                });
                groups.len() - 1
            });
        groups[slot].add(pair);
    }

    let mut issues = Vec::new();
    let mut skipped = 0usize;

    for group in groups.into_iter().filter(|g| g.variants.len() > 1) {
        if is_non_actionable_source(group.source_text) || group.is_official_vs_translated() {
            skipped += 1;
            continue;
        }

        let texts: Vec<&str> = group.variants.iter().map(|v| v.text).collect();
        if is_trivial_difference(&texts) {
            skipped += 1;
            continue;
        }

        if let Some(issue) = build_issue(&group, dictionary) {
            issues.push(issue);
        }
    }

    issues.sort_by(|a, b| b.affected_keys.len().cmp(&a.affected_keys.len()));

    debug!(
        "Consistency: {} records, {} issues, {} divergent groups filtered as noise",
        total,
        issues.len(),
        skipped
    );

    (issues, total)
}

fn build_issue(group: &Group<'_>, dictionary: &TermDictionary) -> Option<ConsistencyIssue> {
    let mut suggested = group.most_frequent()?.text.to_string();
    let mut reason = SuggestionReason::MostFrequent;

    if let Some(official) = group.official() {
        suggested = official.text.to_string();
        reason = SuggestionReason::OfficialTranslation;
    }

    if let Some(term) = dictionary.resolve(group.source_text, Some(group.mod_id)) {
        suggested = term.target_text.clone();
        reason = SuggestionReason::TermDictionary;
    }

    let counts: BTreeMap<String, usize> = group
        .variants
        .iter()
        .map(|v| (v.text.to_string(), v.count))
        .collect();

    Some(ConsistencyIssue {
        mod_id: group.mod_id.to_string(),
        source_text: group.source_text.to_string(),
        translations: group.variants.iter().map(|v| v.text.to_string()).collect(),
        counts,
        affected_keys: group.keys.clone(),
        suggested_translation: suggested,
        suggestion_reason: reason,
    })
}
