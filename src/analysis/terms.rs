/*!
 * Terminology dictionary resolution and compliance checking.
 *
 * A term applies to an analysis according to its scope; among several
 * applicable terms for the same source text, the highest effective priority
 * (scope weight plus the term's own priority) wins.
 */

use log::debug;
use regex::Regex;
use std::collections::HashMap;

use super::models::{Term, TermViolation, TranslationPair, ViolationDetail};
use super::tokenizer::{eq_ignore_case, literal_ignore_case, match_ranges};

/// The terminology dictionary loaded for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct TermDictionary {
    terms: Vec<Term>,
}

impl TermDictionary {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Terms whose scope applies to `mod_filter`, highest effective priority first.
    ///
    /// The sort is stable, so equally ranked terms keep dictionary order.
    pub fn applicable(&self, mod_filter: Option<&str>) -> Vec<&Term> {
        let mut applicable: Vec<&Term> = self
            .terms
            .iter()
            .filter(|term| term.scope.applies_to(mod_filter))
            .collect();
        applicable.sort_by(|a, b| b.effective_priority().cmp(&a.effective_priority()));
        applicable
    }

    /// Best applicable term whose source text equals `source_text`, ignoring case.
    pub fn resolve(&self, source_text: &str, mod_filter: Option<&str>) -> Option<&Term> {
        let mut best: Option<&Term> = None;
        for term in &self.terms {
            if !term.scope.applies_to(mod_filter)
                || !eq_ignore_case(&term.source_text, source_text)
            {
                continue;
            }
            match best {
                Some(current) if current.effective_priority() >= term.effective_priority() => {}
                _ => best = Some(term),
            }
        }
        best
    }
}

fn is_ascii_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Does `text` contain `word` case-insensitively, bounded by non-word characters?
pub fn contains_word(text: &str, word: &str) -> bool {
    literal_ignore_case(word).is_some_and(|matcher| matches_word(text, &matcher))
}

/// Any occurrence of `matcher` whose ASCII neighbours are not word characters.
fn matches_word(text: &str, matcher: &Regex) -> bool {
    match_ranges(text, matcher).into_iter().any(|(start, end)| {
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        let clean_start = before.is_none_or(|c| !is_ascii_word_char(c));
        let clean_end = after.is_none_or(|c| !is_ascii_word_char(c));
        clean_start && clean_end
    })
}

/// Does the translation contain the expected term translation?
///
/// Plain substring containment: no boundary test on the target side.
pub fn contains_target(text: &str, expected: &str) -> bool {
    text.contains(expected)
}

/// Checks translation records against the applicable dictionary terms.
#[derive(Debug)]
pub struct TermChecker<'a> {
    dictionary: &'a TermDictionary,
}

impl<'a> TermChecker<'a> {
    pub fn new(dictionary: &'a TermDictionary) -> Self {
        Self { dictionary }
    }

    /// Group violations by term, most violated term first.
    pub fn check(&self, pairs: &[TranslationPair], mod_filter: Option<&str>) -> Vec<TermViolation> {
        let terms = self.dictionary.applicable(mod_filter);
        if terms.is_empty() {
            debug!("No applicable terms, skipping compliance check");
            return Vec::new();
        }

        let pairs: Vec<&TranslationPair> = pairs
            .iter()
            .filter(|pair| mod_filter.is_none_or(|id| pair.mod_id == id))
            .collect();

        let matchers: Vec<(&Term, Regex)> = terms
            .iter()
            .filter_map(|term| literal_ignore_case(&term.source_text).map(|m| (*term, m)))
            .collect();

        let mut index: HashMap<(String, String), usize> = HashMap::new();
        let mut violations: Vec<TermViolation> = Vec::new();

        for pair in &pairs {
            for (term, matcher) in &matchers {
                if !matches_word(&pair.source_text, matcher) {
                    continue;
                }
                if contains_target(&pair.target_text, &term.target_text) {
                    continue;
                }

                let group_key = (term.source_text.clone(), term.target_text.clone());
                let slot = *index.entry(group_key).or_insert_with(|| {
                    violations.push(TermViolation {
                        term_source: term.source_text.clone(),
                        term_target: term.target_text.clone(),
                        term_scope: term.scope.to_string(),
                        violations: Vec::new(),
                        violation_count: 0,
                    });
                    violations.len() - 1
                });

                let group = &mut violations[slot];
                group.violations.push(ViolationDetail {
                    key: pair.key.clone(),
                    source_text: pair.source_text.clone(),
                    target_text: pair.target_text.clone(),
                    expected: term.target_text.clone(),
                });
                group.violation_count += 1;
            }
        }

        violations.sort_by(|a, b| b.violation_count.cmp(&a.violation_count));

        debug!(
            "Checked {} pairs against {} terms: {} violated terms",
            pairs.len(),
            terms.len(),
            violations.len()
        );

        violations
    }
}

/// Check `pairs` against every term in `dictionary` that applies to `mod_filter`.
pub fn check_term_compliance(
    pairs: &[TranslationPair],
    dictionary: &TermDictionary,
    mod_filter: Option<&str>,
) -> Vec<TermViolation> {
    TermChecker::new(dictionary).check(pairs, mod_filter)
}
