/*!
 * Phrase mining across independently translated strings.
 *
 * Every 1–4 word N-gram of every source string is aligned into its
 * translation; the aligned spans are tallied per phrase. Phrases whose
 * tallies disagree are reported with a consistency score, the share of the
 * single most common translation.
 */

use log::debug;
use std::collections::{BTreeMap, HashMap};

use super::alignment::align_with;
use super::lexicon::{AlignmentRules, StopWords};
use super::models::{PhraseExample, PhraseIssue, TranslationPair};
use super::terms::TermDictionary;
use super::tokenizer::extract_ngrams;

/// Shortest N-gram, in words.
pub const MIN_NGRAM: usize = 1;

/// Longest N-gram, in words.
pub const MAX_NGRAM: usize = 4;

/// Examples kept per phrase.
pub const MAX_EXAMPLES: usize = 10;

/// Default minimum occurrence count for a reported phrase.
pub const DEFAULT_MIN_COUNT: usize = 3;

/// Single-word phrases shorter than this are never reported.
const MIN_SINGLE_WORD_CHARS: usize = 3;

/// Running tally for one phrase.
#[derive(Debug, Default)]
struct PhraseTally {
    /// Aligned translation and its count, in first-seen order
    variants: Vec<(String, usize)>,
    examples: Vec<PhraseExample>,
}

impl PhraseTally {
    fn record(&mut self, aligned: String, pair: &TranslationPair) {
        match self.variants.iter_mut().find(|(text, _)| *text == aligned) {
            Some((_, count)) => *count += 1,
            None => self.variants.push((aligned, 1)),
        }

        if self.examples.len() < MAX_EXAMPLES {
            self.examples.push(PhraseExample {
                key: pair.key.clone(),
                source_text: pair.source_text.clone(),
                target_text: pair.target_text.clone(),
            });
        }
    }

    fn occurrences(&self) -> usize {
        self.variants.iter().map(|(_, count)| count).sum()
    }

    /// Earliest-seen variant among those with the highest count.
    fn majority(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (text, count) in &self.variants {
            if best.is_none_or(|(_, max)| *count > max) {
                best = Some((text.as_str(), *count));
            }
        }
        best
    }
}

/// Mines recurring phrases and their translation variants.
#[derive(Debug, Clone)]
pub struct PhraseMiner {
    min_count: usize,
    stop_words: StopWords,
    rules: AlignmentRules,
}

impl PhraseMiner {
    /// Create a miner with the built-in stoplist and alignment rules.
    pub fn new(min_count: usize) -> Self {
        Self {
            min_count,
            stop_words: StopWords::default(),
            rules: AlignmentRules::default(),
        }
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_rules(mut self, rules: AlignmentRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    /// Build the phrase table and return the inconsistent phrases, least consistent first.
    pub fn mine(
        &self,
        pairs: &[TranslationPair],
        dictionary: &TermDictionary,
        mod_filter: Option<&str>,
    ) -> Vec<PhraseIssue> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut tallies: Vec<(String, PhraseTally)> = Vec::new();
        let mut examined = 0usize;

        for pair in pairs
            .iter()
            .filter(|pair| mod_filter.is_none_or(|id| pair.mod_id == id))
        {
            examined += 1;
            for ngram in extract_ngrams(&pair.source_text, MIN_NGRAM, MAX_NGRAM) {
                let Some(aligned) =
                    align_with(&self.rules, &pair.source_text, &pair.target_text, &ngram)
                else {
                    continue;
                };

                let slot = match index.get(&ngram) {
                    Some(&slot) => slot,
                    None => {
                        tallies.push((ngram.clone(), PhraseTally::default()));
                        index.insert(ngram, tallies.len() - 1);
                        tallies.len() - 1
                    }
                };
                tallies[slot].1.record(aligned, pair);
            }
        }

        let candidate_count = tallies.len();
        let mut issues: Vec<PhraseIssue> = tallies
            .into_iter()
            .filter_map(|(phrase, tally)| self.evaluate(phrase, tally, dictionary, mod_filter))
            .collect();

        issues.sort_by(|a, b| {
            a.consistency_score
                .total_cmp(&b.consistency_score)
                .then_with(|| b.occurrences.cmp(&a.occurrences))
        });

        debug!(
            "Phrases: {} records, {} candidate phrases, {} inconsistent (min count {})",
            examined,
            candidate_count,
            issues.len(),
            self.min_count
        );

        issues
    }

    fn is_reportable_word(&self, phrase: &str) -> bool {
        phrase.chars().count() >= MIN_SINGLE_WORD_CHARS && !self.stop_words.contains(phrase)
    }

    fn evaluate(
        &self,
        phrase: String,
        tally: PhraseTally,
        dictionary: &TermDictionary,
        mod_filter: Option<&str>,
    ) -> Option<PhraseIssue> {
        let occurrences = tally.occurrences();
        if occurrences < self.min_count {
            return None;
        }

        if !phrase.contains(' ') && !self.is_reportable_word(&phrase) {
            return None;
        }

        let (majority, max_count) = tally.majority()?;
        let consistency_score = max_count as f64 / occurrences as f64;
        if consistency_score >= 1.0 {
            return None;
        }

        let mut suggested = majority.to_string();
        let term = dictionary.resolve(&phrase, mod_filter);
        if let Some(term) = term {
            if term.target_text != suggested {
                suggested = term.target_text.clone();
            }
        }

        let translation_variants: BTreeMap<String, usize> = tally.variants.into_iter().collect();

        Some(PhraseIssue {
            phrase,
            occurrences,
            translation_variants,
            consistency_score,
            in_dictionary: term.is_some(),
            suggested_translation: suggested,
            examples: tally.examples,
        })
    }
}

/// Mine `pairs` with the default tables.
pub fn mine_phrases(
    pairs: &[TranslationPair],
    dictionary: &TermDictionary,
    mod_filter: Option<&str>,
    min_count: usize,
) -> Vec<PhraseIssue> {
    PhraseMiner::new(min_count).mine(pairs, dictionary, mod_filter)
}
