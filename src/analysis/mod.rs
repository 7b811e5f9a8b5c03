/*!
 * Translation consistency analysis engine.
 *
 * - `tokenizer`: word tokens and N-grams of source strings
 * - `alignment`: heuristic projection of a source phrase onto its translation
 * - `consistency`: same source text, different translations
 * - `phrases`: N-gram mining of recurring phrases with divergent translations
 * - `terms`: terminology dictionary resolution and compliance checking
 * - `output`: JSON, CSV and text renderings of a result
 *
 * The `Analyzer` loads one snapshot from a `TranslationStore` and runs the
 * requested analyses over it synchronously. Nothing is written back.
 */

pub mod alignment;
pub mod consistency;
pub mod lexicon;
pub mod models;
pub mod output;
pub mod phrases;
pub mod terms;
pub mod tokenizer;

pub use self::consistency::find_consistency_issues;
pub use self::models::{
    AnalysisKind, AnalysisResult, AnalysisSummary, ConsistencyIssue, PairStatus, PhraseExample,
    PhraseIssue, SuggestionReason, Term, TermScope, TermViolation, TranslationPair, ViolationDetail,
};
pub use self::output::{render, OutputFormat};
pub use self::phrases::{mine_phrases, PhraseMiner};
pub use self::terms::{check_term_compliance, TermChecker, TermDictionary};

use log::{debug, info};

use crate::errors::AnalysisError;
use crate::store::TranslationStore;

/// Minimum count used for phrase mining in a combined run.
pub const ALL_MIN_COUNT: usize = 10;

/// Combined runs only report phrases scoring below this.
pub const ALL_MAX_SCORE: f64 = 0.5;

/// Combined runs only report phrases with at least this many occurrences.
pub const ALL_MIN_OCCURRENCES: usize = 15;

/// Combined runs report at most this many phrases.
pub const ALL_MAX_PHRASES: usize = 500;

/// Options for an analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Restrict the run to one mod; `None` analyzes every mod
    pub mod_id: Option<String>,
    /// Minimum occurrence count for phrase mining
    pub min_count: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            mod_id: None,
            min_count: phrases::DEFAULT_MIN_COUNT,
        }
    }
}

impl AnalysisOptions {
    pub fn for_mod(mod_id: impl Into<String>) -> Self {
        Self {
            mod_id: Some(mod_id.into()),
            ..Self::default()
        }
    }

    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }
}

/// Immutable corpus snapshot shared by every analysis of one run.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub pairs: Vec<TranslationPair>,
    pub dictionary: TermDictionary,
}

/// Runs analyses against a translation store.
pub struct Analyzer<S: TranslationStore> {
    store: S,
}

impl<S: TranslationStore> Analyzer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch records and dictionary once. A read failure aborts the run.
    pub async fn load_snapshot(
        &self,
        options: &AnalysisOptions,
    ) -> Result<Snapshot, AnalysisError> {
        let pairs = self.store.translated_pairs(options.mod_id.as_deref()).await?;
        let dictionary = TermDictionary::new(self.store.list_terms(None).await?);

        if dictionary.is_empty() {
            debug!("Term dictionary is empty");
        }
        debug!(
            "Loaded snapshot: {} translated records, {} terms",
            pairs.len(),
            dictionary.len()
        );

        Ok(Snapshot { pairs, dictionary })
    }

    /// Load a snapshot and run the analyses selected by `kind`.
    pub async fn run(
        &self,
        kind: AnalysisKind,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, AnalysisError> {
        info!(
            "Running {} analysis for {}",
            kind,
            options.mod_id.as_deref().unwrap_or("all mods")
        );

        let snapshot = self.load_snapshot(options).await?;
        let result = match kind {
            AnalysisKind::Consistency => analyze_consistency(&snapshot, options),
            AnalysisKind::Phrases => analyze_phrases(&snapshot, options),
            AnalysisKind::Terms => analyze_terms(&snapshot, options),
            AnalysisKind::All => analyze_all(&snapshot, options),
        };

        info!(
            "Analysis finished: {} consistency issues, {} phrases, {} term violations",
            result.summary.consistency_issues,
            result.summary.discovered_phrases,
            result.summary.term_violations
        );

        Ok(result)
    }
}

fn inconsistent_count(phrases: &[PhraseIssue]) -> usize {
    phrases.iter().filter(|p| p.consistency_score < 1.0).count()
}

/// Same-source divergence analysis only.
pub fn analyze_consistency(snapshot: &Snapshot, options: &AnalysisOptions) -> AnalysisResult {
    let mod_filter = options.mod_id.as_deref();
    let mut result = AnalysisResult::new(options.mod_id.clone());

    let (issues, total) =
        find_consistency_issues(&snapshot.pairs, &snapshot.dictionary, mod_filter);
    result.summary.total_translations = total;
    result.summary.consistency_issues = issues.len();
    result.consistency = issues;

    result
}

/// Phrase mining only, with the caller's minimum count.
pub fn analyze_phrases(snapshot: &Snapshot, options: &AnalysisOptions) -> AnalysisResult {
    let mod_filter = options.mod_id.as_deref();
    let mut result = AnalysisResult::new(options.mod_id.clone());

    let phrases =
        PhraseMiner::new(options.min_count).mine(&snapshot.pairs, &snapshot.dictionary, mod_filter);
    result.summary.total_translations = count_pairs(snapshot, mod_filter);
    result.summary.discovered_phrases = phrases.len();
    result.summary.inconsistent_phrases = inconsistent_count(&phrases);
    result.discovered_phrases = phrases;

    result
}

/// Term compliance only.
pub fn analyze_terms(snapshot: &Snapshot, options: &AnalysisOptions) -> AnalysisResult {
    let mod_filter = options.mod_id.as_deref();
    let mut result = AnalysisResult::new(options.mod_id.clone());

    let violations = check_term_compliance(&snapshot.pairs, &snapshot.dictionary, mod_filter);
    result.summary.total_translations = count_pairs(snapshot, mod_filter);
    result.summary.term_violations = violations.len();
    result.term_violations = violations;

    result
}

/// All three analyses, with phrase reporting tightened to the most impactful entries.
pub fn analyze_all(snapshot: &Snapshot, options: &AnalysisOptions) -> AnalysisResult {
    let mod_filter = options.mod_id.as_deref();
    let mut result = AnalysisResult::new(options.mod_id.clone());

    let (issues, total) =
        find_consistency_issues(&snapshot.pairs, &snapshot.dictionary, mod_filter);
    result.summary.total_translations = total;
    result.summary.consistency_issues = issues.len();
    result.consistency = issues;

    let miner = PhraseMiner::new(options.min_count.max(ALL_MIN_COUNT));
    let mut phrases: Vec<PhraseIssue> = miner
        .mine(&snapshot.pairs, &snapshot.dictionary, mod_filter)
        .into_iter()
        .filter(|p| p.consistency_score < ALL_MAX_SCORE && p.occurrences >= ALL_MIN_OCCURRENCES)
        .collect();
    phrases.sort_by(|a, b| b.impact().total_cmp(&a.impact()));
    phrases.truncate(ALL_MAX_PHRASES);

    result.summary.discovered_phrases = phrases.len();
    result.summary.inconsistent_phrases = inconsistent_count(&phrases);
    result.discovered_phrases = phrases;

    let violations = check_term_compliance(&snapshot.pairs, &snapshot.dictionary, mod_filter);
    result.summary.term_violations = violations.len();
    result.term_violations = violations;

    result
}

fn count_pairs(snapshot: &Snapshot, mod_filter: Option<&str>) -> usize {
    snapshot
        .pairs
        .iter()
        .filter(|pair| mod_filter.is_none_or(|id| pair.mod_id == id))
        .count()
}
