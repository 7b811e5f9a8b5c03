/*!
 * Data model of the analysis engine.
 *
 * Inputs (`TranslationPair`, `Term`) come from a translation store and are
 * never mutated. Outputs (`ConsistencyIssue`, `PhraseIssue`, `TermViolation`)
 * are built fresh for every run and aggregated into an `AnalysisResult`.
 */

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::ScopeParseError;

/// Review status of a translated record.
///
/// Only records in one of these states ever reach the analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStatus {
    /// Translated but not reviewed
    Translated,
    /// Reviewed by a maintainer
    Verified,
    /// Shipped by the mod authors themselves
    Official,
}

impl PairStatus {
    /// All statuses that count as "translated" for analysis purposes.
    pub const ANALYZABLE: [PairStatus; 3] =
        [PairStatus::Translated, PairStatus::Verified, PairStatus::Official];

    /// Database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PairStatus::Translated => "translated",
            PairStatus::Verified => "verified",
            PairStatus::Official => "official",
        }
    }
}

impl fmt::Display for PairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PairStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "translated" => Ok(PairStatus::Translated),
            "verified" => Ok(PairStatus::Verified),
            "official" => Ok(PairStatus::Official),
            _ => Err(anyhow::anyhow!("Invalid translation status: {}", s)),
        }
    }
}

/// One translated string of a mod's default revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPair {
    pub mod_id: String,
    pub key: String,
    pub source_text: String,
    pub target_text: String,
    pub status: PairStatus,
}

impl TranslationPair {
    pub fn new(
        mod_id: impl Into<String>,
        key: impl Into<String>,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
        status: PairStatus,
    ) -> Self {
        Self {
            mod_id: mod_id.into(),
            key: key.into(),
            source_text: source_text.into(),
            target_text: target_text.into(),
            status,
        }
    }
}

/// Applicability tier of a dictionary term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermScope {
    /// Applies everywhere
    Global,
    /// Applies to mods of a category (e.g. `category:tech`)
    Category(String),
    /// Applies to a single mod (e.g. `mod:create`)
    Mod(String),
}

impl TermScope {
    /// Ranking offset added to a term's own priority.
    pub fn weight(&self) -> i64 {
        match self {
            TermScope::Global => 100,
            TermScope::Category(_) => 200,
            TermScope::Mod(_) => 300,
        }
    }

    /// Whether a term in this scope applies to an analysis of `mod_filter`.
    ///
    /// Category membership is not checked: every category term applies.
    pub fn applies_to(&self, mod_filter: Option<&str>) -> bool {
        match self {
            TermScope::Global | TermScope::Category(_) => true,
            TermScope::Mod(id) => mod_filter == Some(id.as_str()),
        }
    }
}

impl fmt::Display for TermScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermScope::Global => write!(f, "global"),
            TermScope::Category(name) => write!(f, "category:{}", name),
            TermScope::Mod(id) => write!(f, "mod:{}", id),
        }
    }
}

impl FromStr for TermScope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "global" {
            return Ok(TermScope::Global);
        }
        match s.split_once(':') {
            Some(("category", name)) if !name.is_empty() => {
                Ok(TermScope::Category(name.to_string()))
            }
            Some(("mod", id)) if !id.is_empty() => Ok(TermScope::Mod(id.to_string())),
            _ => Err(ScopeParseError(s.to_string())),
        }
    }
}

impl Serialize for TermScope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TermScope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A terminology dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub scope: TermScope,
    pub source_text: String,
    pub target_text: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Term {
    pub fn new(
        scope: TermScope,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
        priority: i64,
    ) -> Self {
        Self {
            scope,
            source_text: source_text.into(),
            target_text: target_text.into(),
            priority,
            tags: Vec::new(),
        }
    }

    /// Scope weight plus the term's own priority.
    pub fn effective_priority(&self) -> i64 {
        self.scope.weight() + self.priority
    }
}

/// Why a consistency issue suggests the translation it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionReason {
    #[serde(rename = "most frequent")]
    MostFrequent,
    #[serde(rename = "official translation")]
    OfficialTranslation,
    #[serde(rename = "term dictionary")]
    TermDictionary,
}

impl fmt::Display for SuggestionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SuggestionReason::MostFrequent => "most frequent",
            SuggestionReason::OfficialTranslation => "official translation",
            SuggestionReason::TermDictionary => "term dictionary",
        };
        write!(f, "{}", text)
    }
}

/// The same source text translated more than one way within a mod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyIssue {
    pub mod_id: String,
    pub source_text: String,
    /// Distinct target strings, in first-seen order
    pub translations: Vec<String>,
    /// Occurrences of each target string
    pub counts: BTreeMap<String, usize>,
    /// Keys of every record in the group
    #[serde(rename = "keys", default, skip_serializing_if = "Vec::is_empty")]
    pub affected_keys: Vec<String>,
    /// One of `translations`, except when `suggestion_reason` is
    /// `TermDictionary`: the dictionary target may be a rendering no record uses yet.
    #[serde(rename = "suggested")]
    pub suggested_translation: String,
    #[serde(rename = "reason")]
    pub suggestion_reason: SuggestionReason,
}

/// A sample usage of a mined phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseExample {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    pub source_text: String,
    pub target_text: String,
}

/// A recurring source phrase with inconsistent translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseIssue {
    pub phrase: String,
    pub occurrences: usize,
    #[serde(rename = "translations")]
    pub translation_variants: BTreeMap<String, usize>,
    /// `max_variant_count / occurrences`, always below 1.0
    pub consistency_score: f64,
    pub in_dictionary: bool,
    #[serde(rename = "suggested")]
    pub suggested_translation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<PhraseExample>,
}

impl PhraseIssue {
    /// Ranking weight used by the combined report.
    pub fn impact(&self) -> f64 {
        self.occurrences as f64 * (1.0 - self.consistency_score)
    }
}

/// One record that uses a term's source word without its expected translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationDetail {
    pub key: String,
    pub source_text: String,
    pub target_text: String,
    pub expected: String,
}

/// All violations of one dictionary term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermViolation {
    pub term_source: String,
    pub term_target: String,
    pub term_scope: String,
    pub violations: Vec<ViolationDetail>,
    pub violation_count: usize,
}

/// Counts reported alongside the analysis lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_translations: usize,
    pub consistency_issues: usize,
    pub discovered_phrases: usize,
    pub inconsistent_phrases: usize,
    pub term_violations: usize,
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_date: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_mod: Option<String>,
    pub summary: AnalysisSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consistency: Vec<ConsistencyIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discovered_phrases: Vec<PhraseIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub term_violations: Vec<TermViolation>,
}

impl AnalysisResult {
    /// Empty result stamped with the current time.
    pub fn new(target_mod: Option<String>) -> Self {
        Self {
            analysis_date: Local::now(),
            target_mod,
            summary: AnalysisSummary::default(),
            consistency: Vec::new(),
            discovered_phrases: Vec::new(),
            term_violations: Vec::new(),
        }
    }
}

/// Which analyses a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Consistency,
    Phrases,
    Terms,
    #[default]
    All,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisKind::Consistency => "consistency",
            AnalysisKind::Phrases => "phrases",
            AnalysisKind::Terms => "terms",
            AnalysisKind::All => "all",
        };
        write!(f, "{}", name)
    }
}
