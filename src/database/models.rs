/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::models::{Term, TermScope};
use crate::errors::ScopeParseError;

/// Lifecycle status of a stored translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    /// Awaiting translation
    Pending,
    /// Translated, not yet reviewed
    Translated,
    /// Translated and reviewed
    Verified,
    /// Shipped by the mod authors
    Official,
    /// Carried over from a previous version with identical source
    Inherited,
    /// Carried over but the source text changed
    NeedsReview,
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationStatus::Pending => write!(f, "pending"),
            TranslationStatus::Translated => write!(f, "translated"),
            TranslationStatus::Verified => write!(f, "verified"),
            TranslationStatus::Official => write!(f, "official"),
            TranslationStatus::Inherited => write!(f, "inherited"),
            TranslationStatus::NeedsReview => write!(f, "needs_review"),
        }
    }
}

impl std::str::FromStr for TranslationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TranslationStatus::Pending),
            "translated" => Ok(TranslationStatus::Translated),
            "verified" => Ok(TranslationStatus::Verified),
            "official" => Ok(TranslationStatus::Official),
            "inherited" => Ok(TranslationStatus::Inherited),
            "needs_review" => Ok(TranslationStatus::NeedsReview),
            _ => Err(anyhow::anyhow!("Invalid translation status: {}", s)),
        }
    }
}

/// A mod known to the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
    /// Mod identifier (e.g. "create")
    pub id: String,
    /// Human-readable name
    pub display_name: String,
    pub author: Option<String>,
}

impl ModRecord {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            author: None,
        }
    }
}

/// One released revision of a mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModVersionRecord {
    /// Database ID
    pub id: i64,
    pub mod_id: String,
    pub version: String,
    /// Game version the release targets
    pub mc_version: String,
    /// Mod loader (forge, fabric, neoforge, quilt)
    pub loader: Option<String>,
    /// Whether this is the revision analyses look at
    pub is_default: bool,
}

impl ModVersionRecord {
    /// Create a new version record (without database ID)
    pub fn new(
        mod_id: impl Into<String>,
        version: impl Into<String>,
        mc_version: impl Into<String>,
    ) -> Self {
        Self {
            id: 0, // Will be assigned by database
            mod_id: mod_id.into(),
            version: version.into(),
            mc_version: mc_version.into(),
            loader: None,
            is_default: false,
        }
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// A source-language string identified by mod and key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Database ID
    pub id: i64,
    pub mod_id: String,
    /// Localization key (e.g. "block.create.gearbox")
    pub key: String,
    pub source_text: String,
    pub source_lang: String,
}

impl SourceRecord {
    /// Create a new source record (without database ID)
    pub fn new(
        mod_id: impl Into<String>,
        key: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            mod_id: mod_id.into(),
            key: key.into(),
            source_text: source_text.into(),
            source_lang: "en_us".to_string(),
        }
    }
}

/// A translation of one source string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Database ID
    pub id: i64,
    /// Reference to the translated source
    pub source_id: i64,
    /// Translated text; absent while pending
    pub target_text: Option<String>,
    pub target_lang: String,
    pub status: TranslationStatus,
    /// Who produced the translation ("community", "official", ...)
    pub translator: Option<String>,
}

impl TranslationRecord {
    /// Create a new translation record (without database ID)
    pub fn new(source_id: i64, target_text: impl Into<String>, status: TranslationStatus) -> Self {
        Self {
            id: 0,
            source_id,
            target_text: Some(target_text.into()),
            target_lang: "ja_jp".to_string(),
            status,
            translator: None,
        }
    }

    /// A pending record with no translation yet
    pub fn pending(source_id: i64) -> Self {
        Self {
            id: 0,
            source_id,
            target_text: None,
            target_lang: "ja_jp".to_string(),
            status: TranslationStatus::Pending,
            translator: None,
        }
    }
}

/// A dictionary term row; `scope` is kept raw until ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    /// Database ID
    pub id: i64,
    /// "global", "category:{name}" or "mod:{mod_id}"
    pub scope: String,
    pub source_text: String,
    pub target_text: String,
    pub priority: i64,
    pub tags: Vec<String>,
    /// Provenance ("official", "community", ...)
    pub source: Option<String>,
}

impl TermRecord {
    /// Create a new term record (without database ID)
    pub fn new(
        scope: impl Into<String>,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
        priority: i64,
    ) -> Self {
        Self {
            id: 0,
            scope: scope.into(),
            source_text: source_text.into(),
            target_text: target_text.into(),
            priority,
            tags: Vec::new(),
            source: None,
        }
    }

    /// Convert into a dictionary term, parsing the scope
    pub fn into_term(self) -> Result<Term, ScopeParseError> {
        let scope: TermScope = self.scope.parse()?;
        Ok(Term {
            scope,
            source_text: self.source_text,
            target_text: self.target_text,
            priority: self.priority,
            tags: self.tags,
        })
    }
}
