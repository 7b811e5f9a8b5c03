/*!
 * The read-only query surface the analysis engine consumes.
 *
 * A `TranslationStore` hands out the translated records of each mod's default
 * revision and the terminology dictionary. `Repository` implements it over
 * SQLite; `MemoryStore` over plain vectors.
 */

use async_trait::async_trait;

use crate::analysis::models::{Term, TermScope, TranslationPair};
use crate::errors::StoreError;

/// Source of translation records and dictionary terms.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Translated records (`translated`, `verified` or `official`, non-empty target)
    /// of the default revision of `mod_id`, or of every mod when `None`.
    async fn translated_pairs(
        &self,
        mod_id: Option<&str>,
    ) -> Result<Vec<TranslationPair>, StoreError>;

    /// Terms in `scope`, or the whole dictionary when `None`.
    async fn list_terms(&self, scope: Option<&TermScope>) -> Result<Vec<Term>, StoreError>;
}

/// In-memory store for tests, benchmarks and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pairs: Vec<TranslationPair>,
    terms: Vec<Term>,
}

impl MemoryStore {
    pub fn new(pairs: Vec<TranslationPair>, terms: Vec<Term>) -> Self {
        Self { pairs, terms }
    }

    pub fn with_pairs(pairs: Vec<TranslationPair>) -> Self {
        Self::new(pairs, Vec::new())
    }
}

#[async_trait]
impl TranslationStore for MemoryStore {
    async fn translated_pairs(
        &self,
        mod_id: Option<&str>,
    ) -> Result<Vec<TranslationPair>, StoreError> {
        Ok(self
            .pairs
            .iter()
            .filter(|pair| !pair.target_text.is_empty())
            .filter(|pair| mod_id.is_none_or(|id| pair.mod_id == id))
            .cloned()
            .collect())
    }

    async fn list_terms(&self, scope: Option<&TermScope>) -> Result<Vec<Term>, StoreError> {
        Ok(self
            .terms
            .iter()
            .filter(|term| scope.is_none_or(|s| term.scope == *s))
            .cloned()
            .collect())
    }
}
