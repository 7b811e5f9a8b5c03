/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API over the translation corpus,
 * abstracting away the SQL details and providing type-safe access.
 * Writes are used by import tooling and tests; the reads back the
 * `TranslationStore` the analysis engine consumes.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use rusqlite::{params, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{ModRecord, ModVersionRecord, SourceRecord, TermRecord, TranslationRecord};
use crate::analysis::models::{PairStatus, Term, TermScope, TranslationPair};
use crate::errors::StoreError;
use crate::store::TranslationStore;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// The underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Mod Operations
    // =========================================================================

    /// Insert or update a mod
    pub async fn save_mod(&self, record: &ModRecord) -> Result<()> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO mods (id, display_name, author, created_at)
                    VALUES (?1, ?2, ?3, datetime('now'))
                    ON CONFLICT(id) DO UPDATE SET
                        display_name = excluded.display_name,
                        author = excluded.author
                    "#,
                    params![record.id, record.display_name, record.author],
                )?;
                Ok(())
            })
            .await
    }

    /// Insert a mod version and return its ID.
    ///
    /// A version saved as default demotes every other version of the same mod.
    pub async fn save_mod_version(&self, record: &ModVersionRecord) -> Result<i64> {
        let record = record.clone();

        self.db
            .transaction_async(move |tx| {
                if record.is_default {
                    tx.execute(
                        "UPDATE mod_versions SET is_default = 0 WHERE mod_id = ?1",
                        [&record.mod_id],
                    )?;
                }

                tx.execute(
                    r#"
                    INSERT INTO mod_versions (mod_id, version, mc_version, loader, is_default, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))
                    "#,
                    params![
                        record.mod_id,
                        record.version,
                        record.mc_version,
                        record.loader,
                        record.is_default,
                    ],
                )?;
                Ok(tx.last_insert_rowid())
            })
            .await
    }

    /// The default version of a mod, if one is set
    pub async fn get_default_version(&self, mod_id: &str) -> Result<Option<ModVersionRecord>> {
        let mod_id = mod_id.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        r#"
                        SELECT id, mod_id, version, mc_version, loader, is_default
                        FROM mod_versions
                        WHERE mod_id = ?1 AND is_default = 1
                        "#,
                        [&mod_id],
                        |row| {
                            Ok(ModVersionRecord {
                                id: row.get(0)?,
                                mod_id: row.get(1)?,
                                version: row.get(2)?,
                                mc_version: row.get(3)?,
                                loader: row.get(4)?,
                                is_default: row.get(5)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    // =========================================================================
    // Source Operations
    // =========================================================================

    /// Insert a source string and return its ID
    pub async fn save_source(&self, record: &SourceRecord) -> Result<i64> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO translation_sources (mod_id, key, source_text, source_lang, created_at)
                    VALUES (?1, ?2, ?3, ?4, datetime('now'))
                    "#,
                    params![record.mod_id, record.key, record.source_text, record.source_lang],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// Record that a source string ships in a mod version
    pub async fn link_source_version(&self, source_id: i64, mod_version_id: i64) -> Result<()> {
        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO source_versions (source_id, mod_version_id) VALUES (?1, ?2)",
                    params![source_id, mod_version_id],
                )?;
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Translation Operations
    // =========================================================================

    /// Insert or update the translation of a source and return its ID
    pub async fn save_translation(&self, record: &TranslationRecord) -> Result<i64> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                let id: i64 = conn.query_row(
                    r#"
                    INSERT INTO translations (source_id, target_text, target_lang, status, translator, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'), datetime('now'))
                    ON CONFLICT(source_id, target_lang) DO UPDATE SET
                        target_text = excluded.target_text,
                        status = excluded.status,
                        translator = excluded.translator,
                        updated_at = datetime('now')
                    RETURNING id
                    "#,
                    params![
                        record.source_id,
                        record.target_text,
                        record.target_lang,
                        record.status.to_string(),
                        record.translator,
                    ],
                    |row| row.get(0),
                )?;
                Ok(id)
            })
            .await
    }

    /// Translated records of each mod's default version, ordered by mod and key.
    ///
    /// Only `translated`, `verified` and `official` rows with a non-empty
    /// target are returned.
    pub async fn get_translated_pairs(
        &self,
        mod_id: Option<&str>,
    ) -> Result<Vec<(TranslationPair, String)>> {
        let mod_id = mod_id.map(str::to_string);

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT ts.mod_id, ts.key, ts.source_text, t.target_text, t.status
                    FROM translations t
                    JOIN translation_sources ts ON ts.id = t.source_id
                    JOIN source_versions sv ON sv.source_id = ts.id
                    JOIN mod_versions mv ON mv.id = sv.mod_version_id
                    WHERE mv.is_default = 1
                      AND t.status IN ('translated', 'verified', 'official')
                      AND t.target_text IS NOT NULL
                      AND t.target_text != ''
                      AND (?1 IS NULL OR ts.mod_id = ?1)
                    ORDER BY ts.mod_id, ts.key, t.id
                    "#,
                )?;

                let rows = stmt.query_map([&mod_id], |row| {
                    let status: String = row.get(4)?;
                    let pair = TranslationPair::new(
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        PairStatus::Translated,
                    );
                    Ok((pair, status))
                })?;

                let pairs = rows.collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(pairs)
            })
            .await
    }

    // =========================================================================
    // Term Operations
    // =========================================================================

    /// Insert a dictionary term and return its ID
    pub async fn save_term(&self, record: &TermRecord) -> Result<i64> {
        let record = record.clone();
        let tags = if record.tags.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&record.tags)?)
        };

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO terms (scope, source_text, target_text, priority, tags, source, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
                    "#,
                    params![
                        record.scope,
                        record.source_text,
                        record.target_text,
                        record.priority,
                        tags,
                        record.source,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// Raw term rows, optionally restricted to one scope string, highest priority first
    pub async fn get_term_records(&self, scope: Option<String>) -> Result<Vec<TermRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, scope, source_text, target_text, priority, tags, source
                    FROM terms
                    WHERE (?1 IS NULL OR scope = ?1)
                    ORDER BY priority DESC, id
                    "#,
                )?;

                let rows = stmt.query_map([&scope], |row| {
                    let tags: Option<String> = row.get(5)?;
                    Ok(TermRecord {
                        id: row.get(0)?,
                        scope: row.get(1)?,
                        source_text: row.get(2)?,
                        target_text: row.get(3)?,
                        priority: row.get(4)?,
                        tags: parse_tags(tags.as_deref()),
                        source: row.get(6)?,
                    })
                })?;

                let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            })
            .await
    }

    /// Dictionary terms; rows with a malformed scope are dropped
    pub async fn get_terms(&self, scope: Option<&TermScope>) -> Result<Vec<Term>> {
        let records = self.get_term_records(scope.map(|s| s.to_string())).await?;

        let terms = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                match record.into_term() {
                    Ok(term) => Some(term),
                    Err(e) => {
                        debug!("Dropping term {}: {}", id, e);
                        None
                    }
                }
            })
            .collect();

        Ok(terms)
    }
}

/// JSON-encoded tag list; anything unreadable counts as no tags
fn parse_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) if !raw.is_empty() => serde_json::from_str(raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed term tags {:?}: {}", raw, e);
            Vec::new()
        }),
        _ => Vec::new(),
    }
}

#[async_trait]
impl TranslationStore for Repository {
    async fn translated_pairs(
        &self,
        mod_id: Option<&str>,
    ) -> Result<Vec<TranslationPair>, StoreError> {
        let rows = self.get_translated_pairs(mod_id).await?;

        rows.into_iter()
            .map(|(mut pair, status)| {
                pair.status = status.parse().map_err(|_| StoreError::InvalidValue {
                    field: "translations.status",
                    value: status.clone(),
                })?;
                Ok(pair)
            })
            .collect()
    }

    async fn list_terms(&self, scope: Option<&TermScope>) -> Result<Vec<Term>, StoreError> {
        Ok(self.get_terms(scope).await?)
    }
}
