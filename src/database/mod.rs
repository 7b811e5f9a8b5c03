/*!
 * Database module for the translation corpus.
 *
 * This module provides SQLite-based persistence for:
 * - Mods, their versions and the default revision of each
 * - Source strings and their translations
 * - The terminology dictionary
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::Repository;
