/*!
 * # moddict - translation consistency analysis for game-mod localization
 *
 * A Rust library that inspects a corpus of translated mod strings and reports
 * where the same wording was translated in different ways.
 *
 * ## Features
 *
 * - Same-source consistency checking within each mod
 * - Phrase mining: recurring 1-4 word phrases and their aligned translations
 * - Terminology compliance against a scoped term dictionary
 * - Summary, JSON and CSV reports
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `analysis`: the analysis engine:
 *   - `analysis::tokenizer`: word tokens and N-grams
 *   - `analysis::alignment`: phrase projection into a translation
 *   - `analysis::consistency`: same-source divergence detection
 *   - `analysis::phrases`: phrase mining
 *   - `analysis::terms`: term dictionary and compliance checking
 *   - `analysis::output`: report rendering
 * - `store`: the read-only query surface the engine consumes
 * - `database`: SQLite-backed translation store
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod analysis;
pub mod app_config;
pub mod database;
pub mod errors;
pub mod store;

// Re-export main types for easier usage
pub use analysis::{AnalysisKind, AnalysisOptions, AnalysisResult, Analyzer, OutputFormat};
pub use app_config::Config;
pub use database::{DatabaseConnection, Repository};
pub use errors::{AnalysisError, AppError, ReportError, StoreError};
pub use store::{MemoryStore, TranslationStore};
