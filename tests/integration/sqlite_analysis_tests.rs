/*!
 * Analyzer runs against an on-disk SQLite database
 */

use moddict::analysis::{
    render, AnalysisKind, AnalysisOptions, Analyzer, OutputFormat, SuggestionReason,
};
use moddict::database::models::TermRecord;
use moddict::database::{DatabaseConnection, Repository};
use moddict::errors::AnalysisError;
use moddict::store::TranslationStore;

use crate::common::{
    create_temp_repository, init_test_logging, mod_pair, mod_term, official_pair, pair, repeated,
    seed_pairs, seed_terms,
};

#[tokio::test]
async fn test_runAll_overSeededDatabase_shouldReportEveryAnalysis() {
    let (_dir, repo) = create_temp_repository().unwrap();
    let mut pairs = vec![
        pair("item.create.wrench", "Wrench", "レンチ"),
        pair("item.create.wrench_alt", "Wrench", "レンチ"),
        pair("item.create.wrench_old", "Wrench", "スパナ"),
        pair("block.create.gearbox", "Mechanical Gearbox", "機械装置"),
    ];
    pairs.push(mod_pair("botania", "item.botania.wrench", "Wrench", "工具"));
    seed_pairs(&repo, &pairs).await.unwrap();
    seed_terms(&repo, &[mod_term("create", "Gearbox", "ギアボックス")]).await.unwrap();

    let analyzer = Analyzer::new(repo);
    let result = analyzer
        .run(AnalysisKind::All, &AnalysisOptions::for_mod("create"))
        .await
        .unwrap();

    assert_eq!(result.summary.total_translations, 4);
    assert_eq!(result.consistency.len(), 1);
    assert_eq!(result.consistency[0].suggested_translation, "レンチ");
    assert_eq!(result.term_violations.len(), 1);
    assert_eq!(result.term_violations[0].violations[0].key, "block.create.gearbox");
}

#[tokio::test]
async fn test_runConsistency_withOfficialRow_shouldSuggestOfficial() {
    let (_dir, repo) = create_temp_repository().unwrap();
    seed_pairs(
        &repo,
        &[
            pair("a", "Cogwheel", "コグホイール"),
            pair("b", "Cogwheel", "コグホイール"),
            pair("c", "Cogwheel", "歯車"),
            official_pair("d", "Cogwheel", "小型歯車"),
        ],
    )
    .await
    .unwrap();

    let result = Analyzer::new(repo)
        .run(AnalysisKind::Consistency, &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(result.consistency.len(), 1);
    assert_eq!(result.consistency[0].suggestion_reason, SuggestionReason::OfficialTranslation);
    assert_eq!(result.consistency[0].suggested_translation, "小型歯車");
    assert!(result.discovered_phrases.is_empty());
    assert!(result.term_violations.is_empty());
}

#[tokio::test]
async fn test_runTerms_withMalformedScopeRow_shouldIgnoreIt() {
    let (_dir, repo) = create_temp_repository().unwrap();
    seed_pairs(&repo, &[pair("a", "Mechanical Gearbox", "機械装置")]).await.unwrap();
    repo.save_term(&TermRecord::new("modpack:atm9", "Gearbox", "歯車箱", 100))
        .await
        .unwrap();

    assert!(repo.list_terms(None).await.unwrap().is_empty());

    let result = Analyzer::new(repo)
        .run(AnalysisKind::Terms, &AnalysisOptions::for_mod("create"))
        .await
        .unwrap();

    assert!(result.term_violations.is_empty());
    assert_eq!(result.summary.total_translations, 1);
}

#[tokio::test]
async fn test_runPhrases_twice_shouldProduceIdenticalOutput() {
    let (_dir, repo) = create_temp_repository().unwrap();
    let mut pairs = repeated("shaft", 3, "Shaft", "シャフト");
    pairs.extend(repeated("shaft_alt", 2, "Shaft", "軸"));
    pairs.push(pair("encased", "Encased Shaft", "ケース入りシャフト"));
    pairs.push(pair("gearshift", "Gearshift", "ギアシフト"));
    seed_pairs(&repo, &pairs).await.unwrap();

    let analyzer = Analyzer::new(repo);
    let options = AnalysisOptions::default();
    let first = analyzer.run(AnalysisKind::Phrases, &options).await.unwrap();
    let second = analyzer.run(AnalysisKind::Phrases, &options).await.unwrap();

    assert!(!first.discovered_phrases.is_empty());
    assert_eq!(first.discovered_phrases, second.discovered_phrases);
    assert_eq!(
        serde_json::to_string(&first.discovered_phrases).unwrap(),
        serde_json::to_string(&second.discovered_phrases).unwrap()
    );
}

#[tokio::test]
async fn test_renderedReport_shouldWriteToFile() {
    let (dir, repo) = create_temp_repository().unwrap();
    seed_pairs(
        &repo,
        &[
            pair("a", "Wrench", "レンチ"),
            pair("b", "Wrench", "スパナ"),
        ],
    )
    .await
    .unwrap();

    let result = Analyzer::new(repo)
        .run(AnalysisKind::Consistency, &AnalysisOptions::default())
        .await
        .unwrap();
    let report = render(&result, OutputFormat::Csv).unwrap();

    let out = dir.path().join("report.csv");
    std::fs::write(&out, &report).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(written.contains("consistency,create,Wrench,レンチ|スパナ"));
}

#[tokio::test]
async fn test_runAll_overReadOnlyReopenedDatabase_shouldMatchSeededData() {
    let (dir, repo) = create_temp_repository().unwrap();
    let mut pairs = repeated("wrench", 2, "Wrench", "レンチ");
    pairs.push(pair("wrench.old", "Wrench", "スパナ"));
    seed_pairs(&repo, &pairs).await.unwrap();
    drop(repo);

    let db = DatabaseConnection::open_read_only(dir.path().join("moddict.db")).unwrap();
    let result = Analyzer::new(Repository::new(db))
        .run(AnalysisKind::Consistency, &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(result.summary.total_translations, 3);
    assert_eq!(result.consistency.len(), 1);
}

#[tokio::test]
async fn test_run_overDatabaseWithoutTranslationTables_shouldFailInsteadOfReportingEmpty() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE terms (id INTEGER PRIMARY KEY, scope TEXT);")
        .unwrap();

    let db = DatabaseConnection::open_read_only(&path).unwrap();
    let result = Analyzer::new(Repository::new(db))
        .run(AnalysisKind::All, &AnalysisOptions::default())
        .await;

    assert!(matches!(result, Err(AnalysisError::Store(_))));
}
