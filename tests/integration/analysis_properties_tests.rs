/*!
 * End-to-end analysis properties over in-memory corpora
 */

use moddict::analysis::{
    AnalysisKind, AnalysisOptions, Analyzer, SuggestionReason, TranslationPair, ALL_MAX_PHRASES,
};
use moddict::store::MemoryStore;

use crate::common::{global_term, mod_pair, mod_term, pair, repeated};

#[tokio::test]
async fn test_uniformGroup_shouldProduceNoIssue() {
    let store = MemoryStore::with_pairs(repeated("cog", 5, "Cogwheel", "歯車"));
    let result = Analyzer::new(store)
        .run(AnalysisKind::Consistency, &AnalysisOptions::default())
        .await
        .unwrap();

    assert!(result.consistency.is_empty());
    assert_eq!(result.summary.total_translations, 5);
}

#[tokio::test]
async fn test_separatorOnlyDifference_shouldProduceNoIssue() {
    let store = MemoryStore::with_pairs(vec![
        pair("a", "Redstone Block", "レッドストーンブロック"),
        pair("b", "Redstone Block", "レッドストーン・ブロック"),
    ]);
    let result = Analyzer::new(store)
        .run(AnalysisKind::Consistency, &AnalysisOptions::default())
        .await
        .unwrap();

    assert!(result.consistency.is_empty());
}

#[tokio::test]
async fn test_majorityVariant_shouldBeSuggested() {
    let store = MemoryStore::with_pairs(vec![
        pair("a", "Wrench", "レンチ"),
        pair("b", "Wrench", "レンチ"),
        pair("c", "Wrench", "スパナ"),
    ]);
    let result = Analyzer::new(store)
        .run(AnalysisKind::Consistency, &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(result.consistency.len(), 1);
    let issue = &result.consistency[0];
    assert_eq!(issue.suggested_translation, "レンチ");
    assert_eq!(issue.suggestion_reason, SuggestionReason::MostFrequent);
    assert_eq!(issue.counts.get("レンチ"), Some(&2));
    assert_eq!(issue.counts.get("スパナ"), Some(&1));
    assert_eq!(issue.counts.len(), 2);
}

#[tokio::test]
async fn test_phraseMining_shouldRespectMinCountAndExcludeConsistentPhrases() {
    let mut pairs = repeated("gearbox", 4, "Gearbox", "ギアボックス");
    pairs.extend(repeated("gearbox_alt", 2, "Gearbox", "歯車箱"));
    pairs.extend(repeated("belt", 2, "Belt", "ベルト"));
    pairs.push(pair("belt_alt", "Belt", "帯"));
    pairs.extend(repeated("chute", 6, "Chute", "シュート"));

    let analyzer = Analyzer::new(MemoryStore::with_pairs(pairs));
    let result = analyzer
        .run(AnalysisKind::Phrases, &AnalysisOptions::default().with_min_count(4))
        .await
        .unwrap();

    let phrases: Vec<&str> = result.discovered_phrases.iter().map(|p| p.phrase.as_str()).collect();
    assert_eq!(phrases, vec!["Gearbox"]);
    assert!(result
        .discovered_phrases
        .iter()
        .all(|p| p.occurrences >= 4 && p.consistency_score < 1.0));
}

#[tokio::test]
async fn test_phraseMining_shouldBeIdempotent() {
    let mut pairs = repeated("gearbox", 3, "Andesite Gearbox", "安山岩ギアボックス");
    pairs.extend(repeated("brass", 3, "Brass Gearbox", "真鍮の歯車箱"));
    pairs.extend(repeated("plain", 2, "Gearbox", "ギアボックス"));

    let analyzer = Analyzer::new(MemoryStore::with_pairs(pairs));
    let options = AnalysisOptions::default();

    let first = analyzer.run(AnalysisKind::Phrases, &options).await.unwrap();
    let second = analyzer.run(AnalysisKind::Phrases, &options).await.unwrap();

    assert_eq!(first.discovered_phrases, second.discovered_phrases);
}

#[tokio::test]
async fn test_modScopedTerm_shouldFlagUnmatchedRecord() {
    let store = MemoryStore::new(
        vec![
            mod_pair("create", "block.create.gearbox", "Mechanical Gearbox", "機械装置"),
            mod_pair("botania", "block.botania.gearbox", "Mechanical Gearbox", "機械装置"),
        ],
        vec![mod_term("create", "Gearbox", "ギアボックス")],
    );

    let result = Analyzer::new(store)
        .run(AnalysisKind::Terms, &AnalysisOptions::for_mod("create"))
        .await
        .unwrap();

    assert_eq!(result.term_violations.len(), 1);
    let violation = &result.term_violations[0];
    assert_eq!(violation.term_source, "Gearbox");
    assert_eq!(violation.violation_count, 1);
    assert_eq!(violation.violations[0].key, "block.create.gearbox");
    assert_eq!(violation.violations[0].expected, "ギアボックス");
}

fn gear_store() -> MemoryStore {
    let mut pairs = repeated("gear", 2, "Gear", "歯車");
    pairs.push(pair("gear_alt", "Gear", "ギヤ"));
    MemoryStore::new(
        pairs,
        vec![global_term("Gear", "歯車"), mod_term("create", "Gear", "ギア")],
    )
}

#[tokio::test]
async fn test_modScopedTerm_shouldWinOverGlobalSuggestion() {
    let result = Analyzer::new(gear_store())
        .run(AnalysisKind::Consistency, &AnalysisOptions::for_mod("create"))
        .await
        .unwrap();

    assert_eq!(result.consistency.len(), 1);
    assert_eq!(result.consistency[0].suggested_translation, "ギア");
    assert_eq!(result.consistency[0].suggestion_reason, SuggestionReason::TermDictionary);

    let result = Analyzer::new(gear_store())
        .run(AnalysisKind::Phrases, &AnalysisOptions::for_mod("create"))
        .await
        .unwrap();

    assert_eq!(result.discovered_phrases.len(), 1);
    assert!(result.discovered_phrases[0].in_dictionary);
    assert_eq!(result.discovered_phrases[0].suggested_translation, "ギア");
}

#[tokio::test]
async fn test_allModsRun_shouldOnlyApplyGlobalTerms() {
    let result = Analyzer::new(gear_store())
        .run(AnalysisKind::Phrases, &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(result.discovered_phrases[0].suggested_translation, "歯車");
}

/// Records of `source`, one block of keys per `(target, count)`
fn variants(prefix: &str, source: &str, targets: &[(&str, usize)]) -> Vec<TranslationPair> {
    targets
        .iter()
        .enumerate()
        .flat_map(|(v, (target, count))| {
            repeated(&format!("{}.{}", prefix, v), *count, source, target)
        })
        .collect()
}

#[tokio::test]
async fn test_allRun_shouldRankPhrasesByImpact() {
    // Gearbox: score 0.25, impact 15. Cogwheel: score 0.45, impact 22.
    let mut pairs = variants(
        "gearbox",
        "Gearbox",
        &[("ギアボックス", 5), ("歯車箱", 5), ("ギア箱", 5), ("変速機", 5)],
    );
    pairs.extend(variants(
        "cogwheel",
        "Cogwheel",
        &[("歯車", 18), ("コグホイール", 12), ("コグ", 10)],
    ));
    let analyzer = Analyzer::new(MemoryStore::with_pairs(pairs));

    let phrases_only = analyzer
        .run(AnalysisKind::Phrases, &AnalysisOptions::default())
        .await
        .unwrap();
    let by_score: Vec<&str> = phrases_only
        .discovered_phrases
        .iter()
        .map(|p| p.phrase.as_str())
        .collect();
    assert_eq!(by_score, vec!["Gearbox", "Cogwheel"]);

    let all = analyzer
        .run(AnalysisKind::All, &AnalysisOptions::default())
        .await
        .unwrap();
    let by_impact: Vec<&str> = all.discovered_phrases.iter().map(|p| p.phrase.as_str()).collect();
    assert_eq!(by_impact, vec!["Cogwheel", "Gearbox"]);
    assert_eq!(all.summary.discovered_phrases, 2);
}

#[tokio::test]
async fn test_allRun_shouldDropLowOccurrenceAndMostlyConsistentPhrases() {
    // Shaft: 14 occurrences. Belt: score 0.6. Chute: 16 occurrences, score 0.4375.
    let mut pairs = variants("shaft", "Shaft", &[("シャフト", 6), ("軸", 5), ("回転軸", 3)]);
    pairs.extend(variants("belt", "Belt", &[("ベルト", 12), ("帯", 8)]));
    pairs.extend(variants(
        "chute",
        "Chute",
        &[("シュート", 7), ("滑り台", 5), ("落とし口", 4)],
    ));

    let result = Analyzer::new(MemoryStore::with_pairs(pairs))
        .run(AnalysisKind::All, &AnalysisOptions::default())
        .await
        .unwrap();

    let phrases: Vec<&str> = result.discovered_phrases.iter().map(|p| p.phrase.as_str()).collect();
    assert_eq!(phrases, vec!["Chute"]);
}

#[tokio::test]
async fn test_allRun_shouldKeepAtMostFiveHundredPhrases() {
    let targets = [("ウィジェット", 5), ("ウイジェット", 5), ("ウィジット", 5)];
    let pairs: Vec<TranslationPair> = (0..ALL_MAX_PHRASES + 1)
        .flat_map(|i| variants(&format!("widget{}", i), &format!("Widget{}", i), &targets))
        .collect();

    let result = Analyzer::new(MemoryStore::with_pairs(pairs))
        .run(AnalysisKind::All, &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(result.discovered_phrases.len(), ALL_MAX_PHRASES);
    assert_eq!(result.summary.discovered_phrases, ALL_MAX_PHRASES);
    assert_eq!(result.discovered_phrases[0].phrase, "Widget0");
    assert!(!result
        .discovered_phrases
        .iter()
        .any(|p| p.phrase == format!("Widget{}", ALL_MAX_PHRASES)));
}
