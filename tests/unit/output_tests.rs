/*!
 * Tests for report rendering
 */

use moddict::analysis::{
    analyze_all, render, AnalysisOptions, AnalysisResult, OutputFormat, Snapshot, TermDictionary,
};

use crate::common::{mod_term, pair};

fn sample_result() -> AnalysisResult {
    let snapshot = Snapshot {
        pairs: vec![
            pair("a", "Wrench", "レンチ"),
            pair("b", "Wrench", "レンチ"),
            pair("c", "Wrench", "スパナ"),
            pair("d", "Mechanical Gearbox", "機械装置"),
        ],
        dictionary: TermDictionary::new(vec![mod_term("create", "Gearbox", "ギアボックス")]),
    };
    analyze_all(&snapshot, &AnalysisOptions::for_mod("create"))
}

#[test]
fn test_render_summary_shouldIncludeEverySection() {
    let text = render(&sample_result(), OutputFormat::Summary).unwrap();

    assert!(text.starts_with("=== Translation Consistency Analysis ===\n"));
    assert!(text.contains("--- Consistency Issues (1) ---"));
    assert!(text.contains("    - \"レンチ\" (2)"));
    assert!(text.contains("  Reason: most frequent"));
    assert!(text.contains("--- Term Violations (1) ---"));
    assert!(text.contains("[VIOLATION] \"Gearbox\" -> \"ギアボックス\""));
    assert!(text.contains("  Scope: mod:create"));
    assert!(!text.contains("--- Discovered Phrases"));
    assert!(text.contains("Total translations: 4"));
}

#[test]
fn test_render_summaryWithoutTarget_shouldSayAllMods() {
    let text = render(&AnalysisResult::new(None), OutputFormat::Summary).unwrap();
    assert!(text.contains("Target: All mods"));
    assert!(text.contains("Consistency issues: 0"));
}

#[test]
fn test_render_json_shouldRoundTripResult() {
    let result = sample_result();
    let json = render(&result, OutputFormat::Json).unwrap();

    let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.summary, result.summary);
    assert_eq!(parsed.consistency, result.consistency);
    assert_eq!(parsed.term_violations, result.term_violations);
}

#[test]
fn test_render_csv_shouldStartWithHeader() {
    let csv = render(&sample_result(), OutputFormat::Csv).unwrap();
    let mut lines = csv.lines();

    assert_eq!(
        lines.next(),
        Some("type,mod_id,phrase,translations,suggested,occurrences,consistency_score,in_dictionary")
    );
    assert_eq!(lines.next(), Some("consistency,create,Wrench,レンチ|スパナ,レンチ,3,,"));
    assert_eq!(lines.next(), Some("term_violation,create,Gearbox,,ギアボックス,1,0.0,true"));
    assert_eq!(lines.next(), None);
}
