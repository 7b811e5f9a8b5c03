/*!
 * Tests for the term dictionary and compliance checking
 */

use moddict::analysis::terms::{contains_target, contains_word};
use moddict::analysis::{check_term_compliance, Term, TermDictionary, TermScope};

use crate::common::{global_term, mod_pair, mod_term, pair};

#[test]
fn test_containsWord_shouldRequireWordBoundaries() {
    assert!(contains_word("Mechanical Gearbox", "gearbox"));
    assert!(contains_word("Gearbox (Vertical)", "Gearbox"));
    assert!(!contains_word("Gearboxes", "Gearbox"));
    assert!(!contains_word("SuperGearbox", "Gearbox"));
}

#[test]
fn test_containsWord_shouldCheckEveryOccurrence() {
    assert!(contains_word("aaGear Gear", "Gear"));
    assert!(!contains_word("aaGear", "Gear"));
}

#[test]
fn test_containsWord_shouldTreatTermAsLiteralText() {
    assert!(contains_word("Casing Tier (II)", "tier (ii)"));
    assert!(!contains_word("Casing Tier II", "Tier (II)"));
    assert!(contains_word("Speed: 1.5x", "1.5x"));
    assert!(!contains_word("Speed: 135x", "1.5x"));
}

#[test]
fn test_containsWord_withNonAsciiNeighbours_shouldMatch() {
    assert!(contains_word("歯車Gear", "Gear"));
    assert!(!contains_word("Gear", ""));
}

#[test]
fn test_containsTarget_isPlainSubstring() {
    assert!(contains_target("ギアボックス群", "ギアボックス"));
    assert!(!contains_target("機械装置", "ギアボックス"));
}

#[test]
fn test_resolve_shouldPickHighestEffectivePriority() {
    let dictionary = TermDictionary::new(vec![
        Term::new(TermScope::Global, "Gear", "歯車", 150),
        Term::new(TermScope::Category("tech".to_string()), "Gear", "ギヤ", 0),
        mod_term("create", "Gear", "ギア"),
    ]);

    // global 100+150 beats category 200+0 without a mod filter
    assert_eq!(dictionary.resolve("gear", None).unwrap().target_text, "歯車");
    // mod 300+0 beats both when scoped to the mod
    assert_eq!(dictionary.resolve("Gear", Some("create")).unwrap().target_text, "ギア");
    assert_eq!(dictionary.resolve("Gear", Some("botania")).unwrap().target_text, "歯車");
}

#[test]
fn test_applicable_shouldExcludeOtherModsAndSortByPriority() {
    let dictionary = TermDictionary::new(vec![
        global_term("Shaft", "シャフト"),
        mod_term("botania", "Petal", "花びら"),
        mod_term("create", "Gearbox", "ギアボックス"),
    ]);

    let applicable = dictionary.applicable(Some("create"));
    let sources: Vec<&str> = applicable.iter().map(|t| t.source_text.as_str()).collect();
    assert_eq!(sources, vec!["Gearbox", "Shaft"]);
    assert_eq!(dictionary.len(), 3);
}

#[test]
fn test_checkTermCompliance_shouldGroupViolationsByTerm() {
    let dictionary = TermDictionary::new(vec![global_term("Shaft", "シャフト")]);
    let pairs = vec![
        pair("a", "Shaft", "軸"),
        pair("b", "Encased Shaft", "ケース入り軸"),
        pair("c", "Shaft", "シャフト"),
        pair("d", "Shafted", "軸"),
    ];

    let violations = check_term_compliance(&pairs, &dictionary, None);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].term_scope, "global");
    assert_eq!(violations[0].violation_count, 2);
    let keys: Vec<&str> = violations[0].violations.iter().map(|v| v.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn test_checkTermCompliance_withoutModFilter_shouldSkipModTerms() {
    let dictionary = TermDictionary::new(vec![mod_term("create", "Gearbox", "ギアボックス")]);
    let pairs = vec![mod_pair("create", "a", "Mechanical Gearbox", "機械装置")];

    assert!(check_term_compliance(&pairs, &dictionary, None).is_empty());
    assert_eq!(check_term_compliance(&pairs, &dictionary, Some("create")).len(), 1);
}
