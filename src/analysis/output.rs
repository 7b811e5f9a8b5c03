/*!
 * Renderings of an `AnalysisResult`: pretty JSON, a flat CSV table and a
 * human-readable text report.
 */

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

use super::models::{AnalysisResult, PhraseIssue};
use crate::errors::ReportError;

/// Examples shown per group in the text report.
const SUMMARY_EXAMPLES: usize = 3;

/// CSV header, one row per issue, phrase or violation.
const CSV_HEADER: [&str; 8] = [
    "type",
    "mod_id",
    "phrase",
    "translations",
    "suggested",
    "occurrences",
    "consistency_score",
    "in_dictionary",
];

/// Report format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "summary"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" | "text" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(anyhow::anyhow!("Invalid output format: {}", s)),
        }
    }
}

/// Render `result` in the requested format.
pub fn render(result: &AnalysisResult, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Summary => Ok(format_summary(result)),
        OutputFormat::Json => format_json(result),
        OutputFormat::Csv => format_csv(result),
    }
}

/// Pretty-printed JSON.
pub fn format_json(result: &AnalysisResult) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Flat CSV table of every issue, phrase and violation.
pub fn format_csv(result: &AnalysisResult) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    let target_mod = result.target_mod.clone().unwrap_or_default();

    for issue in &result.consistency {
        writer.write_record([
            "consistency",
            issue.mod_id.as_str(),
            issue.source_text.as_str(),
            issue.translations.join("|").as_str(),
            issue.suggested_translation.as_str(),
            issue.affected_keys.len().to_string().as_str(),
            "",
            "",
        ])?;
    }

    for phrase in &result.discovered_phrases {
        // BTreeMap keys are already sorted
        let variants: Vec<&str> = phrase.translation_variants.keys().map(String::as_str).collect();
        writer.write_record([
            "discovered",
            target_mod.as_str(),
            phrase.phrase.as_str(),
            variants.join("|").as_str(),
            phrase.suggested_translation.as_str(),
            phrase.occurrences.to_string().as_str(),
            format!("{:.2}", phrase.consistency_score).as_str(),
            if phrase.in_dictionary { "true" } else { "false" },
        ])?;
    }

    for violation in &result.term_violations {
        writer.write_record([
            "term_violation",
            target_mod.as_str(),
            violation.term_source.as_str(),
            "",
            violation.term_target.as_str(),
            violation.violation_count.to_string().as_str(),
            "0.0",
            "true",
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Buffer(e.to_string()))
}

/// Phrases ordered least consistent first, then most frequent.
fn by_consistency(phrases: &[PhraseIssue]) -> Vec<&PhraseIssue> {
    let mut sorted: Vec<&PhraseIssue> = phrases.iter().collect();
    sorted.sort_by(|a, b| {
        a.consistency_score
            .total_cmp(&b.consistency_score)
            .then_with(|| b.occurrences.cmp(&a.occurrences))
    });
    sorted
}

/// Human-readable report.
pub fn format_summary(result: &AnalysisResult) -> String {
    let mut buf = String::new();

    // Writing into a String cannot fail
    let _ = write_summary(&mut buf, result);
    buf
}

fn write_summary(buf: &mut String, result: &AnalysisResult) -> fmt::Result {
    writeln!(buf, "=== Translation Consistency Analysis ===")?;
    match &result.target_mod {
        Some(target) => writeln!(buf, "Target: {}", target)?,
        None => writeln!(buf, "Target: All mods")?,
    }
    writeln!(buf, "Date: {}\n", result.analysis_date.format("%Y-%m-%d %H:%M:%S"))?;

    if !result.consistency.is_empty() {
        writeln!(buf, "--- Consistency Issues ({}) ---", result.consistency.len())?;
        for issue in &result.consistency {
            writeln!(buf, "\n[ISSUE] \"{}\"", issue.source_text)?;
            writeln!(buf, "  Mod: {}", issue.mod_id)?;
            writeln!(buf, "  Translations:")?;
            for translation in &issue.translations {
                let count = issue.counts.get(translation).copied().unwrap_or(0);
                writeln!(buf, "    - \"{}\" ({})", translation, count)?;
            }
            writeln!(buf, "  Suggested: \"{}\"", issue.suggested_translation)?;
            writeln!(buf, "  Reason: {}", issue.suggestion_reason)?;
        }
        writeln!(buf)?;
    }

    if !result.discovered_phrases.is_empty() {
        writeln!(buf, "--- Discovered Phrases ({}) ---", result.discovered_phrases.len())?;
        for phrase in by_consistency(&result.discovered_phrases) {
            let mark = if phrase.in_dictionary { "" } else { " [NEW]" };
            writeln!(
                buf,
                "\n[{:.0}%] \"{}\"{}",
                phrase.consistency_score * 100.0,
                phrase.phrase,
                mark
            )?;
            writeln!(buf, "  Occurrences: {}", phrase.occurrences)?;
            writeln!(buf, "  Translations:")?;

            let mut variants: Vec<(&String, &usize)> = phrase.translation_variants.iter().collect();
            variants.sort_by(|a, b| b.1.cmp(a.1));
            for (text, count) in variants {
                writeln!(buf, "    - \"{}\" ({})", text, count)?;
            }
            writeln!(buf, "  Suggested: \"{}\"", phrase.suggested_translation)?;

            if !phrase.examples.is_empty() {
                writeln!(buf, "  Examples:")?;
                for example in phrase.examples.iter().take(SUMMARY_EXAMPLES) {
                    writeln!(
                        buf,
                        "    \"{}\" -> \"{}\"",
                        example.source_text, example.target_text
                    )?;
                }
            }
        }
        writeln!(buf)?;
    }

    if !result.term_violations.is_empty() {
        writeln!(buf, "--- Term Violations ({}) ---", result.term_violations.len())?;
        for violation in &result.term_violations {
            writeln!(
                buf,
                "\n[VIOLATION] \"{}\" -> \"{}\"",
                violation.term_source, violation.term_target
            )?;
            writeln!(buf, "  Scope: {}", violation.term_scope)?;
            writeln!(buf, "  Violations: {} keys", violation.violation_count)?;
            for detail in violation.violations.iter().take(SUMMARY_EXAMPLES) {
                writeln!(
                    buf,
                    "    - \"{}\" -> \"{}\" (expected: \"{}\")",
                    detail.source_text, detail.target_text, detail.expected
                )?;
            }
            if violation.violations.len() > SUMMARY_EXAMPLES {
                writeln!(
                    buf,
                    "    ... and {} more",
                    violation.violations.len() - SUMMARY_EXAMPLES
                )?;
            }
        }
        writeln!(buf)?;
    }

    let summary = &result.summary;
    writeln!(buf, "=== Summary ===")?;
    writeln!(buf, "Total translations: {}", summary.total_translations)?;
    writeln!(buf, "Consistency issues: {}", summary.consistency_issues)?;
    writeln!(buf, "Discovered phrases: {}", summary.discovered_phrases)?;
    writeln!(buf, "Inconsistent phrases: {}", summary.inconsistent_phrases)?;
    writeln!(buf, "Term violations: {}", summary.term_violations)?;

    Ok(())
}
