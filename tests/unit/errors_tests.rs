/*!
 * Tests for error types and conversions
 */

use moddict::analysis::TermScope;
use moddict::errors::{AnalysisError, AppError, ReportError, ScopeParseError, StoreError};

#[test]
fn test_storeError_readFailed_shouldDisplayCorrectly() {
    let error = StoreError::ReadFailed("database is locked".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Failed to read from translation store"));
    assert!(display.contains("database is locked"));
}

#[test]
fn test_storeError_invalidValue_shouldNameFieldAndValue() {
    let error = StoreError::InvalidValue {
        field: "translations.status",
        value: "done".to_string(),
    };
    assert_eq!(
        format!("{}", error),
        "Invalid stored value in translations.status: done"
    );
}

#[test]
fn test_scopeParseError_shouldNameTheScope() {
    let error = "pack:all".parse::<TermScope>().unwrap_err();
    assert_eq!(error, ScopeParseError("pack:all".to_string()));
    assert!(format!("{}", error).contains("pack:all"));
}

#[test]
fn test_appError_fromAnalysisError_shouldWrap() {
    let error: AppError = AnalysisError::Store(StoreError::ReadFailed("gone".to_string())).into();
    assert!(matches!(error, AppError::Analysis(_)));
    assert!(format!("{}", error).contains("gone"));
}

#[test]
fn test_appError_fromReportError_shouldWrap() {
    let error: AppError = ReportError::Buffer("flush failed".to_string()).into();
    assert!(matches!(error, AppError::Report(_)));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
}
