// src/infrastructure/json.rs
use crate::domain::candidate::{ImportProgress, ImportStats, ImportSummary, ParsedCandidate};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::validation::{validation_suggestions, ValidationReport, ValidationResult};
use serde::Serialize;
use std::io::Write;

/// Preview of a parsed import for `--json`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewView<'a> {
    pub stats: ImportStats,
    pub candidates: Vec<&'a ParsedCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ImportProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ImportSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedLinkView<'a> {
    #[serde(flatten)]
    pub result: &'a ValidationResult,
    pub suggestions: Vec<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationView<'a> {
    pub report: ValidationReport,
    pub results: Vec<CheckedLinkView<'a>>,
}

impl<'a> ValidationView<'a> {
    pub fn new(results: &'a [ValidationResult]) -> Self {
        Self {
            report: ValidationReport::from_results(results),
            results: results
                .iter()
                .map(|result| CheckedLinkView {
                    result,
                    suggestions: validation_suggestions(result),
                })
                .collect(),
        }
    }
}

pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> DomainResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DomainError::Serialization(format!("Failed to serialize to JSON: {}", e)))
}

/// Pretty JSON on stdout. Standard output carries pipeable content only.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> DomainResult<()> {
    let json = to_json_string(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}
