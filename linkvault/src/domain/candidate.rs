// src/domain/candidate.rs
use crate::domain::bookmark::{BulkBookmarkData, Identified, ImportDefaults};
use crate::domain::duplicate::DuplicateCheck;
use crate::domain::services::metadata::UrlMetadata;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

pub const INVALID_URL_FORMAT: &str = "Invalid URL format";

/// Lifecycle marker of a candidate during the import phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Pending,
    Processing,
    Success,
    Failed,
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CandidateStatus::Pending => "pending",
            CandidateStatus::Processing => "processing",
            CandidateStatus::Success => "success",
            CandidateStatus::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// A prospective bookmark extracted from one input line.
///
/// Owned by a single import session and never persisted. An invalid
/// candidate is never selected: [`ParsedCandidate::set_selected`] refuses to
/// select it and [`ParsedCandidate::is_importable`] is false for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCandidate {
    pub id: String,
    pub url: String,
    pub original_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub favicon: Option<String>,
    pub is_valid: bool,
    pub error: Option<String>,
    pub is_duplicate: bool,
    pub existing_bookmark_id: Option<String>,
    selected: bool,
    pub status: CandidateStatus,
    pub retry_count: u32,
}

impl ParsedCandidate {
    /// Candidate whose URL passed the grammar check, annotated with its duplicate state.
    /// Selected by default unless it duplicates an existing bookmark.
    pub fn valid(
        original_line: &str,
        url: &str,
        title: String,
        description: Option<String>,
        duplicate: DuplicateCheck,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            original_url: original_line.to_string(),
            title: Some(title),
            description,
            favicon: None,
            is_valid: true,
            error: None,
            is_duplicate: duplicate.is_duplicate,
            existing_bookmark_id: duplicate.existing_id,
            selected: !duplicate.is_duplicate,
            status: CandidateStatus::Pending,
            retry_count: 0,
        }
    }

    /// Candidate whose URL failed the grammar check. Never duplicate-checked or enriched.
    pub fn invalid(original_line: &str, url: &str, title: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            original_url: original_line.to_string(),
            title,
            description: None,
            favicon: None,
            is_valid: false,
            error: Some(INVALID_URL_FORMAT.to_string()),
            is_duplicate: false,
            existing_bookmark_id: None,
            selected: false,
            status: CandidateStatus::Failed,
            retry_count: 0,
        }
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Change the selection; an invalid candidate stays unselected.
    /// Returns the selection state after the call.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        self.selected = selected && self.is_valid;
        self.selected
    }

    pub fn toggle_selected(&mut self) -> bool {
        let next = !self.selected;
        self.set_selected(next)
    }

    pub fn is_importable(&self) -> bool {
        self.is_valid && self.selected
    }

    /// Merge an enrichment patch; fields the patch lacks keep their current value.
    pub fn apply_metadata(&mut self, metadata: UrlMetadata) {
        if metadata.title.is_some() {
            self.title = metadata.title;
        }
        if metadata.description.is_some() {
            self.description = metadata.description;
        }
        if metadata.favicon.is_some() {
            self.favicon = metadata.favicon;
        }
    }

    /// Payload entry for bulk creation, merged with the session defaults.
    pub fn to_bulk_data(&self, defaults: &ImportDefaults) -> BulkBookmarkData {
        BulkBookmarkData {
            url: self.url.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            folder_id: defaults.folder_id.clone(),
            tag_ids: defaults.tag_ids.clone(),
            favicon: self.favicon.clone(),
        }
    }
}

impl Identified for ParsedCandidate {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Aggregate counters of one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportProgress {
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
}

impl ImportProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// `processed / total * 100`, clamped to `[0, 100]`; zero for an empty run.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.processed as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

impl Serialize for ImportProgress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ImportProgress", 5)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("processed", &self.processed)?;
        state.serialize_field("successful", &self.successful)?;
        state.serialize_field("failed", &self.failed)?;
        state.serialize_field("percentage", &self.percentage())?;
        state.end()
    }
}

/// Counts over a preview list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub duplicates: usize,
    pub selected: usize,
}

impl ImportStats {
    pub fn from_candidates(candidates: &[ParsedCandidate]) -> Self {
        candidates.iter().fold(
            Self {
                total: candidates.len(),
                ..Default::default()
            },
            |mut stats, c| {
                if c.is_valid {
                    stats.valid += 1;
                } else {
                    stats.invalid += 1;
                }
                if c.is_duplicate {
                    stats.duplicates += 1;
                }
                if c.is_importable() {
                    stats.selected += 1;
                }
                stats
            },
        )
    }
}

/// Display-time visibility of a preview list. Never mutates candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewFilter {
    pub show_duplicates: bool,
    pub show_invalid: bool,
}

impl Default for PreviewFilter {
    fn default() -> Self {
        Self {
            show_duplicates: true,
            show_invalid: true,
        }
    }
}

impl PreviewFilter {
    pub fn is_visible(&self, candidate: &ParsedCandidate) -> bool {
        (self.show_duplicates || !candidate.is_duplicate)
            && (self.show_invalid || candidate.is_valid)
    }

    pub fn apply<'a>(&self, candidates: &'a [ParsedCandidate]) -> Vec<&'a ParsedCandidate> {
        candidates.iter().filter(|c| self.is_visible(c)).collect()
    }
}

/// Result of a completed import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl ImportSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successful as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate_of(id: &str) -> DuplicateCheck {
        DuplicateCheck {
            is_duplicate: true,
            existing_id: Some(id.to_string()),
        }
    }

    #[test]
    fn given_duplicate_when_creating_valid_candidate_then_not_selected() {
        let c = ParsedCandidate::valid(
            "https://a.com",
            "https://a.com",
            "a.com".to_string(),
            None,
            duplicate_of("b1"),
        );
        assert!(c.is_duplicate);
        assert_eq!(c.existing_bookmark_id.as_deref(), Some("b1"));
        assert!(!c.selected());
        assert_eq!(c.status, CandidateStatus::Pending);
    }

    #[test]
    fn given_invalid_candidate_when_selecting_then_stays_unselected() {
        let mut c = ParsedCandidate::invalid("notaurl", "notaurl", None);
        assert!(!c.set_selected(true));
        assert!(!c.toggle_selected());
        assert!(!c.is_importable());
        assert_eq!(c.error.as_deref(), Some(INVALID_URL_FORMAT));
        assert_eq!(c.status, CandidateStatus::Failed);
    }

    #[test]
    fn given_partial_metadata_when_applying_then_missing_fields_are_kept() {
        let mut c = ParsedCandidate::valid(
            "[A](https://a.com)",
            "https://a.com",
            "A".to_string(),
            Some("original".to_string()),
            DuplicateCheck::default(),
        );
        c.apply_metadata(UrlMetadata {
            title: None,
            description: Some("fetched".to_string()),
            favicon: Some("https://a.com/favicon.ico".to_string()),
        });
        assert_eq!(c.title.as_deref(), Some("A"));
        assert_eq!(c.description.as_deref(), Some("fetched"));
        assert_eq!(c.favicon.as_deref(), Some("https://a.com/favicon.ico"));
    }

    #[test]
    fn given_defaults_when_building_bulk_data_then_folder_and_tags_are_merged() {
        let c = ParsedCandidate::valid(
            "https://a.com",
            "https://a.com",
            "a.com".to_string(),
            None,
            DuplicateCheck::default(),
        );
        let defaults = ImportDefaults::new(Some("f1".to_string()), vec!["t1".to_string()]);
        let data = c.to_bulk_data(&defaults);
        assert_eq!(data.url, "https://a.com");
        assert_eq!(data.title.as_deref(), Some("a.com"));
        assert_eq!(data.folder_id.as_deref(), Some("f1"));
        assert_eq!(data.tag_ids, vec!["t1".to_string()]);
    }

    #[test]
    fn given_progress_when_computing_percentage_then_clamped() {
        let mut p = ImportProgress::new(4);
        assert_eq!(p.percentage(), 0.0);
        p.processed = 1;
        assert_eq!(p.percentage(), 25.0);
        p.processed = 9;
        assert_eq!(p.percentage(), 100.0);
        assert_eq!(ImportProgress::new(0).percentage(), 0.0);
    }

    #[test]
    fn given_progress_when_serializing_then_percentage_is_included() {
        let mut p = ImportProgress::new(4);
        p.processed = 2;
        p.successful = 2;

        let value = serde_json::to_value(p).unwrap();
        assert_eq!(value["total"], 4);
        assert_eq!(value["processed"], 2);
        assert_eq!(value["failed"], 0);
        assert_eq!(value["percentage"], 50.0);
    }

    #[test]
    fn given_filter_when_hiding_duplicates_and_invalid_then_only_clean_remain() {
        let candidates = vec![
            ParsedCandidate::valid(
                "https://a.com",
                "https://a.com",
                "a.com".to_string(),
                None,
                DuplicateCheck::default(),
            ),
            ParsedCandidate::valid(
                "https://b.com",
                "https://b.com",
                "b.com".to_string(),
                None,
                duplicate_of("b1"),
            ),
            ParsedCandidate::invalid("nope", "nope", None),
        ];
        let filter = PreviewFilter {
            show_duplicates: false,
            show_invalid: false,
        };
        let visible = filter.apply(&candidates);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].url, "https://a.com");
        assert_eq!(PreviewFilter::default().apply(&candidates).len(), 3);

        let stats = ImportStats::from_candidates(&candidates);
        assert_eq!(
            stats,
            ImportStats {
                total: 3,
                valid: 2,
                invalid: 1,
                duplicates: 1,
                selected: 1
            }
        );
    }

    #[test]
    fn given_summary_when_computing_rate_then_percentage_of_total() {
        let summary = ImportSummary {
            total: 4,
            successful: 3,
            failed: 1,
        };
        assert_eq!(summary.success_rate(), 75.0);
        assert_eq!(ImportSummary::default().success_rate(), 0.0);
    }
}
