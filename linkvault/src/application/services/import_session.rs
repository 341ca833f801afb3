// src/application/services/import_session.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::enrichment::{MetadataEnricher, DEFAULT_ENRICH_BATCH_SIZE};
use crate::domain::bookmark::{ExistingBookmark, ImportDefaults};
use crate::domain::candidate::{
    CandidateStatus, ImportProgress, ImportStats, ImportSummary, ParsedCandidate, PreviewFilter,
};
use crate::domain::error_context::ErrorContext;
use crate::domain::extractor::UrlExtractor;
use crate::domain::repositories::bookmark_gateway::BookmarkGateway;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Stage of an import session.
///
/// `Input -> Preview -> Importing -> Completed`, plus `Preview -> Input` (back).
/// A failed bulk create returns `Importing -> Preview`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStage {
    Input,
    Preview,
    Importing,
    Completed,
}

impl ImportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStage::Input => "input",
            ImportStage::Preview => "preview",
            ImportStage::Importing => "importing",
            ImportStage::Completed => "completed",
        }
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of an import run a progress update belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Enriching,
    Importing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub fetch_metadata: bool,
    pub enrich_batch_size: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            fetch_metadata: true,
            enrich_batch_size: DEFAULT_ENRICH_BATCH_SIZE,
        }
    }
}

/// One paste-to-bookmarks workflow.
///
/// Owns its candidate list exclusively; every mutation goes through `&mut self`.
#[derive(Debug)]
pub struct ImportSession {
    gateway: Arc<dyn BookmarkGateway>,
    enricher: MetadataEnricher,
    options: ImportOptions,
    stage: ImportStage,
    input: String,
    defaults: ImportDefaults,
    candidates: Vec<ParsedCandidate>,
    filter: PreviewFilter,
    progress: ImportProgress,
    summary: Option<ImportSummary>,
    last_error: Option<String>,
}

impl ImportSession {
    pub fn new(
        gateway: Arc<dyn BookmarkGateway>,
        enricher: MetadataEnricher,
        options: ImportOptions,
    ) -> Self {
        Self {
            gateway,
            enricher,
            options,
            stage: ImportStage::Input,
            input: String::new(),
            defaults: ImportDefaults::default(),
            candidates: Vec::new(),
            filter: PreviewFilter::default(),
            progress: ImportProgress::default(),
            summary: None,
            last_error: None,
        }
    }

    /// Session-wide folder and tags, applied before any input is taken
    pub fn with_defaults(mut self, defaults: ImportDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn defaults(&self) -> &ImportDefaults {
        &self.defaults
    }

    pub fn candidates(&self) -> &[ParsedCandidate] {
        &self.candidates
    }

    pub fn progress(&self) -> ImportProgress {
        self.progress
    }

    pub fn summary(&self) -> Option<ImportSummary> {
        self.summary
    }

    /// Message of the last failed bulk create, cleared by the next attempt
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn filter(&self) -> PreviewFilter {
        self.filter
    }

    fn require(&self, expected: ImportStage) -> ApplicationResult<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(ApplicationError::InvalidState {
                expected: expected.as_str(),
                actual: self.stage.as_str(),
            })
        }
    }

    // Input stage

    pub fn set_input<S: Into<String>>(&mut self, text: S) -> ApplicationResult<()> {
        self.require(ImportStage::Input)?;
        self.input = text.into();
        Ok(())
    }

    pub fn set_default_folder(&mut self, folder_id: Option<String>) -> ApplicationResult<()> {
        self.require(ImportStage::Input)?;
        self.defaults.folder_id = folder_id;
        Ok(())
    }

    pub fn set_default_tags(&mut self, tag_ids: Vec<String>) -> ApplicationResult<()> {
        self.require(ImportStage::Input)?;
        self.defaults.tag_ids = tag_ids;
        Ok(())
    }

    /// Extract candidates from the input against a snapshot of existing bookmarks
    /// and move to preview.
    #[instrument(skip_all, level = "debug", fields(existing = existing.len()))]
    pub fn parse(&mut self, existing: &[ExistingBookmark]) -> ApplicationResult<ImportStats> {
        self.require(ImportStage::Input)?;
        if self.input.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "nothing to parse, input is empty".to_string(),
            ));
        }

        self.candidates = UrlExtractor::new(existing).extract(&self.input);
        self.stage = ImportStage::Preview;
        self.progress = ImportProgress::default();
        self.summary = None;
        self.last_error = None;

        let stats = self.stats();
        debug!("Parsed input: {:?}", stats);
        Ok(stats)
    }

    /// Like [`ImportSession::parse`], with the snapshot read from the gateway
    pub async fn parse_with_gateway(&mut self) -> ApplicationResult<ImportStats> {
        self.require(ImportStage::Input)?;
        let existing = self
            .gateway
            .list_bookmarks()
            .await
            .context("failed to list existing bookmarks")?;
        self.parse(&existing)
    }

    // Preview stage

    pub fn back(&mut self) -> ApplicationResult<()> {
        self.require(ImportStage::Preview)?;
        self.candidates.clear();
        self.progress = ImportProgress::default();
        self.stage = ImportStage::Input;
        Ok(())
    }

    fn candidate_mut(&mut self, id: &str) -> ApplicationResult<&mut ParsedCandidate> {
        self.candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApplicationError::Validation(format!("unknown candidate: {}", id)))
    }

    /// Returns the selection after the call; invalid candidates stay unselected
    pub fn set_selected(&mut self, id: &str, selected: bool) -> ApplicationResult<bool> {
        self.require(ImportStage::Preview)?;
        Ok(self.candidate_mut(id)?.set_selected(selected))
    }

    pub fn toggle(&mut self, id: &str) -> ApplicationResult<bool> {
        self.require(ImportStage::Preview)?;
        Ok(self.candidate_mut(id)?.toggle_selected())
    }

    /// Select every valid candidate, duplicates included
    pub fn select_all(&mut self) -> ApplicationResult<()> {
        self.require(ImportStage::Preview)?;
        self.candidates.iter_mut().for_each(|c| {
            c.set_selected(true);
        });
        Ok(())
    }

    pub fn select_none(&mut self) -> ApplicationResult<()> {
        self.require(ImportStage::Preview)?;
        self.candidates.iter_mut().for_each(|c| {
            c.set_selected(false);
        });
        Ok(())
    }

    pub fn set_filter(&mut self, filter: PreviewFilter) {
        self.filter = filter;
    }

    /// Display view under the current filter; candidates are not touched
    pub fn visible_candidates(&self) -> Vec<&ParsedCandidate> {
        self.filter.apply(&self.candidates)
    }

    pub fn stats(&self) -> ImportStats {
        ImportStats::from_candidates(&self.candidates)
    }

    pub fn selected_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_importable()).count()
    }

    // Importing stage

    /// Import every selected, valid candidate with a single bulk-create call.
    ///
    /// Candidates are visited in list order; `on_progress` sees a non-decreasing
    /// `processed` count ending at the selection size. Statuses flip to `success`
    /// as payload entries are queued, before the gateway confirms anything.
    /// On gateway failure the session returns to preview with selections intact.
    #[instrument(skip_all, level = "debug")]
    pub async fn import<F>(&mut self, mut on_progress: F) -> ApplicationResult<ImportSummary>
    where
        F: FnMut(ImportPhase, &ImportProgress),
    {
        self.require(ImportStage::Preview)?;
        let selected: Vec<usize> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_importable())
            .map(|(i, _)| i)
            .collect();
        if selected.is_empty() {
            return Err(ApplicationError::NothingSelected);
        }

        let total = selected.len();
        self.stage = ImportStage::Importing;
        self.last_error = None;
        self.summary = None;
        self.progress = ImportProgress::new(total);

        if self.options.fetch_metadata {
            self.enricher
                .enrich_candidates(
                    &mut self.candidates,
                    self.options.enrich_batch_size,
                    |done, total| {
                        let step = ImportProgress {
                            processed: done,
                            ..ImportProgress::new(total)
                        };
                        on_progress(ImportPhase::Enriching, &step);
                    },
                )
                .await;
        }

        let mut payload = Vec::with_capacity(total);
        for &i in &selected {
            let candidate = &mut self.candidates[i];
            if candidate.status == CandidateStatus::Failed {
                candidate.retry_count += 1;
            }
            candidate.status = CandidateStatus::Processing;
            payload.push(candidate.to_bulk_data(&self.defaults));
            candidate.status = CandidateStatus::Success;

            self.progress.processed += 1;
            self.progress.successful += 1;
            on_progress(ImportPhase::Importing, &self.progress);
            tokio::task::yield_now().await;
        }

        match self.gateway.bulk_create(payload).await {
            Ok(()) => {
                let summary = ImportSummary {
                    total,
                    successful: total,
                    failed: 0,
                };
                self.stage = ImportStage::Completed;
                self.summary = Some(summary);
                info!("Imported {} bookmarks", total);
                Ok(summary)
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Bulk import failed: {}", message);
                for &i in &selected {
                    self.candidates[i].status = CandidateStatus::Failed;
                }
                self.progress.successful = 0;
                self.progress.failed = total;
                self.summary = Some(ImportSummary {
                    total,
                    successful: 0,
                    failed: total,
                });
                self.last_error = Some(message.clone());
                self.stage = ImportStage::Preview;
                Err(ApplicationError::ImportFailed(message))
            }
        }
    }

    /// Start over at input; default folder and tags are kept
    pub fn reset(&mut self) {
        self.stage = ImportStage::Input;
        self.input.clear();
        self.candidates.clear();
        self.filter = PreviewFilter::default();
        self.progress = ImportProgress::default();
        self.summary = None;
        self.last_error = None;
    }
}
