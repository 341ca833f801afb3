// src/application/services/mass_action.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::bookmark::BookmarkPatch;
use crate::domain::error_context::ErrorContext;
use crate::domain::repositories::bookmark_gateway::BookmarkGateway;
use crate::domain::selection::SelectionState;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A change applied to every selected bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    Favorite(bool),
    Archive(bool),
    Delete,
    Move(String),
    Tag(String),
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkAction::Favorite(true) => write!(f, "favorite"),
            BulkAction::Favorite(false) => write!(f, "unfavorite"),
            BulkAction::Archive(true) => write!(f, "archive"),
            BulkAction::Archive(false) => write!(f, "unarchive"),
            BulkAction::Delete => write!(f, "delete"),
            BulkAction::Move(folder) => write!(f, "move to {}", folder),
            BulkAction::Tag(tag) => write!(f, "tag with {}", tag),
        }
    }
}

/// Owns the multi-select state and turns it into gateway calls.
#[derive(Debug)]
pub struct MassActionCoordinator {
    gateway: Arc<dyn BookmarkGateway>,
    selection: SelectionState,
}

impl MassActionCoordinator {
    pub fn new(gateway: Arc<dyn BookmarkGateway>) -> Self {
        Self {
            gateway,
            selection: SelectionState::new(),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// Run `action` against the current selection and clear it on success.
    ///
    /// Favorite, archive and move are one bulk update; delete is one bulk
    /// delete; tagging is one add-tag call per bookmark, in id order. On error
    /// the selection is kept.
    #[instrument(skip(self), level = "debug")]
    pub async fn apply(&mut self, action: BulkAction) -> ApplicationResult<usize> {
        if self.selection.is_empty() {
            return Err(ApplicationError::NothingSelected);
        }
        let ids = self.selection.selected_ids();

        match &action {
            BulkAction::Favorite(value) => {
                self.update(&ids, BookmarkPatch::favorite(*value)).await?
            }
            BulkAction::Archive(value) => {
                self.update(&ids, BookmarkPatch::archived(*value)).await?
            }
            BulkAction::Move(folder_id) => {
                self.update(&ids, BookmarkPatch::folder(folder_id.as_str()))
                    .await?
            }
            BulkAction::Delete => self
                .gateway
                .bulk_delete(&ids)
                .await
                .context("bulk delete failed")?,
            BulkAction::Tag(tag_id) => {
                for id in &ids {
                    debug!("Tagging {} with {}", id, tag_id);
                    self.gateway
                        .add_tag(id, tag_id)
                        .await
                        .with_context(|| format!("tagging bookmark {} failed", id))?;
                }
            }
        }

        info!("Applied '{}' to {} bookmarks", action, ids.len());
        self.selection.deselect_all();
        Ok(ids.len())
    }

    async fn update(&self, ids: &[String], patch: BookmarkPatch) -> ApplicationResult<()> {
        self.gateway
            .bulk_update(ids, &patch)
            .await
            .context("bulk update failed")
            .map_err(ApplicationError::from)
    }
}
