// src/domain/repositories/bookmark_gateway.rs
use crate::domain::bookmark::{BookmarkPatch, BulkBookmarkData, ExistingBookmark};
use crate::domain::error::DomainResult;
use async_trait::async_trait;
use std::fmt::Debug;

/*
   Gateway to the bookmark backend.
   The store itself is out of reach: everything goes through its CRUD endpoints.
   Each call is one operation-level request; failures propagate to the caller.
*/
#[async_trait]
pub trait BookmarkGateway: Send + Sync + Debug {
    /// Snapshot of the user's bookmarks
    async fn list_bookmarks(&self) -> DomainResult<Vec<ExistingBookmark>>;

    /// Create all items in one call. All-or-nothing from the caller's view.
    async fn bulk_create(&self, items: Vec<BulkBookmarkData>) -> DomainResult<()>;

    async fn bulk_update(&self, ids: &[String], patch: &BookmarkPatch) -> DomainResult<()>;

    async fn bulk_delete(&self, ids: &[String]) -> DomainResult<()>;

    /// Attach one tag to one bookmark; the tag join API is single-bookmark scoped
    async fn add_tag(&self, bookmark_id: &str, tag_id: &str) -> DomainResult<()>;
}
