// src/domain/services/metadata.rs
use crate::domain::error::DomainResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Supplementary page metadata. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
}

impl UrlMetadata {
    /// Blank strings count as missing
    pub fn without_blanks(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Self {
            title: keep(self.title),
            description: keep(self.description),
            favicon: keep(self.favicon),
        }
    }
}

/// Metadata lookup collaborator (`POST /bookmarks/metadata`)
#[async_trait]
pub trait MetadataProvider: Send + Sync + Debug {
    async fn fetch_metadata(&self, url: &str) -> DomainResult<UrlMetadata>;
}
