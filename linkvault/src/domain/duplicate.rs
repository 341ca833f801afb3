// src/domain/duplicate.rs
use crate::domain::bookmark::ExistingBookmark;
use crate::domain::url::normalize;
use std::collections::HashMap;
use tracing::trace;

/// Outcome of comparing one URL against the existing collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    pub existing_id: Option<String>,
}

impl DuplicateCheck {
    fn found(id: &str) -> Self {
        Self {
            is_duplicate: true,
            existing_id: Some(id.to_string()),
        }
    }
}

/// Compare `url` against `existing` by normalized form; first match wins.
pub fn check_duplicate(url: &str, existing: &[ExistingBookmark]) -> DuplicateCheck {
    let needle = normalize(url);
    existing
        .iter()
        .find(|bookmark| normalize(&bookmark.url) == needle)
        .map(|bookmark| DuplicateCheck::found(&bookmark.id))
        .unwrap_or_default()
}

/// Normalized-URL -> id map built once from a snapshot of existing bookmarks.
///
/// Answers exactly like [`check_duplicate`]: when two existing bookmarks
/// normalize to the same URL, the earlier one wins.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    by_url: HashMap<String, String>,
}

impl DuplicateIndex {
    pub fn build(existing: &[ExistingBookmark]) -> Self {
        let mut by_url = HashMap::with_capacity(existing.len());
        for bookmark in existing {
            by_url
                .entry(normalize(&bookmark.url))
                .or_insert_with(|| bookmark.id.clone());
        }
        trace!("Built duplicate index over {} bookmarks", by_url.len());
        Self { by_url }
    }

    pub fn check(&self, url: &str) -> DuplicateCheck {
        self.by_url
            .get(&normalize(url))
            .map(|id| DuplicateCheck::found(id))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}
