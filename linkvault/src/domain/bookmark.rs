// src/domain/bookmark.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything that carries an opaque bookmark identifier.
///
/// Lets selection and filtering work over any collection keyed by id
/// without holding the records themselves.
pub trait Identified {
    fn id(&self) -> &str;
}

/// A bookmark already stored by the backend, as returned by `GET /bookmarks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingBookmark {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_validated: Option<DateTime<Utc>>,
}

impl ExistingBookmark {
    pub fn new<S: Into<String>>(id: S, url: S, title: S) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
            last_validated: None,
        }
    }

    pub fn with_last_validated(mut self, last_validated: Option<DateTime<Utc>>) -> Self {
        self.last_validated = last_validated;
        self
    }
}

impl Identified for ExistingBookmark {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One entry of the payload handed to the bulk-create collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkBookmarkData {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// Partial field update sent with `bulk_update`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

impl BookmarkPatch {
    pub fn favorite(value: bool) -> Self {
        Self {
            is_favorite: Some(value),
            ..Default::default()
        }
    }

    pub fn archived(value: bool) -> Self {
        Self {
            is_archived: Some(value),
            ..Default::default()
        }
    }

    pub fn folder<S: Into<String>>(folder_id: S) -> Self {
        Self {
            folder_id: Some(folder_id.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_favorite.is_none() && self.is_archived.is_none() && self.folder_id.is_none()
    }
}

/// Folder and tags applied to every bookmark created by one import session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportDefaults {
    pub folder_id: Option<String>,
    pub tag_ids: Vec<String>,
}

impl ImportDefaults {
    pub fn new(folder_id: Option<String>, tag_ids: Vec<String>) -> Self {
        Self { folder_id, tag_ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_backend_json_when_deserializing_existing_bookmark_then_reads_camel_case() {
        let json = r#"{"id":"b1","url":"https://a.com","title":"A","lastValidated":"2024-01-02T03:04:05Z","isFavorite":true}"#;
        let bookmark: ExistingBookmark = serde_json::from_str(json).unwrap();
        assert_eq!(bookmark.id, "b1");
        assert_eq!(bookmark.title, "A");
        assert!(bookmark.last_validated.is_some());
    }

    #[test]
    fn given_bookmark_without_title_when_deserializing_then_title_is_empty() {
        let bookmark: ExistingBookmark =
            serde_json::from_str(r#"{"id":"b2","url":"https://b.com"}"#).unwrap();
        assert_eq!(bookmark.title, "");
        assert_eq!(bookmark.last_validated, None);
    }

    #[test]
    fn given_sparse_bulk_entry_when_serializing_then_omits_unset_fields() {
        let entry = BulkBookmarkData {
            url: "https://a.com".to_string(),
            title: Some("A".to_string()),
            tag_ids: vec!["t1".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"url":"https://a.com","title":"A","tagIds":["t1"]}"#);
    }

    #[test]
    fn given_favorite_patch_when_serializing_then_only_flag_is_sent() {
        let json = serde_json::to_string(&BookmarkPatch::favorite(true)).unwrap();
        assert_eq!(json, r#"{"isFavorite":true}"#);
        assert!(!BookmarkPatch::favorite(false).is_empty());
        assert!(BookmarkPatch::default().is_empty());
    }
}
