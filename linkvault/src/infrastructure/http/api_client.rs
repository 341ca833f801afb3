// src/infrastructure/http/api_client.rs
use crate::domain::bookmark::{BookmarkPatch, BulkBookmarkData, ExistingBookmark};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::bookmark_gateway::BookmarkGateway;
use crate::domain::services::metadata::{MetadataProvider, UrlMetadata};
use crate::infrastructure::error::InfrastructureError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Client for the bookmark backend REST API.
///
/// Serves both the bookmark data-access calls and the metadata lookup.
#[derive(Debug, Clone)]
pub struct HttpBookmarkGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BookmarkListing {
    Plain(Vec<ExistingBookmark>),
    Wrapped { bookmarks: Vec<ExistingBookmark> },
}

#[derive(Serialize)]
struct MetadataRequest<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct BulkCreateRequest {
    bookmarks: Vec<BulkBookmarkData>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkUpdateRequest<'a> {
    ids: &'a [String],
    data: &'a BookmarkPatch,
}

#[derive(Serialize)]
struct BulkDeleteRequest<'a> {
    ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddTagRequest<'a> {
    tag_id: &'a str,
}

impl HttpBookmarkGateway {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("linkvault/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, InfrastructureError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(InfrastructureError::HttpStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl BookmarkGateway for HttpBookmarkGateway {
    #[instrument(skip(self), level = "debug")]
    async fn list_bookmarks(&self) -> DomainResult<Vec<ExistingBookmark>> {
        let response = Self::send(self.request(Method::GET, "/bookmarks")).await?;
        let listing: BookmarkListing = response
            .json()
            .await
            .map_err(InfrastructureError::from)?;
        let bookmarks = match listing {
            BookmarkListing::Plain(bookmarks) | BookmarkListing::Wrapped { bookmarks } => bookmarks,
        };
        debug!("Fetched {} existing bookmarks", bookmarks.len());
        Ok(bookmarks)
    }

    #[instrument(skip_all, level = "debug", fields(count = items.len()))]
    async fn bulk_create(&self, items: Vec<BulkBookmarkData>) -> DomainResult<()> {
        let body = BulkCreateRequest { bookmarks: items };
        Self::send(self.request(Method::POST, "/bookmarks/bulk").json(&body)).await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn bulk_update(&self, ids: &[String], patch: &BookmarkPatch) -> DomainResult<()> {
        if patch.is_empty() {
            return Err(DomainError::InvalidInput("empty bookmark patch".to_string()));
        }
        let body = BulkUpdateRequest { ids, data: patch };
        Self::send(self.request(Method::PATCH, "/bookmarks/bulk").json(&body)).await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn bulk_delete(&self, ids: &[String]) -> DomainResult<()> {
        let body = BulkDeleteRequest { ids };
        Self::send(self.request(Method::DELETE, "/bookmarks/bulk").json(&body)).await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn add_tag(&self, bookmark_id: &str, tag_id: &str) -> DomainResult<()> {
        let path = format!("/bookmarks/{}/tags", bookmark_id);
        let body = AddTagRequest { tag_id };
        Self::send(self.request(Method::POST, &path).json(&body)).await?;
        Ok(())
    }
}

#[async_trait]
impl MetadataProvider for HttpBookmarkGateway {
    #[instrument(skip(self), level = "trace")]
    async fn fetch_metadata(&self, url: &str) -> DomainResult<UrlMetadata> {
        let request = self
            .request(Method::POST, "/bookmarks/metadata")
            .json(&MetadataRequest { url });
        let response = Self::send(request)
            .await
            .map_err(|e| DomainError::CannotFetchMetadata(e.to_string()))?;
        response
            .json::<UrlMetadata>()
            .await
            .map_err(|e| DomainError::CannotFetchMetadata(e.to_string()))
    }
}
