// src/application/services/enrichment.rs
use crate::domain::candidate::ParsedCandidate;
use crate::domain::services::metadata::{MetadataProvider, UrlMetadata};
use crate::domain::url::{capitalize, domain_of};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const DEFAULT_ENRICH_BATCH_SIZE: usize = 5;
pub const DEFAULT_FAVICON_SERVICE: &str =
    "https://www.google.com/s2/favicons?domain={domain}&sz=32";

/// Best-effort title/description/favicon lookup for import candidates.
///
/// Never fails: any lookup error degrades to a patch synthesized from the
/// URL's domain.
#[derive(Debug, Clone)]
pub struct MetadataEnricher {
    provider: Arc<dyn MetadataProvider>,
    favicon_service: String,
}

impl MetadataEnricher {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self::with_favicon_service(provider, DEFAULT_FAVICON_SERVICE)
    }

    /// `favicon_service` is a URL template; `{domain}` is replaced by the bare domain.
    pub fn with_favicon_service<S: Into<String>>(
        provider: Arc<dyn MetadataProvider>,
        favicon_service: S,
    ) -> Self {
        Self {
            provider,
            favicon_service: favicon_service.into(),
        }
    }

    #[instrument(skip(self, candidate), level = "debug", fields(url = %candidate.url))]
    pub async fn enrich(&self, candidate: &ParsedCandidate) -> UrlMetadata {
        match self.provider.fetch_metadata(&candidate.url).await {
            Ok(metadata) => {
                let metadata = metadata.without_blanks();
                UrlMetadata {
                    title: metadata
                        .title
                        .or_else(|| candidate.title.clone())
                        .or_else(|| self.fallback(&candidate.url).title),
                    description: metadata.description.or_else(|| candidate.description.clone()),
                    favicon: metadata.favicon,
                }
            }
            // A failed lookup yields the domain patch even over a title parsed from the line.
            Err(e) => {
                debug!("Metadata lookup failed, using fallback: {}", e);
                self.fallback(&candidate.url)
            }
        }
    }

    /// Deterministic patch derived from the URL alone
    pub fn fallback(&self, url: &str) -> UrlMetadata {
        let domain = domain_of(url).unwrap_or_else(|| url.trim().to_string());
        UrlMetadata {
            title: Some(capitalize(&domain)),
            description: Some(format!("Content from {}", domain)),
            favicon: Some(self.favicon_service.replace("{domain}", &domain)),
        }
    }

    /// Enrich every importable candidate in groups of `batch_size`, each group
    /// fanned out concurrently. `on_batch(done, total)` runs after each group.
    /// Returns the number of enriched candidates.
    #[instrument(skip_all, level = "debug")]
    pub async fn enrich_candidates<F>(
        &self,
        candidates: &mut [ParsedCandidate],
        batch_size: usize,
        mut on_batch: F,
    ) -> usize
    where
        F: FnMut(usize, usize),
    {
        let targets: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_importable())
            .map(|(i, _)| i)
            .collect();
        let total = targets.len();
        let mut done = 0;

        for batch in targets.chunks(batch_size.max(1)) {
            let patches = {
                let shared: &[ParsedCandidate] = candidates;
                join_all(batch.iter().map(|&i| self.enrich(&shared[i]))).await
            };
            for (&i, patch) in batch.iter().zip(patches) {
                candidates[i].apply_metadata(patch);
            }
            done += batch.len();
            debug!("Enriched {}/{} candidates", done, total);
            on_batch(done, total);
        }
        total
    }
}
