// src/infrastructure/di/service_container.rs
use crate::application::services::enrichment::MetadataEnricher;
use crate::application::services::import_session::{ImportOptions, ImportSession};
use crate::application::services::link_validator::{LinkValidator, ValidationOptions};
use crate::application::services::mass_action::MassActionCoordinator;
use crate::config::{ImportSettings, Settings, ValidationSettings};
use crate::domain::bookmark::ImportDefaults;
use crate::domain::repositories::bookmark_gateway::BookmarkGateway;
use crate::domain::services::clipboard::ClipboardService;
use crate::domain::services::link_prober::LinkProber;
use crate::domain::services::metadata::MetadataProvider;
use crate::infrastructure::clipboard::ClipboardServiceImpl;
use crate::infrastructure::http::{HttpBookmarkGateway, HttpLinkProber};
use std::sync::Arc;
use tracing::debug;

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub gateway: Arc<dyn BookmarkGateway>,
    pub metadata_provider: Arc<dyn MetadataProvider>,
    pub link_prober: Arc<dyn LinkProber>,
    pub clipboard_service: Arc<dyn ClipboardService>,
}

impl ServiceContainer {
    /// Wire the HTTP collaborators for the configured backend
    pub fn new(settings: &Settings) -> Self {
        debug!("Creating services for {}", settings.api_url);
        let api = Arc::new(HttpBookmarkGateway::new(
            &settings.api_url,
            settings.api_token.clone(),
        ));
        Self {
            gateway: api.clone(),
            metadata_provider: api,
            link_prober: Arc::new(HttpLinkProber::new()),
            clipboard_service: Arc::new(ClipboardServiceImpl::new()),
        }
    }

    /// Explicit wiring, used by tests and embedders
    pub fn with_collaborators(
        gateway: Arc<dyn BookmarkGateway>,
        metadata_provider: Arc<dyn MetadataProvider>,
        link_prober: Arc<dyn LinkProber>,
        clipboard_service: Arc<dyn ClipboardService>,
    ) -> Self {
        Self {
            gateway,
            metadata_provider,
            link_prober,
            clipboard_service,
        }
    }

    pub fn import_session(&self, settings: &ImportSettings) -> ImportSession {
        let enricher = MetadataEnricher::with_favicon_service(
            self.metadata_provider.clone(),
            settings.favicon_service.as_str(),
        );
        let options = ImportOptions {
            fetch_metadata: settings.fetch_metadata,
            enrich_batch_size: settings.enrich_batch_size,
        };
        ImportSession::new(self.gateway.clone(), enricher, options).with_defaults(
            ImportDefaults::new(
                settings.default_folder.clone(),
                settings.default_tags.clone(),
            ),
        )
    }

    pub fn link_validator(&self) -> LinkValidator {
        LinkValidator::new(self.link_prober.clone())
    }

    pub fn mass_actions(&self) -> MassActionCoordinator {
        MassActionCoordinator::new(self.gateway.clone())
    }
}

impl From<&ValidationSettings> for ValidationOptions {
    fn from(settings: &ValidationSettings) -> Self {
        Self {
            batch_size: settings.batch_size,
            timeout: settings.timeout(),
            batch_delay: settings.batch_delay(),
        }
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("gateway", &"Arc<dyn BookmarkGateway>")
            .field("metadata_provider", &"Arc<dyn MetadataProvider>")
            .field("link_prober", &"Arc<dyn LinkProber>")
            .field("clipboard_service", &"Arc<dyn ClipboardService>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ImportStage;
    use crate::infrastructure::clipboard::StaticClipboardService;
    use crate::util::testing::{InMemoryGateway, ScriptedProber, StaticMetadataProvider};

    fn container() -> ServiceContainer {
        ServiceContainer::with_collaborators(
            Arc::new(InMemoryGateway::new()),
            Arc::new(StaticMetadataProvider::new()),
            Arc::new(ScriptedProber::new()),
            Arc::new(StaticClipboardService::new("")),
        )
    }

    #[test]
    fn given_import_settings_when_creating_session_then_defaults_applied() {
        let settings = ImportSettings {
            default_folder: Some("inbox".to_string()),
            default_tags: vec!["new".to_string()],
            ..ImportSettings::default()
        };

        let session = container().import_session(&settings);

        assert_eq!(session.stage(), ImportStage::Input);
        assert_eq!(session.defaults().folder_id.as_deref(), Some("inbox"));
        assert_eq!(session.defaults().tag_ids, vec!["new"]);
    }

    #[test]
    fn given_validation_settings_when_converted_then_durations_match() {
        let options = ValidationOptions::from(&ValidationSettings {
            batch_size: 4,
            timeout_secs: 3,
            batch_delay_ms: 250,
            interval_days: 7,
        });

        assert_eq!(options.batch_size, 4);
        assert_eq!(options.timeout.as_secs(), 3);
        assert_eq!(options.batch_delay.as_millis(), 250);
    }

    #[test]
    fn given_settings_when_building_production_container_then_debug_lists_services() {
        let container = ServiceContainer::new(&Settings::default());
        assert!(format!("{:?}", container).contains("link_prober"));
    }
}
