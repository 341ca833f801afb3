// src/application/mod.rs
pub mod error;
pub mod services;

// Re-export key services for easier imports
pub use services::enrichment::MetadataEnricher;
pub use services::import_session::{ImportOptions, ImportPhase, ImportSession, ImportStage};
pub use services::link_validator::{LinkValidator, ValidationOptions};
pub use services::mass_action::{BulkAction, MassActionCoordinator};
