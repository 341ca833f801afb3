// src/application/services/mod.rs
pub mod enrichment;
pub mod import_session;
pub mod link_validator;
pub mod mass_action;
