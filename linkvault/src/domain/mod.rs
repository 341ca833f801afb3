// src/domain/mod.rs
pub mod bookmark;
pub mod candidate;
pub mod duplicate;
pub mod error;
pub mod error_context;
pub mod extractor;
pub mod repositories;
pub mod selection;
pub mod services;
pub mod url;
pub mod validation;
