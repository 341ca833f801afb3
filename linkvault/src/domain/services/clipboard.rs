// src/domain/services/clipboard.rs
use crate::domain::error::DomainResult;
use std::fmt::Debug;

/// Source of pasted import text
pub trait ClipboardService: Send + Sync + Debug {
    fn read_text(&self) -> DomainResult<String>;
}
