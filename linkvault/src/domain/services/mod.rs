// src/domain/services/mod.rs
pub mod clipboard;
pub mod link_prober;
pub mod metadata;
