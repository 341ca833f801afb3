// src/domain/repositories/mod.rs
pub mod bookmark_gateway;
