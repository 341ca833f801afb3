// src/infrastructure/http/mod.rs
pub mod api_client;
pub mod prober;

pub use api_client::HttpBookmarkGateway;
pub use prober::HttpLinkProber;
