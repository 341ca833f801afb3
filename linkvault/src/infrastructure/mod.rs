pub mod clipboard;
pub mod di;
pub mod error;
pub mod http;
pub(crate) mod json;
