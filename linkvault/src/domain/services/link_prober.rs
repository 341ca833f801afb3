// src/domain/services/link_prober.rs
use async_trait::async_trait;
use std::fmt::{self, Debug};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeMethod {
    Head,
    Get,
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeMethod::Head => write!(f, "HEAD"),
            ProbeMethod::Get => write!(f, "GET"),
        }
    }
}

/// A response arrived; the status is whatever the remote host answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
}

impl ProbeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No response arrived
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),
}

/// Issues a single request against an arbitrary third-party URL.
#[async_trait]
pub trait LinkProber: Send + Sync + Debug {
    async fn probe(
        &self,
        method: ProbeMethod,
        url: &str,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeFailure>;
}
