// src/infrastructure/http/prober.rs
use crate::domain::services::link_prober::{LinkProber, ProbeFailure, ProbeMethod, ProbeResponse};
use async_trait::async_trait;
use reqwest::{redirect, Client, Method};
use std::time::Duration;
use tracing::{instrument, trace};

const MAX_REDIRECTS: usize = 10;

/// Requests arbitrary third-party URLs for link validation.
#[derive(Debug, Clone)]
pub struct HttpLinkProber {
    client: Client,
}

impl Default for HttpLinkProber {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpLinkProber {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("linkvault/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .unwrap_or_else(|_| Client::new()); // Fallback to default client in case of builder failure
        Self { client }
    }
}

#[async_trait]
impl LinkProber for HttpLinkProber {
    #[instrument(skip(self), level = "trace")]
    async fn probe(
        &self,
        method: ProbeMethod,
        url: &str,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeFailure> {
        let method = match method {
            ProbeMethod::Head => Method::HEAD,
            ProbeMethod::Get => Method::GET,
        };
        match self.client.request(method, url).timeout(timeout).send().await {
            Ok(response) => {
                trace!("{} answered {}", url, response.status());
                Ok(ProbeResponse {
                    status: response.status().as_u16(),
                })
            }
            Err(e) if e.is_timeout() => Err(ProbeFailure::Timeout),
            Err(e) => Err(ProbeFailure::Network(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::stub::{serve, StubResponse};

    #[tokio::test]
    async fn given_missing_page_when_probing_then_status_is_reported() {
        let (base, _) = serve(StubResponse::new(404, "")).await;

        let response = HttpLinkProber::new()
            .probe(ProbeMethod::Head, &format!("{}/gone", base), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn given_slow_host_when_probing_then_timeout() {
        let (base, _) =
            serve(StubResponse::new(200, "").delayed(Duration::from_secs(5))).await;

        let result = HttpLinkProber::new()
            .probe(ProbeMethod::Get, &base, Duration::from_millis(100))
            .await;

        assert_eq!(result, Err(ProbeFailure::Timeout));
    }

    #[tokio::test]
    async fn given_unresolvable_url_when_probing_then_network_failure() {
        let result = HttpLinkProber::new()
            .probe(ProbeMethod::Head, "not a url", Duration::from_secs(1))
            .await;

        assert!(matches!(result, Err(ProbeFailure::Network(_))));
    }
}
