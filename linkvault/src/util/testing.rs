// src/util/testing.rs
//! Test support: one-time logging setup, environment guard and in-memory
//! collaborators that record every call.

use crate::config::{ENV_API_TOKEN, ENV_API_URL, ENV_DEFAULT_FOLDER, ENV_DEFAULT_TAGS};
use crate::domain::bookmark::{BookmarkPatch, BulkBookmarkData, ExistingBookmark};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::bookmark_gateway::BookmarkGateway;
use crate::domain::services::link_prober::{LinkProber, ProbeFailure, ProbeMethod, ProbeResponse};
use crate::domain::services::metadata::{MetadataProvider, UrlMetadata};
use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

/// Global test configuration, initialized exactly once.
#[derive(Debug)]
pub struct TestEnv {
    pub api_url: String,
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Sets up logging once and returns the shared test configuration.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
        TestEnv {
            api_url: "http://127.0.0.1:9/api".to_string(),
        }
    })
}

fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["reqwest", "hyper_util", "mio", "want", "rustls"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

const GUARDED_VARS: [&str; 4] = [ENV_API_URL, ENV_API_TOKEN, ENV_DEFAULT_FOLDER, ENV_DEFAULT_TAGS];

/// Restores the `LINKVAULT_*` variables on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            saved: GUARDED_VARS
                .iter()
                .map(|&name| (name, env::var(name).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct GatewayState {
    bookmarks: Vec<ExistingBookmark>,
    created: Vec<Vec<BulkBookmarkData>>,
    updates: Vec<(Vec<String>, BookmarkPatch)>,
    deletes: Vec<Vec<String>>,
    tag_calls: Vec<(String, String)>,
    failure: Option<String>,
}

/// Bookmark backend double. Mutating calls are recorded, and every call
/// fails with a collaborator error while a failure is set.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: Mutex<GatewayState>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookmarks(bookmarks: Vec<ExistingBookmark>) -> Self {
        let gateway = Self::new();
        lock(&gateway.state).bookmarks = bookmarks;
        gateway
    }

    pub fn fail_with(&self, message: &str) {
        lock(&self.state).failure = Some(message.to_string());
    }

    pub fn recover(&self) {
        lock(&self.state).failure = None;
    }

    pub fn created(&self) -> Vec<Vec<BulkBookmarkData>> {
        lock(&self.state).created.clone()
    }

    pub fn updates(&self) -> Vec<(Vec<String>, BookmarkPatch)> {
        lock(&self.state).updates.clone()
    }

    pub fn deletes(&self) -> Vec<Vec<String>> {
        lock(&self.state).deletes.clone()
    }

    pub fn tag_calls(&self) -> Vec<(String, String)> {
        lock(&self.state).tag_calls.clone()
    }

    fn check(state: &GatewayState) -> DomainResult<()> {
        match &state.failure {
            Some(message) => Err(DomainError::Collaborator(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookmarkGateway for InMemoryGateway {
    async fn list_bookmarks(&self) -> DomainResult<Vec<ExistingBookmark>> {
        let state = lock(&self.state);
        Self::check(&state)?;
        Ok(state.bookmarks.clone())
    }

    async fn bulk_create(&self, items: Vec<BulkBookmarkData>) -> DomainResult<()> {
        let mut state = lock(&self.state);
        Self::check(&state)?;
        state.created.push(items);
        Ok(())
    }

    async fn bulk_update(&self, ids: &[String], patch: &BookmarkPatch) -> DomainResult<()> {
        let mut state = lock(&self.state);
        Self::check(&state)?;
        state.updates.push((ids.to_vec(), patch.clone()));
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[String]) -> DomainResult<()> {
        let mut state = lock(&self.state);
        Self::check(&state)?;
        state.deletes.push(ids.to_vec());
        state.bookmarks.retain(|b| !ids.contains(&b.id));
        Ok(())
    }

    async fn add_tag(&self, bookmark_id: &str, tag_id: &str) -> DomainResult<()> {
        let mut state = lock(&self.state);
        Self::check(&state)?;
        state
            .tag_calls
            .push((bookmark_id.to_string(), tag_id.to_string()));
        Ok(())
    }
}

/// Metadata lookup double: known URLs answer, everything else fails.
/// Tracks how many lookups overlap.
#[derive(Debug, Default)]
pub struct StaticMetadataProvider {
    responses: HashMap<String, UrlMetadata>,
    latency: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StaticMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, metadata: UrlMetadata) -> Self {
        self.responses.insert(url.to_string(), metadata);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for StaticMetadataProvider {
    async fn fetch_metadata(&self, url: &str) -> DomainResult<UrlMetadata> {
        lock(&self.calls).push(url.to_string());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::CannotFetchMetadata(format!("no metadata for {}", url)))
    }
}

/// One request seen by [`ScriptedProber`]
#[derive(Debug, Clone)]
pub struct ProbeCall {
    pub method: ProbeMethod,
    pub url: String,
    pub timeout: Duration,
    pub at: tokio::time::Instant,
}

/// Link prober double with per-(method, url) scripted outcomes.
/// Unscripted requests answer 200.
#[derive(Debug, Default)]
pub struct ScriptedProber {
    responses: HashMap<(ProbeMethod, String), Result<ProbeResponse, ProbeFailure>>,
    latency: Duration,
    panic_on: Option<String>,
    calls: Mutex<Vec<ProbeCall>>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        mut self,
        method: ProbeMethod,
        url: &str,
        outcome: Result<ProbeResponse, ProbeFailure>,
    ) -> Self {
        self.responses.insert((method, url.to_string()), outcome);
        self
    }

    /// Answer `status` to both HEAD and GET for `url`
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.respond(ProbeMethod::Head, url, Ok(ProbeResponse { status }))
            .respond(ProbeMethod::Get, url, Ok(ProbeResponse { status }))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Panic inside the probe for `url`, as a crashed request task would
    pub fn panic_on(mut self, url: &str) -> Self {
        self.panic_on = Some(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ProbeCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl LinkProber for ScriptedProber {
    async fn probe(
        &self,
        method: ProbeMethod,
        url: &str,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeFailure> {
        lock(&self.calls).push(ProbeCall {
            method,
            url: url.to_string(),
            timeout,
            at: tokio::time::Instant::now(),
        });
        if self.panic_on.as_deref() == Some(url) {
            panic!("scripted probe crash for {}", url);
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.responses
            .get(&(method, url.to_string()))
            .cloned()
            .unwrap_or(Ok(ProbeResponse { status: 200 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn given_modified_env_when_guard_dropped_then_values_restored() {
        let _ = init_test_env();
        env::set_var(ENV_API_URL, "http://before");
        env::remove_var(ENV_API_TOKEN);
        {
            let _guard = EnvGuard::new();
            env::set_var(ENV_API_URL, "http://during");
            env::set_var(ENV_API_TOKEN, "secret");
        }
        assert_eq!(env::var(ENV_API_URL).unwrap(), "http://before");
        assert!(env::var(ENV_API_TOKEN).is_err());
        env::remove_var(ENV_API_URL);
    }

    #[tokio::test]
    async fn given_failing_gateway_when_called_then_collaborator_error_until_recovered() {
        let gateway = InMemoryGateway::with_bookmarks(vec![ExistingBookmark::new(
            "1",
            "https://a.com",
            "A",
        )]);
        gateway.fail_with("offline");

        assert!(matches!(
            gateway.list_bookmarks().await,
            Err(DomainError::Collaborator(_))
        ));
        gateway.recover();
        assert_eq!(gateway.list_bookmarks().await.unwrap().len(), 1);
    }
}
