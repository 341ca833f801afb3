// src/application/services/link_validator.rs
use crate::domain::services::link_prober::{LinkProber, ProbeFailure, ProbeMethod, ProbeResponse};
use crate::domain::validation::{ValidationResult, ValidationTarget};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, trace, warn};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    pub batch_size: usize,
    /// Budget of the HEAD attempt; the GET fallback gets half of it
    pub timeout: Duration,
    /// Pause between consecutive batches
    pub batch_delay: Duration,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: DEFAULT_TIMEOUT,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

enum ProbeStep {
    Head,
    GetFallback,
    Finished(Result<ProbeResponse, ProbeFailure>),
}

/// Best-effort reachability checks for bookmark URLs.
///
/// A response of any kind counts as reachable only when its status is 2xx.
/// Redirect chains, bot walls and rate limits make the result approximate.
#[derive(Debug, Clone)]
pub struct LinkValidator {
    prober: Arc<dyn LinkProber>,
}

impl LinkValidator {
    pub fn new(prober: Arc<dyn LinkProber>) -> Self {
        Self { prober }
    }

    pub async fn validate_bookmarks(
        &self,
        items: &[ValidationTarget],
        options: ValidationOptions,
    ) -> Vec<ValidationResult> {
        self.validate_with_progress(items, options, |_, _| {}).await
    }

    /// Probe `items` in sequential batches; items inside a batch run concurrently.
    ///
    /// A probe task that dies is logged and left out of the results, so the
    /// output can be shorter than the input. `on_batch(done, total)` runs
    /// after every batch.
    #[instrument(skip_all, level = "debug", fields(items = items.len()))]
    pub async fn validate_with_progress<F>(
        &self,
        items: &[ValidationTarget],
        options: ValidationOptions,
        mut on_batch: F,
    ) -> Vec<ValidationResult>
    where
        F: FnMut(usize, usize),
    {
        let total = items.len();
        let mut results = Vec::with_capacity(total);
        let mut done = 0;

        for (n, batch) in items.chunks(options.batch_size.max(1)).enumerate() {
            if n > 0 {
                tokio::time::sleep(options.batch_delay).await;
            }
            debug!("Validating batch {} ({} items)", n + 1, batch.len());

            let handles = batch.iter().cloned().map(|target| {
                tokio::spawn(probe_target(self.prober.clone(), target, options.timeout))
            });
            for joined in join_all(handles).await {
                match joined {
                    Ok(result) => results.push(result),
                    Err(e) => warn!("Validation probe aborted: {}", e),
                }
            }

            done += batch.len();
            on_batch(done, total);
        }
        results
    }
}

/// HEAD first; when no response arrives, one GET with half the budget.
async fn probe_target(
    prober: Arc<dyn LinkProber>,
    target: ValidationTarget,
    timeout: Duration,
) -> ValidationResult {
    let mut step = ProbeStep::Head;
    let outcome = loop {
        step = match step {
            ProbeStep::Head => match prober.probe(ProbeMethod::Head, &target.url, timeout).await {
                Ok(response) => ProbeStep::Finished(Ok(response)),
                Err(e) => {
                    trace!("HEAD {} failed ({}), retrying with GET", target.url, e);
                    ProbeStep::GetFallback
                }
            },
            ProbeStep::GetFallback => ProbeStep::Finished(
                prober
                    .probe(ProbeMethod::Get, &target.url, timeout / 2)
                    .await,
            ),
            ProbeStep::Finished(outcome) => break outcome,
        };
    };

    let (is_valid, status_code, error) = match outcome {
        Ok(response) => (response.is_success(), Some(response.status), None),
        Err(failure) => (false, None, Some(failure.to_string())),
    };
    ValidationResult {
        id: target.id,
        url: target.url,
        is_valid,
        status_code,
        error,
        last_checked: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{validation_suggestions, SUGGEST_TIMEOUT};
    use crate::util::testing::ScriptedProber;

    fn targets(n: usize) -> Vec<ValidationTarget> {
        (0..n)
            .map(|i| ValidationTarget::new(i.to_string(), format!("https://site{}.com", i)))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn given_reachable_link_when_validating_then_head_only() {
        let prober = Arc::new(ScriptedProber::new());
        let validator = LinkValidator::new(prober.clone());

        let results = validator
            .validate_bookmarks(&targets(1), ValidationOptions::default())
            .await;

        assert_eq!(results.len(), 1);
        assert!(results[0].is_valid);
        assert_eq!(results[0].status_code, Some(200));
        let calls = prober.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, ProbeMethod::Head);
        assert_eq!(calls[0].timeout, DEFAULT_TIMEOUT);
    }

    #[tokio::test(start_paused = true)]
    async fn given_head_failure_when_validating_then_get_with_half_timeout() {
        let prober = Arc::new(
            ScriptedProber::new()
                .respond(ProbeMethod::Head, "https://site0.com", Err(ProbeFailure::Timeout))
                .respond(ProbeMethod::Get, "https://site0.com", Ok(ProbeResponse { status: 200 })),
        );
        let validator = LinkValidator::new(prober.clone());

        let results = validator
            .validate_bookmarks(&targets(1), ValidationOptions::default())
            .await;

        assert!(results[0].is_valid);
        let calls = prober.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].method, ProbeMethod::Get);
        assert_eq!(calls[1].timeout, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn given_both_attempts_fail_when_validating_then_invalid_with_error() {
        let prober = Arc::new(
            ScriptedProber::new()
                .respond(ProbeMethod::Head, "https://site0.com", Err(ProbeFailure::Timeout))
                .respond(ProbeMethod::Get, "https://site0.com", Err(ProbeFailure::Timeout)),
        );
        let validator = LinkValidator::new(prober);

        let results = validator
            .validate_bookmarks(&targets(1), ValidationOptions::default())
            .await;

        assert!(!results[0].is_valid);
        assert_eq!(results[0].status_code, None);
        assert_eq!(validation_suggestions(&results[0]), vec![SUGGEST_TIMEOUT]);
    }

    #[tokio::test(start_paused = true)]
    async fn given_panicking_probe_when_validating_then_item_excluded_and_batch_continues() {
        let prober = Arc::new(ScriptedProber::new().panic_on("https://site1.com"));
        let validator = LinkValidator::new(prober);

        let results = validator
            .validate_bookmarks(&targets(3), ValidationOptions::default())
            .await;

        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(results.len(), 2);
        assert!(!ids.contains(&"1"));
    }

    #[tokio::test(start_paused = true)]
    async fn given_zero_batch_size_when_validating_then_treated_as_one() {
        let validator = LinkValidator::new(Arc::new(ScriptedProber::new()));
        let mut batches = 0;

        validator
            .validate_with_progress(
                &targets(3),
                ValidationOptions {
                    batch_size: 0,
                    ..ValidationOptions::default()
                },
                |_, _| batches += 1,
            )
            .await;

        assert_eq!(batches, 3);
    }
}
