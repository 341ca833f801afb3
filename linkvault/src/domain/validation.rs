// src/domain/validation.rs
use crate::domain::bookmark::{ExistingBookmark, Identified};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Bookmark handed to the link validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationTarget {
    pub id: String,
    pub url: String,
}

impl ValidationTarget {
    pub fn new<S: Into<String>>(id: S, url: S) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

impl From<&ExistingBookmark> for ValidationTarget {
    fn from(bookmark: &ExistingBookmark) -> Self {
        Self::new(bookmark.id.as_str(), bookmark.url.as_str())
    }
}

/// Outcome of probing one bookmark URL.
///
/// `is_valid` is best-effort reachability: redirects, bot walls and rate
/// limits can make a live page look dead and the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub id: String,
    pub url: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub last_checked: DateTime<Utc>,
}

impl Identified for ValidationResult {
    fn id(&self) -> &str {
        &self.id
    }
}

pub const SUGGEST_NOT_FOUND: &str =
    "The page may have been moved or deleted. Search the site or the Wayback Machine for a new location.";
pub const SUGGEST_FORBIDDEN: &str =
    "Access is forbidden. The page probably requires authentication.";
pub const SUGGEST_SERVER_ERROR: &str =
    "The server reported an internal issue. Try again later.";
pub const SUGGEST_TIMEOUT: &str =
    "The site is slow or temporarily unavailable. Try again later.";
pub const SUGGEST_NETWORK: &str =
    "A network error occurred. Check your connection and whether the domain still exists.";
pub const SUGGEST_GENERIC: &str = "The link is inaccessible. Open it manually to check.";

/// Human readable remediation hints for a failed check. Empty for valid results.
pub fn validation_suggestions(result: &ValidationResult) -> Vec<&'static str> {
    if result.is_valid {
        return Vec::new();
    }

    let suggestion = match result.status_code {
        Some(404) => SUGGEST_NOT_FOUND,
        Some(403) => SUGGEST_FORBIDDEN,
        Some(500..=599) => SUGGEST_SERVER_ERROR,
        _ => {
            let error = result.error.as_deref().unwrap_or_default().to_lowercase();
            if error.contains("timeout") || error.contains("timed out") {
                SUGGEST_TIMEOUT
            } else if error.contains("network") {
                SUGGEST_NETWORK
            } else {
                SUGGEST_GENERIC
            }
        }
    };
    vec![suggestion]
}

/// Whether a bookmark is due for another reachability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledCheck {
    pub id: String,
    pub needs_validation: bool,
}

pub const DEFAULT_INTERVAL_DAYS: i64 = 7;

/// Flag bookmarks whose last validation (epoch when never validated) is at
/// least `interval_days` old. Pure; performs no I/O.
pub fn schedule_validation(
    items: &[ExistingBookmark],
    interval_days: i64,
    now: DateTime<Utc>,
) -> Vec<ScheduledCheck> {
    let interval = Duration::days(interval_days);
    items
        .iter()
        .map(|item| {
            let last = item.last_validated.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            ScheduledCheck {
                id: item.id.clone(),
                needs_validation: now - last >= interval,
            }
        })
        .collect()
}

/// Counts over a finished validation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub not_found: usize,
    pub forbidden: usize,
    pub server_errors: usize,
    pub timeouts: usize,
    pub network_errors: usize,
}

impl ValidationReport {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let mut report = Self {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            if result.is_valid {
                report.valid += 1;
                continue;
            }
            report.invalid += 1;
            match validation_suggestions(result).first().copied() {
                Some(SUGGEST_NOT_FOUND) => report.not_found += 1,
                Some(SUGGEST_FORBIDDEN) => report.forbidden += 1,
                Some(SUGGEST_SERVER_ERROR) => report.server_errors += 1,
                Some(SUGGEST_TIMEOUT) => report.timeouts += 1,
                Some(SUGGEST_NETWORK) => report.network_errors += 1,
                _ => {}
            }
        }
        report
    }
}
