// src/cli/display.rs
//! Human readable output. Everything goes to stderr; stdout is reserved for
//! `--json` and other pipeable content.

use crate::application::services::import_session::{ImportPhase, ImportSession};
use crate::domain::candidate::{ImportProgress, ImportStats, ImportSummary, ParsedCandidate};
use crate::domain::validation::{
    validation_suggestions, ScheduledCheck, ValidationReport, ValidationResult,
};
use crate::util::helper::truncate_middle;
use crossterm::style::Stylize;
use itertools::Itertools;
use std::io::{self, Write};

const URL_WIDTH: usize = 60;

/// One preview row: selection box, URL, title and annotations
pub fn format_candidate(candidate: &ParsedCandidate) -> String {
    let marker = if candidate.selected() { "[x]" } else { "[ ]" };
    let url = truncate_middle(&candidate.url, URL_WIDTH);
    let title = candidate.title.as_deref().unwrap_or_default();

    let mut notes = Vec::new();
    if !candidate.is_valid {
        let reason = candidate.error.as_deref().unwrap_or("invalid");
        notes.push(format!("{}", reason.red()));
    }
    if candidate.is_duplicate {
        let existing = candidate.existing_bookmark_id.as_deref().unwrap_or("?");
        notes.push(format!("{}", format!("duplicate of {}", existing).yellow()));
    }

    let line = format!("{} {} {}", marker, url, title.to_string().dim());
    if notes.is_empty() {
        line
    } else {
        format!("{}  {}", line, notes.join(", "))
    }
}

pub fn format_stats(stats: &ImportStats) -> String {
    format!(
        "{} lines: {} valid, {} invalid, {} duplicates, {} selected",
        stats.total, stats.valid, stats.invalid, stats.duplicates, stats.selected
    )
}

pub fn show_preview(session: &ImportSession) {
    let visible = session.visible_candidates();
    eprintln!("{}", "Import preview".bold());
    for candidate in &visible {
        eprintln!("  {}", format_candidate(candidate));
    }
    let hidden = session.candidates().len() - visible.len();
    if hidden > 0 {
        eprintln!("  ({} hidden by filter)", hidden);
    }
    eprintln!("{}", format_stats(&session.stats()));
    let defaults = session.defaults();
    if defaults.folder_id.is_some() || !defaults.tag_ids.is_empty() {
        eprintln!(
            "Folder: {}  Tags: {}",
            defaults.folder_id.as_deref().unwrap_or("-"),
            defaults.tag_ids.iter().join(", ")
        );
    }
}

/// Overwrite the current stderr line with a progress bar
pub fn render_progress(phase: ImportPhase, progress: &ImportProgress) {
    let label = match phase {
        ImportPhase::Enriching => "Fetching metadata",
        ImportPhase::Importing => "Importing",
    };
    let mut stderr = io::stderr();
    let _ = write!(
        stderr,
        "\r{} {}/{} ({:.0}%)",
        label,
        progress.processed,
        progress.total,
        progress.percentage()
    );
    if progress.is_complete() {
        let _ = writeln!(stderr);
    }
    let _ = stderr.flush();
}

pub fn show_summary(summary: &ImportSummary) {
    eprintln!(
        "{}",
        format!(
            "Imported {} of {} bookmarks ({:.0}% success)",
            summary.successful,
            summary.total,
            summary.success_rate()
        )
        .green()
    );
}

pub fn render_validation_progress(done: usize, total: usize) {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "\rChecked {}/{} links", done, total);
    if done >= total {
        let _ = writeln!(stderr);
    }
    let _ = stderr.flush();
}

pub fn format_validation(result: &ValidationResult) -> String {
    let status = result
        .status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "---".to_string());
    let url = truncate_middle(&result.url, URL_WIDTH);
    if result.is_valid {
        format!("{} {} {} {}", "ok  ".green(), status, result.id, url)
    } else {
        let mut line = format!("{} {} {} {}", "dead".red(), status, result.id, url);
        if let Some(error) = &result.error {
            line.push_str(&format!(" ({})", error));
        }
        for suggestion in validation_suggestions(result) {
            line.push_str(&format!("\n       {}", suggestion.italic()));
        }
        line
    }
}

pub fn format_report(report: &ValidationReport) -> String {
    format!(
        "{} checked: {} reachable, {} failing (404: {}, 403: {}, 5xx: {}, timeout: {}, network: {})",
        report.total,
        report.valid,
        report.invalid,
        report.not_found,
        report.forbidden,
        report.server_errors,
        report.timeouts,
        report.network_errors
    )
}

pub fn show_validation(results: &[ValidationResult]) {
    // failing links last, closest to the report line
    for result in results.iter().sorted_by_key(|r| r.is_valid).rev() {
        eprintln!("{}", format_validation(result));
    }
    eprintln!("{}", format_report(&ValidationReport::from_results(results)).bold());
}

pub fn show_schedule(checks: &[ScheduledCheck]) {
    let (due, fresh): (Vec<_>, Vec<_>) = checks.iter().partition(|c| c.needs_validation);
    for check in &due {
        eprintln!("{} {}", "due  ".yellow(), check.id);
    }
    eprintln!(
        "{} due for validation, {} recently checked",
        due.len(),
        fresh.len()
    );
}
