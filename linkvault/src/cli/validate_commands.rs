// src/cli/validate_commands.rs
use crate::application::services::link_validator::ValidationOptions;
use crate::cli::args::{Cli, Commands};
use crate::cli::display;
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::domain::bookmark::ExistingBookmark;
use crate::domain::error_context::ApplicationErrorContext;
use crate::domain::validation::{schedule_validation, ValidationTarget};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::json::{write_json, ValidationView};
use crate::util::helper::parse_id_list;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Validation targets, limited to `ids` when given (in listing order)
pub fn select_targets(bookmarks: &[ExistingBookmark], ids: Option<&str>) -> Vec<ValidationTarget> {
    let wanted = ids.map(parse_id_list);
    bookmarks
        .iter()
        .filter(|b| wanted.as_ref().map_or(true, |ids| ids.contains(&b.id)))
        .map(ValidationTarget::from)
        .collect()
}

pub fn validation_options(
    settings: &Settings,
    batch_size: Option<usize>,
    timeout_secs: Option<u64>,
) -> ValidationOptions {
    let mut options = ValidationOptions::from(&settings.validation);
    if let Some(batch_size) = batch_size {
        options.batch_size = batch_size;
    }
    if let Some(secs) = timeout_secs {
        options.timeout = Duration::from_secs(secs);
    }
    options
}

#[instrument(skip_all, level = "debug")]
pub async fn validate(cli: Cli, services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    let Some(Commands::Validate {
        batch_size,
        timeout,
        ids,
        json,
    }) = cli.command
    else {
        return Ok(());
    };

    let bookmarks = services
        .gateway
        .list_bookmarks()
        .await
        .app_context("listing bookmarks to validate")?;
    let targets = select_targets(&bookmarks, ids.as_deref());
    if targets.is_empty() {
        eprintln!("No bookmarks to validate.");
        return Ok(());
    }

    let options = validation_options(settings, batch_size, timeout);
    debug!("Validating {} links with {:?}", targets.len(), options);
    let results = services
        .link_validator()
        .validate_with_progress(&targets, options, |done, total| {
            if !json {
                display::render_validation_progress(done, total)
            }
        })
        .await;

    if json {
        write_json(&ValidationView::new(&results))?;
    } else {
        display::show_validation(&results);
    }
    Ok(())
}

#[instrument(skip_all, level = "debug")]
pub async fn schedule(cli: Cli, services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    let Some(Commands::Schedule {
        interval_days,
        json,
    }) = cli.command
    else {
        return Ok(());
    };

    let interval = interval_days.unwrap_or(settings.validation.interval_days);
    let bookmarks = services
        .gateway
        .list_bookmarks()
        .await
        .app_context("listing bookmarks to schedule")?;
    let checks = schedule_validation(&bookmarks, interval, Utc::now());

    if json {
        write_json(&checks)?;
    } else {
        display::show_schedule(&checks);
    }
    Ok(())
}
