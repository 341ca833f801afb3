// src/cli/import_commands.rs
use crate::application::error::ApplicationError;
use crate::cli::args::{Cli, Commands};
use crate::cli::display;
use crate::cli::error::{CliError, CliResult};
use crate::config::{parse_list, ImportSettings, Settings};
use crate::domain::error_context::CliErrorContext;
use crate::domain::services::clipboard::ClipboardService;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::json::{write_json, PreviewView};
use crate::util::helper::{confirm, is_stdin_piped};
use std::io::Read;
use tracing::{debug, instrument};

/// Raw import text from the clipboard, stdin ('-' or piped) or a file
pub fn read_input(
    source: Option<&str>,
    clipboard: bool,
    clipboard_service: &dyn ClipboardService,
) -> CliResult<String> {
    if clipboard {
        debug!("Reading import text from clipboard");
        return Ok(clipboard_service.read_text()?);
    }
    match source {
        Some("-") => read_stdin(),
        None if is_stdin_piped() => read_stdin(),
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::InvalidInput(format!("source {}: {}", path, e))),
        None => Err(CliError::InvalidInput(
            "no input given: pass a file, '-' for stdin, or --clipboard".to_string(),
        )),
    }
}

fn read_stdin() -> CliResult<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .cli_context("reading stdin")?;
    Ok(text)
}

/// Session settings with command line overrides applied
pub fn import_settings(
    settings: &ImportSettings,
    folder: Option<String>,
    tags: Option<&str>,
    no_metadata: bool,
) -> ImportSettings {
    let mut merged = settings.clone();
    if folder.is_some() {
        merged.default_folder = folder;
    }
    if let Some(tags) = tags {
        merged.default_tags = parse_list(tags);
    }
    if no_metadata {
        merged.fetch_metadata = false;
    }
    merged
}

#[instrument(skip_all, level = "debug")]
pub async fn import(cli: Cli, services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    let Some(Commands::Import {
        source,
        clipboard,
        folder,
        tags,
        include_duplicates,
        no_metadata,
        dry_run,
        offline,
        yes,
        json,
    }) = cli.command
    else {
        return Ok(());
    };

    let text = read_input(source.as_deref(), clipboard, services.clipboard_service.as_ref())?;
    let merged = import_settings(&settings.import, folder, tags.as_deref(), no_metadata);
    let mut session = services.import_session(&merged);
    session.set_input(text)?;

    if offline {
        session.parse(&[])?;
    } else {
        session.parse_with_gateway().await?;
    }
    if include_duplicates {
        session.select_all()?;
    }

    let dry_run = dry_run || offline;
    if dry_run {
        if json {
            write_json(&PreviewView {
                stats: session.stats(),
                candidates: session.visible_candidates(),
                progress: None,
                summary: None,
            })?;
        } else {
            display::show_preview(&session);
        }
        return Ok(());
    }

    if !json {
        display::show_preview(&session);
    }
    let selected = session.selected_count();
    if selected == 0 {
        eprintln!("Nothing selected for import.");
        return Ok(());
    }
    if !yes && !confirm(&format!("Import {} bookmarks?", selected))? {
        return Err(CliError::OperationAborted);
    }

    let outcome = session
        .import(|phase, progress| {
            if !json {
                display::render_progress(phase, progress)
            }
        })
        .await;

    match outcome {
        Ok(summary) => {
            if json {
                write_json(&PreviewView {
                    stats: session.stats(),
                    candidates: session.candidates().iter().collect(),
                    progress: Some(session.progress()),
                    summary: Some(summary),
                })?;
            } else {
                display::show_summary(&summary);
            }
            Ok(())
        }
        Err(ApplicationError::ImportFailed(message)) => Err(CliError::CommandFailed(format!(
            "import failed, nothing was saved: {}",
            message
        ))),
        Err(e) => Err(e.into()),
    }
}
