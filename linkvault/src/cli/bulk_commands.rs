// src/cli/bulk_commands.rs
use crate::application::services::mass_action::BulkAction;
use crate::cli::args::{BulkActionArg, Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;
use crate::util::helper::{confirm, parse_id_list};
use crossterm::style::Stylize;
use tracing::instrument;

pub fn to_bulk_action(
    action: BulkActionArg,
    folder: Option<String>,
    tag: Option<String>,
) -> CliResult<BulkAction> {
    Ok(match action {
        BulkActionArg::Favorite => BulkAction::Favorite(true),
        BulkActionArg::Unfavorite => BulkAction::Favorite(false),
        BulkActionArg::Archive => BulkAction::Archive(true),
        BulkActionArg::Unarchive => BulkAction::Archive(false),
        BulkActionArg::Delete => BulkAction::Delete,
        BulkActionArg::Move => BulkAction::Move(
            folder.ok_or_else(|| CliError::InvalidInput("move requires --folder".to_string()))?,
        ),
        BulkActionArg::Tag => BulkAction::Tag(
            tag.ok_or_else(|| CliError::InvalidInput("tag requires --tag".to_string()))?,
        ),
    })
}

#[instrument(skip_all, level = "debug")]
pub async fn bulk(cli: Cli, services: &ServiceContainer) -> CliResult<()> {
    let Some(Commands::Bulk {
        action,
        ids,
        folder,
        tag,
        yes,
    }) = cli.command
    else {
        return Ok(());
    };

    let ids = parse_id_list(&ids);
    if ids.is_empty() {
        return Err(CliError::InvalidIdFormat("no bookmark ids given".to_string()));
    }
    let action = to_bulk_action(action, folder, tag)?;

    if action == BulkAction::Delete
        && !yes
        && !confirm(&format!("Delete {} bookmarks?", ids.len()))?
    {
        return Err(CliError::OperationAborted);
    }

    let mut coordinator = services.mass_actions();
    coordinator.selection_mut().enter_selection_mode();
    coordinator.selection_mut().select_ids(ids);

    let label = action.to_string();
    let count = coordinator.apply(action).await?;
    coordinator.selection_mut().exit_selection_mode();

    eprintln!("{}", format!("Applied '{}' to {} bookmarks", label, count).green());
    Ok(())
}
