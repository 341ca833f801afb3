// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;

pub mod args;
pub mod bulk_commands;
pub mod completion;
pub mod display;
pub mod error;
pub mod import_commands;
pub mod validate_commands;

pub async fn execute_command(
    cli: Cli,
    services: &ServiceContainer,
    settings: &Settings,
) -> CliResult<()> {
    match cli.command {
        Some(Commands::Import { .. }) => import_commands::import(cli, services, settings).await,
        Some(Commands::Validate { .. }) => validate_commands::validate(cli, services, settings).await,
        Some(Commands::Schedule { .. }) => validate_commands::schedule(cli, services, settings).await,
        Some(Commands::Bulk { .. }) => bulk_commands::bulk(cli, services).await,
        Some(Commands::Config) => {
            println!("{}", crate::config::generate_default_config());
            Ok(())
        }
        Some(Commands::Completion { shell }) => handle_completion(shell),
        None => Ok(()),
    }
}

fn handle_completion(shell: String) -> CliResult<()> {
    // Write a brief comment to stderr about what's being output
    match shell.to_lowercase().as_str() {
        "bash" => {
            eprintln!("# Outputting bash completion script for linkvault");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(linkvault completion bash)\"          # one-time use");
            eprintln!("# - linkvault completion bash >> ~/.bashrc         # add to bashrc");
            eprintln!("#");
        }
        "zsh" => {
            eprintln!("# Outputting zsh completion script for linkvault");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(linkvault completion zsh)\"           # one-time use");
            eprintln!("# - linkvault completion zsh > ~/.zfunc/_linkvault # save to fpath directory");
            eprintln!("#");
        }
        "fish" => {
            eprintln!("# Outputting fish completion script for linkvault");
            eprintln!("# To use, run one of:");
            eprintln!("# - linkvault completion fish | source             # one-time use");
            eprintln!("# - linkvault completion fish > ~/.config/fish/completions/linkvault.fish");
            eprintln!("#");
        }
        _ => {}
    }

    completion::generate_completion(&shell).map_err(|e| {
        error::CliError::CommandFailed(format!("Failed to generate completion script: {}", e))
    })
}
