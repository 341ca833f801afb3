// src/cli/args.rs
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linkvault", author, version, about, long_about = None)]
/// Bulk import, deduplication and link validation for a bookmark collection
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import bookmarks from pasted text: a file, stdin ('-') or the clipboard
    Import {
        /// Text file with one URL, link or JSON object per line; '-' reads stdin
        source: Option<String>,

        #[arg(long = "clipboard", help = "read the input from the system clipboard")]
        clipboard: bool,

        #[arg(short = 'f', long = "folder", help = "folder id for every imported bookmark")]
        folder: Option<String>,

        #[arg(short = 't', long = "tags", help = "tag ids for every imported bookmark, comma separated")]
        tags: Option<String>,

        #[arg(long = "include-duplicates", help = "also import URLs that are already bookmarked")]
        include_duplicates: bool,

        #[arg(long = "no-metadata", help = "skip title/description/favicon lookup")]
        no_metadata: bool,

        #[arg(long = "dry-run", help = "stop after the preview")]
        dry_run: bool,

        #[arg(long = "offline", help = "do not contact the backend; implies --dry-run")]
        offline: bool,

        #[arg(short = 'y', long = "yes", help = "do not ask for confirmation")]
        yes: bool,

        #[arg(long = "json", help = "output as json")]
        json: bool,
    },
    /// Check whether bookmarked links are still reachable
    Validate {
        #[arg(short = 'b', long = "batch-size", help = "links probed concurrently per batch")]
        batch_size: Option<usize>,

        #[arg(long = "timeout", value_name = "SECS", help = "HEAD timeout; the GET retry gets half")]
        timeout: Option<u64>,

        #[arg(long = "ids", help = "only these bookmark ids, comma separated")]
        ids: Option<String>,

        #[arg(long = "json", help = "output as json")]
        json: bool,
    },
    /// List bookmarks that are due for re-validation
    Schedule {
        #[arg(long = "interval-days", help = "re-validate links older than this")]
        interval_days: Option<i64>,

        #[arg(long = "json", help = "output as json")]
        json: bool,
    },
    /// Apply one action to several bookmarks at once
    Bulk {
        #[arg(value_enum)]
        action: BulkActionArg,

        #[arg(long = "ids", required = true, help = "bookmark ids, comma separated")]
        ids: String,

        #[arg(long = "folder", help = "target folder id for 'move'")]
        folder: Option<String>,

        #[arg(long = "tag", help = "tag id for 'tag'")]
        tag: Option<String>,

        #[arg(short = 'y', long = "yes", help = "do not ask for confirmation")]
        yes: bool,
    },
    /// Print the default configuration as TOML
    Config,
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkActionArg {
    Favorite,
    Unfavorite,
    Archive,
    Unarchive,
    Delete,
    Move,
    Tag,
}
