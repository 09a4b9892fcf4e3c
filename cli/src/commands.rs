use clap::{Args, Parser, Subcommand};
use newsdesk_core::state::SortBy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "newsdesk", about = "Browse the news feed and keep track of favorite posts", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Cache database location [default: database_path from the config, else newsdesk.db]
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to config.toml next to the database)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List posts, optionally filtered by a search query
    List(ListArgs),
    /// Show a single post
    Show(ShowArgs),
    /// List favorite posts
    Favorites,
    /// Add a post to favorites, or remove it if already there
    Toggle(ToggleArgs),
    /// Fetch the feed again and update the cache
    Refresh(RefreshArgs),
    /// Show the favorites counter
    Count,
    /// Search and sort the user directory
    Users(UsersArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive text to look for in titles and bodies
    #[arg(short, long)]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Post id
    pub id: String,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Post id
    pub id: String,
}

#[derive(Args)]
pub struct RefreshArgs {
    /// Read the feed from this JSON file instead of the configured source
    #[arg(long)]
    pub from: Option<PathBuf>,
}

#[derive(Args)]
pub struct UsersArgs {
    /// Case-insensitive text to look for in names, emails and company names
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key: name, email or company
    #[arg(long, default_value = "name")]
    pub sort: SortBy,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,

    /// Read users from this JSON file instead of the configured source
    #[arg(long)]
    pub from: Option<PathBuf>,
}
