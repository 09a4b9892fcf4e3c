mod app;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use newsdesk_core::state::SortOrder;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::app::{App, RefreshOutcome};
use crate::commands::{Cli, Commands};
use crate::config::{default_config_path, load_config, resolve_database_path, DEFAULT_DATABASE_PATH};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(|| {
        default_config_path(cli.db.as_deref().unwrap_or(Path::new(DEFAULT_DATABASE_PATH)))
    });
    let config = load_config(&config_path)?;

    init_tracing(&config.log_filter);

    let db_path = resolve_database_path(cli.db.as_deref(), &config);
    tracing::debug!(config = %config_path.display(), db = %db_path.display(), "starting");

    let mut app = App::new(&db_path, config)?;
    app.initialize().await?;

    run_command(&app, cli.command, cli.json).await
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_command(app: &App, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::List(args) => {
            let items = app.list(args.query.as_deref());
            let favorites = app.store.favorite_ids();
            if json {
                println!("{}", serde_json::to_string_pretty(&output::news_json(&items, &favorites))?);
            } else {
                println!("{}", output::format_news_list(&items, &favorites));
            }
        }
        Commands::Show(args) => {
            let (item, is_favorite) = app.show(&args.id)?;
            if json {
                let entry = output::NewsItemJson {
                    item: &item,
                    favorite: is_favorite,
                };
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                println!("{}", output::format_news_detail(&item, is_favorite));
            }
        }
        Commands::Favorites => {
            let items = app.favorites();
            let favorites = app.store.favorite_ids();
            if json {
                println!("{}", serde_json::to_string_pretty(&output::news_json(&items, &favorites))?);
            } else {
                let counter = app.counter();
                if counter.is_visible() {
                    println!("{}", counter.label());
                }
                if items.is_empty() {
                    println!("No favorites yet. Use `newsdesk toggle <ID>` to add one.");
                } else {
                    println!("{}", output::format_news_list(&items, &favorites));
                }
            }
        }
        Commands::Toggle(args) => {
            let now_favorite = app.toggle(&args.id).await?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "id": args.id, "favorite": now_favorite })
                );
            } else {
                println!("{}", output::format_toggle(&args.id, now_favorite));
            }
        }
        Commands::Refresh(args) => {
            let outcome = app.refresh(args.from).await?;
            match outcome {
                RefreshOutcome::Fetched(count) => println!("Fetched {} posts", count),
                RefreshOutcome::UsedCache(count) => {
                    println!("Feed unavailable, showing {} cached posts", count)
                }
            }
        }
        Commands::Count => {
            let counter = app.counter();
            if json {
                println!("{}", serde_json::to_string(&output::CounterJson::from(&counter))?);
            } else if counter.is_visible() {
                println!("{}", counter.label());
            }
        }
        Commands::Users(args) => {
            let order = if args.desc { SortOrder::Desc } else { SortOrder::Asc };
            let users = app.users(args.from, args.search, args.sort, order).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                println!("{}", output::format_user_list(&users));
            }
        }
    }

    Ok(())
}
