//! # fruitstand CLI
//!
//! The `fruitstand` binary is the primary interface for the fruit catalog
//! backend. It provides commands for database initialization, catalog
//! queries, review summaries, favorites management, and starting the HTTP
//! server.
//!
//! ## Usage
//!
//! ```bash
//! fruitstand --config ./config/fruitstand.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fruitstand init` | Create the SQLite database and run schema migrations |
//! | `fruitstand catalog [NAME]` | One catalog item, or a filtered listing |
//! | `fruitstand summary` | Average review rating per category |
//! | `fruitstand favorites list` | Stored favorites, newest first |
//! | `fruitstand favorites add <NAME>` | Validate and store a favorite |
//! | `fruitstand serve` | Start the HTTP JSON server |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! fruitstand init --config ./config/fruitstand.toml
//!
//! # Look up one fruit
//! fruitstand catalog Banana
//!
//! # Low-calorie members of the rose family
//! fruitstand catalog --family rosaceae --max-calories 60
//!
//! # Average review rating per category
//! fruitstand summary
//!
//! # Save a favorite with a note
//! fruitstand favorites add Banana --notes "breakfast staple"
//!
//! # Start the HTTP server
//! fruitstand serve --config ./config/fruitstand.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fruitstand::filter::FilterSpec;
use fruitstand::{catalog, config, favorites, migrate, reports, server};

/// fruitstand CLI — a fruit catalog backend with filtering, review
/// summaries, and saved favorites.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/fruitstand.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "fruitstand",
    about = "fruitstand — a fruit catalog backend with filtering, review summaries, and saved favorites",
    version,
    long_about = "fruitstand proxies an upstream fruit catalog behind a normalizing, filterable \
    endpoint, reduces an upstream review feed to per-category average ratings, and keeps \
    user-saved favorites in SQLite. Every operation is available from this CLI and from the \
    HTTP JSON server."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/fruitstand.toml`. Database, server, and
    /// upstream settings are read from this file.
    #[arg(long, global = true, default_value = "./config/fruitstand.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the favorites table. This
    /// command is idempotent — running it multiple times is safe.
    Init,

    /// Query the upstream catalog.
    ///
    /// With a NAME argument, fetches that single item. Without one, lists
    /// the whole catalog, optionally narrowed by the filter flags. NAME
    /// takes precedence over filters.
    Catalog {
        /// Item name for a single lookup (e.g., `Banana`).
        name: Option<String>,

        /// Keep only items with at least this much sugar (inclusive).
        #[arg(long)]
        min_sugar: Option<f64>,

        /// Keep only items with at most this many calories (inclusive).
        #[arg(long)]
        max_calories: Option<f64>,

        /// Keep only items of this family (case-insensitive exact match).
        #[arg(long)]
        family: Option<String>,
    },

    /// Summarize the review feed.
    ///
    /// Prints the average rating per category, two decimals, categories in
    /// order of first appearance in the feed.
    Summary,

    /// Inspect or extend stored favorites.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Start the HTTP JSON server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// catalog, summary, and favorites endpoints.
    Serve,
}

/// Favorites subcommands.
#[derive(Subcommand)]
enum FavoritesAction {
    /// Print stored favorites, newest first.
    List,

    /// Validate and store a new favorite.
    ///
    /// The fruit name must be non-empty after trimming; notes are optional
    /// and default to an empty string.
    Add {
        /// Fruit name to save.
        fruit_name: String,

        /// Free-form note stored with the favorite.
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Catalog {
            name,
            min_sugar,
            max_calories,
            family,
        } => {
            let filters = FilterSpec {
                min_sugar,
                max_calories,
                family: family
                    .map(|f| f.trim().to_string())
                    .filter(|f| !f.is_empty()),
            };
            catalog::run_catalog(&cfg, name.as_deref(), filters).await?;
        }
        Commands::Summary => {
            reports::run_summary(&cfg).await?;
        }
        Commands::Favorites { action } => match action {
            FavoritesAction::List => {
                favorites::run_favorites_list(&cfg).await?;
            }
            FavoritesAction::Add { fruit_name, notes } => {
                favorites::run_favorites_add(&cfg, &fruit_name, &notes).await?;
            }
        },
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
