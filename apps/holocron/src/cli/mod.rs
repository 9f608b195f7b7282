//! # Holocron CLI Module
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `view` - Render the view for a fragment
//! - `fetch` - Print a resource (through the cache)
//! - `favorites` - List and edit favorites
//! - `cache` - List or clear cached responses
//! - `status` - Show cache and favorites counts

mod commands;

use clap::{Parser, Subcommand};
use holocron::{AppError, Config};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Holocron - browse the Star Wars reference API from a local cache.
#[derive(Parser, Debug)]
#[command(name = "holocron")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: ./holocron.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the database holding cache and favorites
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Base URL of the reference API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render the view for a fragment, e.g. "#/people/1"
    View {
        /// Fragment to navigate to (empty for home)
        #[arg(default_value = "")]
        fragment: String,
    },

    /// Print a resource, e.g. "planets" or "planets/1"
    Fetch { endpoint: String },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Inspect or clear the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Show cache and favorites counts
    Status,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List favorites in insertion order
    List,
    /// Add a favorite (no-op if present)
    Add {
        category: String,
        id: String,
        name: String,
    },
    /// Remove a favorite (no-op if absent)
    Remove { category: String, id: String },
    /// Flip a favorite
    Toggle {
        category: String,
        id: String,
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached endpoints
    List,
    /// Remove every cached response, keeping favorites
    Clear,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve configuration: file, environment, then flags.
pub fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), AppError> {
    let mut config = resolve_config(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_serve(&config)
        }
        Some(Commands::View { fragment }) => cmd_view(&config, &fragment, json_mode),
        Some(Commands::Fetch { endpoint }) => cmd_fetch(&config, &endpoint),
        Some(Commands::Favorites { action }) => cmd_favorites(&config, action, json_mode),
        Some(Commands::Cache { action }) => cmd_cache(&config, action, json_mode),
        Some(Commands::Status) | None => cmd_status(&config, json_mode),
    }
}
