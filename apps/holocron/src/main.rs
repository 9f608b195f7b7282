//! # Holocron
//!
//! A cached, favorites-aware browser for the Star Wars reference API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/holocron (THE BINARY)               │
//! │                                                          │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────────┐  │
//! │  │    CLI      │   │  HTTP API   │   │   Transport    │  │
//! │  │   (clap)    │   │   (axum)    │   │   (reqwest)    │  │
//! │  └──────┬──────┘   └──────┬──────┘   └───────┬────────┘  │
//! │         └─────────────────┼──────────────────┘           │
//! │                           ▼                              │
//! │                  ┌─────────────────┐                     │
//! │                  │  holocron-core  │                     │
//! │                  │   (THE LOGIC)   │                     │
//! │                  └─────────────────┘                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Serve the browser on http://127.0.0.1:8080
//! holocron serve
//!
//! # Render a view in the terminal
//! holocron view "#/people/1"
//! holocron favorites list
//! holocron cache clear
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `HOLOCRON_LOG_FORMAT=json` switches to machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("HOLOCRON_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "holocron=debug,holocron_core=debug,tower_http=debug"
    } else {
        "holocron=info,holocron_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn print_banner() {
    println!(
        r#"
  ╦ ╦╔═╗╦  ╔═╗╔═╗╦═╗╔═╗╔╗╔
  ╠═╣║ ║║  ║ ║║  ╠╦╝║ ║║║║
  ╩ ╩╚═╝╩═╝╚═╝╚═╝╩╚═╚═╝╝╚╝

  Reference Archive v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
