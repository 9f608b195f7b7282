//! # CLI Command Implementations

use super::{CacheAction, FavoritesAction};
use holocron::api::{self, AppState};
use holocron::{AppError, Config, clear_cache, open_browser};
use holocron_core::{
    CacheLayer, Category, Endpoint, FavoriteRecord, FavoritesStore, RedbStore, ResourceId,
};

/// Open the configured database without an HTTP client.
fn open_store(config: &Config) -> Result<RedbStore, AppError> {
    Ok(RedbStore::open(&config.database)?)
}

fn parse_target(category: &str, id: &str) -> Result<(Category, ResourceId), AppError> {
    let category = category.to_lowercase().parse::<Category>()?;
    let id = id.parse::<ResourceId>()?;
    Ok((category, id))
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
///
/// The browser holds a blocking HTTP client, which must be created and
/// dropped outside the runtime. `keep` owns the last reference so the
/// context is released only after the runtime is gone.
pub fn cmd_serve(config: &Config) -> Result<(), AppError> {
    let state = AppState::new(open_browser(config)?);
    let keep = state.clone();

    println!("Holocron Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  API:      {}", config.api_base_url);
    println!("  Database: {}", config.database.display());
    println!();
    println!("Endpoints:");
    println!("  GET  /                  - Browser shell");
    println!("  GET  /view?fragment=    - Render a view");
    println!("  GET  /favorites         - List favorites");
    println!("  POST /favorites/toggle  - Toggle a favorite");
    println!("  GET  /status            - Cache and favorites counts");
    println!("  GET  /health            - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Io(format!("Cannot start runtime: {}", e)))?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let result = runtime.block_on(api::run_server(&addr, state));

    drop(runtime);
    drop(keep);
    result
}

// =============================================================================
// VIEW COMMAND
// =============================================================================

/// Navigate to a fragment and print the final container content.
pub fn cmd_view(config: &Config, fragment: &str, json_mode: bool) -> Result<(), AppError> {
    let mut browser = open_browser(config)?;
    let route = browser.navigate(fragment);
    let viewport = browser.viewport();

    if json_mode {
        print_json(&serde_json::json!({
            "route": route.to_fragment(),
            "view": route.view_name(),
            "active_nav": viewport.active_nav(),
            "html": viewport.content(),
        }));
        return Ok(());
    }

    println!("{}", viewport.content());
    Ok(())
}

// =============================================================================
// FETCH COMMAND
// =============================================================================

/// Print a resource as JSON. Unlike `view`, failures are reported as errors.
pub fn cmd_fetch(config: &Config, endpoint: &str) -> Result<(), AppError> {
    let endpoint = endpoint.to_lowercase().parse::<Endpoint>()?;
    let mut browser = open_browser(config)?;
    let data = browser.fetch(&endpoint)?;
    print_json(&data);
    Ok(())
}

// =============================================================================
// FAVORITES COMMANDS
// =============================================================================

pub fn cmd_favorites(
    config: &Config,
    action: FavoritesAction,
    json_mode: bool,
) -> Result<(), AppError> {
    let mut store = open_store(config)?;
    let mut favorites = FavoritesStore::new(&mut store);

    match action {
        FavoritesAction::List => {
            let records = favorites.list()?;
            print_favorites(&records, json_mode);
        }
        FavoritesAction::Add { category, id, name } => {
            let (category, id) = parse_target(&category, &id)?;
            favorites.add(category, id, &name)?;
            report_state(category, id, true, json_mode);
        }
        FavoritesAction::Remove { category, id } => {
            let (category, id) = parse_target(&category, &id)?;
            favorites.remove(category, id)?;
            report_state(category, id, false, json_mode);
        }
        FavoritesAction::Toggle { category, id, name } => {
            let (category, id) = parse_target(&category, &id)?;
            let now = favorites.toggle(category, id, &name)?;
            report_state(category, id, now, json_mode);
        }
    }
    Ok(())
}

fn print_favorites(records: &[FavoriteRecord], json_mode: bool) {
    if json_mode {
        print_json(&serde_json::json!(records));
        return;
    }
    if records.is_empty() {
        println!("No favorites yet.");
        return;
    }
    for record in records {
        println!("{:<10} {:>4}  {}", record.category, record.id, record.name);
    }
}

fn report_state(category: Category, id: ResourceId, favorite: bool, json_mode: bool) {
    if json_mode {
        print_json(&serde_json::json!({
            "category": category,
            "id": id,
            "favorite": favorite,
        }));
    } else if favorite {
        println!("{}/{} is a favorite", category, id);
    } else {
        println!("{}/{} is not a favorite", category, id);
    }
}

// =============================================================================
// CACHE COMMANDS
// =============================================================================

pub fn cmd_cache(config: &Config, action: CacheAction, json_mode: bool) -> Result<(), AppError> {
    let mut store = open_store(config)?;

    match action {
        CacheAction::List => {
            let keys = CacheLayer::new(&mut store).entries()?;
            if json_mode {
                print_json(&serde_json::json!(keys));
            } else {
                for key in &keys {
                    println!("{}", key);
                }
                println!("{} cached response(s)", keys.len());
            }
        }
        CacheAction::Clear => {
            let removed = clear_cache(&mut store)?;
            if json_mode {
                print_json(&serde_json::json!({ "removed": removed }));
            } else {
                println!("Removed {} cached response(s)", removed);
            }
        }
    }
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

pub fn cmd_status(config: &Config, json_mode: bool) -> Result<(), AppError> {
    let mut store = open_store(config)?;
    let cache_entries = CacheLayer::new(&mut store).entries()?.len();
    let favorites = FavoritesStore::new(&mut store).list()?.len();

    if json_mode {
        print_json(&serde_json::json!({
            "database": config.database.to_string_lossy(),
            "api_base_url": config.api_base_url,
            "cache_entries": cache_entries,
            "favorites": favorites,
        }));
        return Ok(());
    }

    println!("Holocron Status");
    println!("===============");
    println!("Database:  {}", config.database.display());
    println!("API:       {}", config.api_base_url);
    println!();
    println!("Cached responses: {}", cache_entries);
    println!("Favorites:        {}", favorites);
    Ok(())
}
