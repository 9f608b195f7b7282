//! # Browser Construction
//!
//! Wires a [`Config`] into a ready [`AppContext`]: the redb database, the
//! reqwest transport and a capturing viewport. Store and transport are boxed
//! so the server and tests can swap in other implementations.

use crate::config::Config;
use crate::error::AppError;
use crate::transport::ReqwestTransport;
use holocron_core::{
    ApiClient, AppContext, CacheLayer, CapturingViewPort, KeyValueStore, RedbStore, Transport,
};

pub type DynStore = Box<dyn KeyValueStore + Send>;
pub type DynTransport = Box<dyn Transport + Send>;

/// The context type shared by the CLI and the server.
pub type Browser = AppContext<DynStore, DynTransport, CapturingViewPort>;

/// Assemble a context from boxed parts.
pub fn assemble(store: DynStore, base_url: &str, transport: DynTransport) -> Browser {
    AppContext::new(
        store,
        ApiClient::new(base_url, transport),
        CapturingViewPort::new(),
    )
}

/// Open the configured database and build the production context.
///
/// Must not be called from inside an async runtime: the blocking HTTP
/// client panics there.
pub fn open_browser(config: &Config) -> Result<Browser, AppError> {
    let store = RedbStore::open(&config.database)?;
    let transport = ReqwestTransport::new()?;
    tracing::info!(
        database = %config.database.display(),
        api = %config.api_base_url,
        "browser ready"
    );
    Ok(assemble(
        Box::new(store),
        &config.api_base_url,
        Box::new(transport),
    ))
}

/// Drop every cached response, keep favorites, then compact the file so the
/// freed pages go back to the filesystem.
pub fn clear_cache(store: &mut RedbStore) -> Result<usize, AppError> {
    let removed = CacheLayer::new(store).clear()?;
    store.compact()?;
    tracing::debug!("database compacted");
    Ok(removed)
}
