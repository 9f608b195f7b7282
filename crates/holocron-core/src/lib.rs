//! # holocron-core
//!
//! The logic behind the Holocron reference browser.
//!
//! A navigation event (a URL fragment) flows through the crate like this:
//!
//! ```text
//! fragment ──► Route::parse ──► AppContext::navigate
//!                                   │
//!                 ┌─────────────────┼──────────────────┐
//!                 ▼                 ▼                  ▼
//!            ApiClient        FavoritesStore       render::*
//!                 │                 │                  │
//!            CacheLayer             │                  ▼
//!                 │                 │              ViewPort
//!                 └──► KeyValueStore ◄┘
//! ```
//!
//! ## Architectural Constraints
//!
//! - Synchronous: the only suspension point (the HTTP fetch) lives behind the
//!   [`Transport`] trait, implemented by the application
//! - No global state: everything hangs off an explicit [`AppContext`]
//! - No DOM: markup is handed to a [`ViewPort`]

// =============================================================================
// MODULES
// =============================================================================

pub mod app;
pub mod cache;
pub mod client;
pub mod favorites;
pub mod primitives;
pub mod render;
pub mod route;
pub mod storage;
pub mod types;
pub mod viewport;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Category, Endpoint, FavoriteRecord, FetchError, HolocronError, ResourceId};

// =============================================================================
// RE-EXPORTS: Components
// =============================================================================

pub use app::AppContext;
pub use cache::{CacheLayer, cache_key};
pub use client::{ApiClient, HttpResponse, Transport};
pub use favorites::FavoritesStore;
pub use route::Route;
pub use storage::{KeyValueStore, MemoryStore, RedbStore};
pub use viewport::{CapturingViewPort, Frame, ViewPort};
