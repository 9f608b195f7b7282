//! # Fixed Constants
//!
//! Compiled-in values shared by the cache, favorites store and renderer.
//! Store keys are part of the persisted format: changing them orphans data
//! written by earlier versions.

/// Default base URL of the remote reference API.
pub const DEFAULT_API_BASE_URL: &str = "https://swapi.dev/api";

/// Prefix of every cache entry key (`swapi-people`, `swapi-people-1`).
pub const CACHE_KEY_PREFIX: &str = "swapi";

/// The single key holding the serialized favorites collection.
///
/// Shares the cache prefix but is never produced by `cache_key`, since
/// `favorites` is not a category.
pub const FAVORITES_KEY: &str = "swapi-favorites";

/// Resource attributes never shown in a detail field list.
///
/// Array-valued attributes are dropped as well, independently of this list.
pub const EXCLUDED_DETAIL_FIELDS: [&str; 6] =
    ["name", "title", "created", "edited", "url", "homeworld"];

/// Eye colors with a dedicated glow variant on people cards.
pub const GLOW_EYE_COLORS: [&str; 7] = ["blue", "red", "yellow", "brown", "green", "orange", "hazel"];

/// Glow class for cards without a dedicated variant.
pub const DEFAULT_GLOW_CLASS: &str = "glow-hover-default";

/// Generic message shown when a fetch fails.
pub const GENERIC_ERROR_MESSAGE: &str = "Error al cargar datos. Intenta de nuevo más tarde.";
