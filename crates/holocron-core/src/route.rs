//! # Fragment Router
//!
//! Maps a URL fragment to the view that should be shown. Routes are never
//! stored; they are recomputed from the fragment on every navigation.
//!
//! | Fragment              | Route                    |
//! |-----------------------|--------------------------|
//! | `` / `#` / `#/`       | `Home`                   |
//! | `#/favorites`         | `Favorites`              |
//! | `#/<category>`        | `List(category)`         |
//! | `#/<category>/<id>`   | `Detail(category, id)`   |
//! | anything else         | `Unknown(path)`          |
//!
//! Matching is case-insensitive. Segments after the id are ignored, and an
//! empty id segment (`#/people/`) counts as absent.

use crate::{Category, ResourceId};
use std::fmt;

/// Fragment of the favorites view.
pub const FAVORITES_FRAGMENT: &str = "#/favorites";

/// The view selected by a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    List(Category),
    Detail(Category, ResourceId),
    Favorites,
    /// A fragment naming no known category, or with a malformed id.
    /// Carries the normalized path (lower-case, without `#`).
    Unknown(String),
}

impl Route {
    /// Parse a fragment, with or without its leading `#`.
    ///
    /// An absent fragment is the empty string.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let path = fragment.strip_prefix('#').unwrap_or(fragment).to_lowercase();

        if path.is_empty() || path == "/" {
            return Route::Home;
        }
        if path == "/favorites" {
            return Route::Favorites;
        }

        let Some(rest) = path.strip_prefix('/') else {
            return Route::Unknown(path);
        };
        let mut segments = rest.split('/');
        let category = segments.next().unwrap_or_default();
        let id = segments.next().filter(|s| !s.is_empty());

        let Ok(category) = category.parse::<Category>() else {
            return Route::Unknown(path);
        };
        match id {
            None => Route::List(category),
            Some(raw) => match raw.parse::<ResourceId>() {
                Ok(id) => Route::Detail(category, id),
                Err(_) => Route::Unknown(path),
            },
        }
    }

    /// Canonical fragment for this route. Parsing it yields the same route.
    #[must_use]
    pub fn to_fragment(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::List(category) => category.fragment(),
            Route::Detail(category, id) => format!("#/{}/{}", category, id),
            Route::Favorites => FAVORITES_FRAGMENT.to_string(),
            Route::Unknown(path) => format!("#{}", path),
        }
    }

    /// The nav link to mark active, if any.
    ///
    /// Detail routes highlight their category's list link.
    #[must_use]
    pub fn nav_target(&self) -> Option<String> {
        match self {
            Route::List(category) | Route::Detail(category, _) => Some(category.fragment()),
            Route::Favorites => Some(FAVORITES_FRAGMENT.to_string()),
            Route::Home | Route::Unknown(_) => None,
        }
    }

    /// Short view name, as reported by the HTTP API.
    #[must_use]
    pub fn view_name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::List(_) => "list",
            Route::Detail(..) => "detail",
            Route::Favorites => "favorites",
            Route::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

// =============================================================================
// TESTS
// =============================================================================
