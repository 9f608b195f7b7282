//! # Application Context
//!
//! `AppContext` owns the three collaborators of the browser (store, API
//! client, viewport) and runs navigation against them. It replaces the
//! module-level globals a page script would use, so tests can inject an
//! in-memory store, a scripted transport and a capturing viewport.
//!
//! ## Failure policy
//!
//! Errors never escape `navigate`. They are logged and the whole container
//! is replaced:
//! - fetch failures (status, transport, parse) show the generic error
//! - a response without the data a view needs shows "could not load <category>",
//!   for list and detail views alike
//! - storage failures while reading favorites show the generic error

use crate::cache::CacheLayer;
use crate::client::{ApiClient, Transport};
use crate::favorites::FavoritesStore;
use crate::primitives::GENERIC_ERROR_MESSAGE;
use crate::render;
use crate::route::Route;
use crate::storage::KeyValueStore;
use crate::viewport::ViewPort;
use crate::{Category, Endpoint, FetchError, HolocronError, ResourceId};
use serde_json::Value;

/// Store, API client and viewport, wired together.
#[derive(Debug)]
pub struct AppContext<S, T, V> {
    store: S,
    api: ApiClient<T>,
    viewport: V,
}

impl<S, T, V> AppContext<S, T, V>
where
    S: KeyValueStore,
    T: Transport,
    V: ViewPort,
{
    pub fn new(store: S, api: ApiClient<T>, viewport: V) -> Self {
        Self {
            store,
            api,
            viewport,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Cache view over the context's store.
    pub fn cache(&mut self) -> CacheLayer<'_, S> {
        CacheLayer::new(&mut self.store)
    }

    /// Favorites view over the context's store.
    pub fn favorites(&mut self) -> FavoritesStore<'_, S> {
        FavoritesStore::new(&mut self.store)
    }

    /// Fetch a resource through the cache, without rendering.
    pub fn fetch(&mut self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        self.api.fetch_resource(&mut self.store, endpoint)
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Handle a navigation event: parse the fragment, update the nav bar and
    /// render the selected view. Returns the route that was shown.
    pub fn navigate(&mut self, fragment: &str) -> Route {
        let route = Route::parse(fragment);
        tracing::debug!(fragment = %fragment, route = %route, "navigate");

        self.viewport.set_active_nav(route.nav_target().as_deref());

        match &route {
            Route::Home => self.viewport.render(&render::render_home()),
            Route::List(category) => self.show_list(*category),
            Route::Detail(category, id) => self.show_detail(*category, *id),
            Route::Favorites => self.show_favorites(),
            Route::Unknown(path) => {
                tracing::warn!(path = %path, "unknown route");
                self.viewport.render(&render::render_not_found(path));
            }
        }
        route
    }

    fn show_list(&mut self, category: Category) {
        self.viewport.render(&render::render_loader());
        let result = self
            .fetch(&Endpoint::collection(category))
            .map_err(HolocronError::from)
            .and_then(|data| render::render_list(category, &data));
        self.finish(result);
    }

    fn show_detail(&mut self, category: Category, id: ResourceId) {
        self.viewport.render(&render::render_loader());
        let result = self
            .fetch(&Endpoint::item(category, id))
            .map_err(HolocronError::from)
            .and_then(|data| {
                let is_favorite = self.favorites().is_favorite(category, id)?;
                render::render_detail(category, id, &data, is_favorite)
            });
        self.finish(result);
    }

    fn show_favorites(&mut self) {
        let result = self
            .favorites()
            .list()
            .map(|records| render::render_favorites(&records));
        self.finish(result);
    }

    /// Render a view result, or the failure message in its place.
    fn finish(&mut self, result: Result<String, HolocronError>) {
        match result {
            Ok(html) => self.viewport.render(&html),
            Err(e) => {
                tracing::error!(error = %e, "Error al cargar datos");
                let html = match e {
                    HolocronError::MissingData(category) => render::render_missing(category),
                    _ => render::render_error(GENERIC_ERROR_MESSAGE),
                };
                self.viewport.render(&html);
            }
        }
    }

    // =========================================================================
    // FAVORITE CONTROL
    // =========================================================================

    /// Activate the favorite control of a detail view.
    ///
    /// Flips the stored state and swaps the control in place; the rest of the
    /// view is not re-rendered. Returns the new state.
    pub fn toggle_favorite(
        &mut self,
        category: Category,
        id: ResourceId,
        name: &str,
    ) -> Result<bool, HolocronError> {
        let now_favorite = self.favorites().toggle(category, id, name)?;
        let control = render::render_favorite_control(category, id, name, now_favorite);
        self.viewport.update_favorite_control(&control);
        Ok(now_favorite)
    }
}

// =============================================================================
// TESTS
// =============================================================================
