//! # API Request/Response Types
//!
//! JSON structures exchanged with the shell page.

use holocron_core::{
    Category, CapturingViewPort, FavoriteRecord, HolocronError, ResourceId, Route,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Store statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub cache_entries: usize,
    pub favorites: usize,
}

// =============================================================================
// VIEW REQUEST/RESPONSE
// =============================================================================

/// Query string of `GET /view`. A missing fragment means home.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub fragment: String,
}

/// Result of one navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    pub success: bool,
    /// Canonical fragment of the route that was shown.
    pub route: String,
    /// `home`, `list`, `detail`, `favorites` or `unknown`.
    pub view: String,
    /// Final container content.
    pub html: String,
    pub active_nav: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ViewResponse {
    /// Capture the state a navigation left in the viewport.
    pub fn from_viewport(route: &Route, viewport: &CapturingViewPort) -> Self {
        Self {
            success: true,
            route: route.to_fragment(),
            view: route.view_name().to_string(),
            html: viewport.content().to_string(),
            active_nav: viewport.active_nav().map(str::to_string),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            route: String::new(),
            view: String::new(),
            html: String::new(),
            active_nav: None,
            error: Some(message),
        }
    }
}

// =============================================================================
// FAVORITES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub success: bool,
    pub favorites: Vec<FavoriteRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FavoritesResponse {
    pub fn success(favorites: Vec<FavoriteRecord>) -> Self {
        Self {
            success: true,
            favorites,
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            favorites: Vec::new(),
            error: Some(message),
        }
    }
}

/// Body of `POST /favorites/toggle`, as read from the control's data
/// attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub category: String,
    /// Accepts `"1"` or `1`.
    pub id: serde_json::Value,
    pub name: String,
}

impl ToggleRequest {
    /// Validate category and id.
    pub fn target(&self) -> Result<(Category, ResourceId), HolocronError> {
        let category = self.category.parse::<Category>()?;
        let id = match &self.id {
            serde_json::Value::String(s) => s.parse::<ResourceId>()?,
            serde_json::Value::Number(n) => n.to_string().parse::<ResourceId>()?,
            other => return Err(HolocronError::InvalidId(other.to_string())),
        };
        Ok((category, id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub success: bool,
    /// New state: `true` if the entity is now a favorite.
    pub favorite: bool,
    /// Replacement markup for the control.
    pub control_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToggleResponse {
    pub fn success(favorite: bool, control_html: String) -> Self {
        Self {
            success: true,
            favorite,
            control_html: Some(control_html),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            favorite: false,
            control_html: None,
            error: Some(message),
        }
    }
}
