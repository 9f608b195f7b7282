//! # Core Type Definitions
//!
//! This module contains the types shared by every Holocron component:
//! - Resource addressing (`Category`, `ResourceId`, `Endpoint`)
//! - Persisted user data (`FavoriteRecord`)
//! - Error types (`FetchError`, `HolocronError`)
//!
//! Resources themselves stay opaque `serde_json::Value`s. They are displayed,
//! never mutated.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// CATEGORY
// =============================================================================

/// One of the six entity kinds exposed by the reference API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    People,
    Planets,
    Films,
    Species,
    Vehicles,
    Starships,
}

/// Per-category presentation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    /// URL and API path segment.
    pub slug: &'static str,
    /// Icon shown next to the list title.
    pub icon: &'static str,
    /// Resource attribute shown as the card caption.
    pub caption_field: &'static str,
    /// Label preceding the caption value.
    pub caption_label: &'static str,
    /// Resource attribute that selects a glow variant, if any.
    pub glow_field: Option<&'static str>,
}

/// Indexed by `Category as usize`; order must follow the enum declaration.
static CATEGORY_TABLE: [CategoryInfo; 6] = [
    CategoryInfo {
        slug: "people",
        icon: "/icons/robot.png",
        caption_field: "birth_year",
        caption_label: "Nacimiento",
        glow_field: Some("eye_color"),
    },
    CategoryInfo {
        slug: "planets",
        icon: "/icons/logo-planets.png",
        caption_field: "climate",
        caption_label: "Clima",
        glow_field: None,
    },
    CategoryInfo {
        slug: "films",
        icon: "/icons/film.png",
        caption_field: "director",
        caption_label: "Director",
        glow_field: None,
    },
    CategoryInfo {
        slug: "species",
        icon: "/icons/logo-species.png",
        caption_field: "language",
        caption_label: "Lenguaje",
        glow_field: None,
    },
    CategoryInfo {
        slug: "vehicles",
        icon: "/icons/logo-vehicle.png",
        caption_field: "model",
        caption_label: "Modelo",
        glow_field: None,
    },
    CategoryInfo {
        slug: "starships",
        icon: "/icons/logo-ship.png",
        caption_field: "model",
        caption_label: "Modelo",
        glow_field: None,
    },
];

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Category; 6] = [
        Category::People,
        Category::Planets,
        Category::Films,
        Category::Species,
        Category::Vehicles,
        Category::Starships,
    ];

    /// The presentation table entry for this category.
    #[must_use]
    pub fn info(self) -> &'static CategoryInfo {
        &CATEGORY_TABLE[self as usize]
    }

    /// The path segment, e.g. `"people"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.info().slug
    }

    /// The list route fragment, e.g. `"#/people"`.
    #[must_use]
    pub fn fragment(self) -> String {
        format!("#/{}", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = HolocronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| HolocronError::UnknownCategory(s.to_string()))
    }
}

// =============================================================================
// RESOURCE ID
// =============================================================================

/// Positive integer id of a single entity within its category.
///
/// Persisted as a decimal string; deserialization also accepts a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Create an id, rejecting zero.
    #[must_use]
    pub const fn new(id: u32) -> Option<Self> {
        if id == 0 { None } else { Some(Self(id)) }
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Extract the id from a canonical resource URL (`.../people/1/`).
    ///
    /// Returns `None` unless the URL ends in `/<digits>/`.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let trimmed = url.strip_suffix('/')?;
        let (_, last) = trimmed.rsplit_once('/')?;
        last.parse().ok()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = HolocronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // u32::from_str accepts a leading '+', ids are plain digits only
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HolocronError::InvalidId(s.to_string()));
        }
        s.parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| HolocronError::InvalidId(s.to_string()))
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        let raw = Raw::deserialize(deserializer)?;
        let text = match raw {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// ENDPOINT
// =============================================================================

/// One addressable API path: a collection or a single entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub category: Category,
    pub id: Option<ResourceId>,
}

impl Endpoint {
    /// The collection endpoint of a category.
    #[must_use]
    pub const fn collection(category: Category) -> Self {
        Self { category, id: None }
    }

    /// A single-entity endpoint.
    #[must_use]
    pub const fn item(category: Category, id: ResourceId) -> Self {
        Self {
            category,
            id: Some(id),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}/{}", self.category, id),
            None => write!(f, "{}", self.category),
        }
    }
}

impl FromStr for Endpoint {
    type Err = HolocronError;

    /// Parse `"people"` or `"people/1"`, ignoring surrounding slashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_matches('/');
        match trimmed.split_once('/') {
            Some((category, id)) => Ok(Self::item(category.parse()?, id.parse()?)),
            None => Ok(Self::collection(trimmed.parse()?)),
        }
    }
}

// =============================================================================
// FAVORITE RECORD
// =============================================================================

/// A single favorited entity.
///
/// At most one record per `(category, id)` exists in the favorites collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub category: Category,
    pub id: ResourceId,
    pub name: String,
}

impl FavoriteRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(category: Category, id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            category,
            id,
            name: name.into(),
        }
    }

    /// Whether this record refers to the given entity.
    #[must_use]
    pub fn matches(&self, category: Category, id: ResourceId) -> bool {
        self.category == category && self.id == id
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Failure of a single remote fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API answered with a non-2xx status.
    #[error("Error en el fetch: {status} {status_text}")]
    Status { status: u16, status_text: String },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("Malformed JSON response: {0}")]
    Parse(String),
}

/// Errors surfaced by Holocron core operations.
#[derive(Debug, Error)]
pub enum HolocronError {
    /// Fetching a resource from the remote API failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response lacked the data the view needs.
    #[error("No data available for {0}")]
    MissingData(Category),

    /// The persistent store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A value could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored value could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// A category name outside the known set.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// An id that is not a positive integer.
    #[error("Invalid resource id: {0:?}")]
    InvalidId(String),
}

// =============================================================================
// TESTS
// =============================================================================
