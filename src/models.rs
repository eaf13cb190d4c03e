//! Core data models used throughout fruitstand.
//!
//! These types represent the catalog items, reports, and favorites that flow
//! through the proxy, summary, and persistence paths. Everything here is
//! fully typed: raw upstream payloads only exist inside
//! [`crate::normalize`] and [`crate::reports`], which construct these types.

use serde::Serialize;

/// Canonical catalog record, produced by normalization.
///
/// Taxonomy fields are optional because the upstream omits them freely;
/// nutrition values are always present (absent upstream fields default to
/// zero).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    pub name: String,
    pub genus: Option<String>,
    pub family: Option<String>,
    pub order: Option<String>,
    pub nutrition: Nutrition,
}

/// Per-item nutrition facts, in the upstream's units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Nutrition {
    pub calories: f64,
    pub sugar: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fat: f64,
}

/// One rated entry from the review feed, after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub product: String,
    pub category: String,
    pub rating: f64,
}

/// Aggregated rating for one report category.
///
/// `avg_rating` is a string with exactly two decimals, matching the wire
/// format consumers already parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    #[serde(rename = "avgRating")]
    pub avg_rating: String,
}

/// A stored favorite. `id` and `created_at` are assigned by the store,
/// never by the caller; `created_at` is ISO 8601 UTC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteRecord {
    pub id: String,
    pub fruit_name: String,
    pub notes: String,
    pub created_at: String,
}
