//! Sneaker catalog types and listing filters.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A sneaker as returned by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sneaker {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Brand name.
    pub brand: String,
    /// Price in the store currency.
    pub price: f64,
    /// Available size labels.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Primary product image.
    #[serde(default)]
    pub image_url: Option<Url>,
    /// Longer description, when the server provides one.
    #[serde(default)]
    pub description: Option<String>,
}

/// Sort orders accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently added first.
    Newest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

/// Query filters for the catalog listing.
///
/// Serializes to the listing endpoint's query string; unset fields are
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    /// Free-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Restrict to one brand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Lower price bound, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Upper price bound, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Result ordering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl CatalogFilter {
    /// Returns true if no filter field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.brand.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.sort.is_none()
            && self.page.is_none()
            && self.per_page.is_none()
    }
}
