//! User profile and order history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::cart::CartItem;

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Avatar image, when set.
    #[serde(default)]
    pub avatar_url: Option<Url>,
    /// Ids of favorited sneakers.
    #[serde(default)]
    pub favorites: Vec<Uuid>,
}

impl UserProfile {
    /// Returns true if the given sneaker is favorited.
    #[must_use]
    pub fn is_favorite(&self, sneaker_id: Uuid) -> bool {
        self.favorites.contains(&sneaker_id)
    }
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed but not paid.
    Pending,
    /// Payment received.
    Paid,
    /// Handed to the carrier.
    Shipped,
    /// Delivered to the customer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
}

impl OrderStatus {
    /// Returns true while the order can still change.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Paid | Self::Shipped)
    }
}

/// A past order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Current fulfilment status.
    pub status: OrderStatus,
    /// Order total at checkout.
    pub total: f64,
    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<CartItem>,
}
