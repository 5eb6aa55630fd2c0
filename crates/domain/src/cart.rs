//! Shopping cart types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Server-assigned line identifier.
    pub id: Uuid,
    /// The sneaker this line refers to.
    pub sneaker_id: Uuid,
    /// Sneaker title, denormalized for display.
    pub title: String,
    /// Chosen size label.
    pub size: String,
    /// Number of pairs.
    pub quantity: u32,
    /// Unit price at the time the line was added.
    pub price: f64,
}

impl CartItem {
    /// Line total (unit price times quantity).
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// The user's cart as returned by the cart endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines in insertion order.
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Request body for adding a sneaker to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    /// The sneaker to add.
    pub sneaker_id: Uuid,
    /// Chosen size label.
    pub size: String,
    /// Number of pairs, at least one.
    pub quantity: u32,
}

impl AddToCart {
    /// Creates an add-to-cart request for one pair.
    pub fn one(sneaker_id: Uuid, size: impl Into<String>) -> Self {
        Self {
            sneaker_id,
            size: size.into(),
            quantity: 1,
        }
    }

    /// Validates the request before it goes out.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidQuantity`] for a zero quantity and
    /// [`DomainError::InvalidSize`] for a blank size label.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity == 0 {
            return Err(DomainError::InvalidQuantity(self.quantity));
        }
        if self.size.trim().is_empty() {
            return Err(DomainError::InvalidSize(self.size.clone()));
        }
        Ok(())
    }
}
