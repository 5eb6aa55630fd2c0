//! API-relative endpoint paths, grouped by resource.

use uuid::Uuid;

/// Identity service endpoints.
pub mod auth {
    /// Login with credentials.
    pub const LOGIN: &str = "auth/login";
    /// Create an account.
    pub const REGISTER: &str = "auth/register";
    /// Exchange the session for a fresh access token. Takes no body; the
    /// server associates the call with the session via its cookie.
    pub const ACCESS_TOKEN: &str = "auth/access-token";
    /// End the session server-side.
    pub const LOGOUT: &str = "auth/logout";
}

/// Catalog endpoints.
pub mod products {
    use super::Uuid;

    /// Listing endpoint; accepts filter query parameters.
    pub const ROOT: &str = "products";

    /// Single sneaker by id.
    #[must_use]
    pub fn by_id(id: Uuid) -> String {
        format!("products/{id}")
    }
}

/// Cart endpoints.
pub mod cart {
    use super::Uuid;

    /// The current user's cart.
    pub const ROOT: &str = "cart";
    /// Add a line to the cart.
    pub const ITEMS: &str = "cart/items";

    /// One cart line by id.
    #[must_use]
    pub fn item(id: Uuid) -> String {
        format!("cart/items/{id}")
    }
}

/// User endpoints.
pub mod users {
    use super::Uuid;

    /// The authenticated user's profile.
    pub const PROFILE: &str = "users/profile";
    /// The authenticated user's favorited sneakers.
    pub const FAVORITES: &str = "users/favorites";

    /// Toggle one favorite.
    #[must_use]
    pub fn favorite(id: Uuid) -> String {
        format!("users/favorites/{id}")
    }
}

/// Order endpoints.
pub mod orders {
    /// The authenticated user's order history.
    pub const ROOT: &str = "orders";
}
