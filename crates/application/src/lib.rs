//! Laced Application - session token lifecycle and storefront services.
//!
//! This crate holds the client's core: the token store, the identity
//! gateway, the retry coordinator that keeps authorized calls working
//! across token expiry, and the session controller that drives the
//! user-facing state machine. Storefront services (catalog, cart,
//! favorites, profile) are thin consumers of the authorized-call
//! capability.
//!
//! All I/O goes through the ports in [`ports`]; adapters live in the
//! infrastructure crate.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod ports;
pub mod routes;
pub mod services;

pub use auth::{AuthGateway, RetryCoordinator, Session, SessionController, TokenStore};
pub use client::ShopClient;
pub use config::ClientConfig;
pub use error::{ApiError, AuthError, GENERIC_AUTH_FAILURE};
pub use ports::{HttpTransport, TokenStorage, TokenStorageError, TransportError};
pub use services::{CartService, CatalogService, FavoritesService, ProfileService};

#[cfg(test)]
pub(crate) mod test_support;
