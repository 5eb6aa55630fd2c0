//! Laced Domain - Core business types
//!
//! This crate defines the domain model for the Laced storefront client.
//! All types here are pure Rust with no I/O dependencies.

pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod persistence;
pub mod session;
pub mod user;

pub use api::{ApiRequest, ApiResponse, HttpMethod};
pub use auth::{AccessToken, AuthResponse, Credentials, RegisterDetails};
pub use cart::{AddToCart, Cart, CartItem};
pub use catalog::{CatalogFilter, Sneaker, SortOrder};
pub use error::{DomainError, DomainResult};
pub use persistence::{PersistedToken, TOKEN_SCHEMA_VERSION};
pub use session::{SessionEndReason, SessionEvent, SessionPhase};
pub use user::{Order, OrderStatus, UserProfile};
