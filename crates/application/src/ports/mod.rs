//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer.

mod http_transport;
mod token_storage;

pub use http_transport::{HttpTransport, TransportError};
pub use token_storage::{TokenStorage, TokenStorageError};
