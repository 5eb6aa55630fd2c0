//! Laced Infrastructure - adapters for the application ports.
//!
//! - [`ReqwestTransport`]: HTTP transport over reqwest with a cookie
//!   store, so the refresh endpoint's session cookie rides along
//!   automatically.
//! - [`FileTokenStorage`]: the durable token slot as a JSON file.
//! - [`MemoryTokenStorage`]: a volatile slot for tests and ephemeral
//!   sessions.

pub mod http;
pub mod persistence;

pub use http::ReqwestTransport;
pub use persistence::{FileTokenStorage, MemoryTokenStorage};
