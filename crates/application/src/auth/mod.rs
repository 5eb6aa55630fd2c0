//! Session token lifecycle for the Laced client.
//!
//! This module provides:
//! - The single-slot token store with durable write-through
//! - The identity gateway (login, register, refresh, logout)
//! - The retry coordinator that shares one refresh across concurrent
//!   authorization failures and replays the failed calls
//! - The session controller driving the Anonymous / Authenticated /
//!   Refreshing state machine and its observable events

mod coordinator;
mod gateway;
mod session;
mod token_store;

pub use coordinator::RetryCoordinator;
pub use gateway::AuthGateway;
pub use session::{Session, SessionController};
pub use token_store::TokenStore;
