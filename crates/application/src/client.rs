//! Client facade wiring the session core to the storefront services.

use std::sync::Arc;

use laced_domain::{SessionEvent, SessionPhase};
use tokio::sync::broadcast;

use crate::auth::{AuthGateway, RetryCoordinator, Session, SessionController};
use crate::config::ClientConfig;
use crate::ports::{HttpTransport, TokenStorage};
use crate::services::{CartService, CatalogService, FavoritesService, ProfileService};

/// One storefront client: a single session context plus the components
/// wired to it.
///
/// All mutable session state (the token slot and the state machine) lives
/// in the shared [`Session`]; constructing a fresh client yields a fully
/// isolated instance, which is also how the tests run.
#[derive(Debug)]
pub struct ShopClient {
    session: Arc<Session>,
    controller: SessionController,
    coordinator: RetryCoordinator,
}

impl ShopClient {
    /// Wires a client from its configuration and adapters.
    #[must_use]
    pub fn new(
        config: &ClientConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn TokenStorage>,
    ) -> Self {
        let session = Arc::new(Session::new(storage));
        let gateway = AuthGateway::new(Arc::clone(&transport), Arc::clone(&session));
        let coordinator = RetryCoordinator::new(
            transport,
            gateway.clone(),
            Arc::clone(&session),
            config.refresh_timeout(),
        );
        let controller = SessionController::new(Arc::clone(&session), gateway);

        Self {
            session,
            controller,
            coordinator,
        }
    }

    /// Session operations: login, register, restore, logout.
    #[must_use]
    pub const fn auth(&self) -> &SessionController {
        &self.controller
    }

    /// The raw authorized-call capability, for collaborators not covered
    /// by the bundled services.
    #[must_use]
    pub const fn calls(&self) -> &RetryCoordinator {
        &self.coordinator
    }

    /// Catalog browsing.
    #[must_use]
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.coordinator.clone())
    }

    /// Cart operations.
    #[must_use]
    pub fn cart(&self) -> CartService {
        CartService::new(self.coordinator.clone())
    }

    /// Favorites.
    #[must_use]
    pub fn favorites(&self) -> FavoritesService {
        FavoritesService::new(self.coordinator.clone())
    }

    /// Profile and orders.
    #[must_use]
    pub fn profile(&self) -> ProfileService {
        ProfileService::new(self.coordinator.clone())
    }

    /// Current coarse session phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Subscribes to session events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }
}
