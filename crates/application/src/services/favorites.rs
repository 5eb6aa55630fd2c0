//! Favorite sneakers.

use laced_domain::{ApiRequest, Sneaker};
use uuid::Uuid;

use crate::auth::RetryCoordinator;
use crate::error::ApiError;
use crate::routes;
use crate::services::{decode, into_result};

/// The authenticated user's favorites.
#[derive(Debug, Clone)]
pub struct FavoritesService {
    calls: RetryCoordinator,
}

impl FavoritesService {
    pub(crate) const fn new(calls: RetryCoordinator) -> Self {
        Self { calls }
    }

    /// Toggles one favorite and returns the updated set of favorite ids.
    ///
    /// # Errors
    ///
    /// [`ApiError`] on transport, authorization or decode failure.
    pub async fn toggle(&self, sneaker_id: Uuid) -> Result<Vec<Uuid>, ApiError> {
        let request = ApiRequest::patch(routes::users::favorite(sneaker_id));
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }

    /// Lists the favorited sneakers.
    ///
    /// # Errors
    ///
    /// [`ApiError`] on transport, authorization or decode failure.
    pub async fn list(&self) -> Result<Vec<Sneaker>, ApiError> {
        let request = ApiRequest::get(routes::users::FAVORITES);
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }
}
