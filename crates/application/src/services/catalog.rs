//! Sneaker catalog browsing.

use laced_domain::{ApiRequest, CatalogFilter, Sneaker};
use uuid::Uuid;

use crate::auth::RetryCoordinator;
use crate::error::ApiError;
use crate::routes;
use crate::services::{decode, into_result};

/// Read access to the sneaker catalog.
///
/// Listing works anonymously; the coordinator simply sends without a
/// bearer token when none is stored.
#[derive(Debug, Clone)]
pub struct CatalogService {
    calls: RetryCoordinator,
}

impl CatalogService {
    pub(crate) const fn new(calls: RetryCoordinator) -> Self {
        Self { calls }
    }

    /// Lists sneakers matching the filter.
    ///
    /// # Errors
    ///
    /// [`ApiError`] on transport, authorization or decode failure.
    pub async fn list(&self, filter: &CatalogFilter) -> Result<Vec<Sneaker>, ApiError> {
        let query = serde_urlencoded::to_string(filter)
            .map_err(|err| ApiError::Serialization(err.to_string()))?;
        let request = ApiRequest::get(routes::products::ROOT).with_raw_query(query);
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }

    /// Fetches one sneaker by id.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] with 404 when the sneaker does not exist.
    pub async fn get(&self, id: Uuid) -> Result<Sneaker, ApiError> {
        let request = ApiRequest::get(routes::products::by_id(id));
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }
}
