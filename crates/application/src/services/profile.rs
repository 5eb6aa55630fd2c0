//! Profile and order history.

use laced_domain::{ApiRequest, Order, UserProfile};

use crate::auth::RetryCoordinator;
use crate::error::ApiError;
use crate::routes;
use crate::services::{decode, into_result};

/// The authenticated user's profile and orders.
#[derive(Debug, Clone)]
pub struct ProfileService {
    calls: RetryCoordinator,
}

impl ProfileService {
    pub(crate) const fn new(calls: RetryCoordinator) -> Self {
        Self { calls }
    }

    /// Fetches the profile.
    ///
    /// # Errors
    ///
    /// [`ApiError`] on transport, authorization or decode failure.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let request = ApiRequest::get(routes::users::PROFILE);
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }

    /// Fetches the order history.
    ///
    /// # Errors
    ///
    /// [`ApiError`] on transport, authorization or decode failure.
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        let request = ApiRequest::get(routes::orders::ROOT);
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }
}
