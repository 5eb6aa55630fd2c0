//! Cart operations.

use laced_domain::{AddToCart, ApiRequest, Cart};
use uuid::Uuid;

use crate::auth::RetryCoordinator;
use crate::error::ApiError;
use crate::routes;
use crate::services::{decode, into_result};

/// The authenticated user's cart.
#[derive(Debug, Clone)]
pub struct CartService {
    calls: RetryCoordinator,
}

impl CartService {
    pub(crate) const fn new(calls: RetryCoordinator) -> Self {
        Self { calls }
    }

    /// Fetches the current cart.
    ///
    /// # Errors
    ///
    /// [`ApiError`] on transport, authorization or decode failure.
    pub async fn view(&self) -> Result<Cart, ApiError> {
        let request = ApiRequest::get(routes::cart::ROOT);
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }

    /// Adds a line to the cart and returns the updated cart.
    ///
    /// # Errors
    ///
    /// [`ApiError::Domain`] when the line fails validation before going
    /// out; the usual call failures otherwise.
    pub async fn add(&self, line: &AddToCart) -> Result<Cart, ApiError> {
        line.validate()?;
        let request = ApiRequest::post(routes::cart::ITEMS).with_json(line)?;
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }

    /// Removes a line and returns the updated cart.
    ///
    /// # Errors
    ///
    /// [`ApiError`] on transport, authorization or decode failure.
    pub async fn remove(&self, line_id: Uuid) -> Result<Cart, ApiError> {
        let request = ApiRequest::delete(routes::cart::item(line_id));
        let response = into_result(self.calls.execute(request).await?)?;
        decode(&response)
    }
}
