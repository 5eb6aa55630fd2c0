//! Storefront services: thin CRUD over the authorized-call capability.
//!
//! Each service builds plain [`laced_domain::ApiRequest`] values, hands
//! them to the retry coordinator and decodes the answer. Token handling
//! and refresh-on-expiry are entirely the coordinator's business.

mod cart;
mod catalog;
mod favorites;
mod profile;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use favorites::FavoritesService;
pub use profile::ProfileService;

use laced_domain::ApiResponse;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Maps a non-success status to [`ApiError::Status`].
pub(crate) fn into_result(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status(),
            message: response
                .server_message()
                .unwrap_or_else(|| "request failed".to_string()),
        })
    }
}

/// Decodes a JSON body, mapping decode failures to
/// [`ApiError::Serialization`].
pub(crate) fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
    response
        .json()
        .map_err(|err| ApiError::Serialization(err.to_string()))
}
