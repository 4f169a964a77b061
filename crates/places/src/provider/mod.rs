//! Lookup port and its concrete strategies.
//!
//! This module contains:
//! - The `PlaceLookup` trait the manager delegates all fetching to
//! - `Platform` / `LookupSource` resolution of construction inputs
//! - HTTP strategies for the new Places API and the legacy web service
//!
//! Strategies own their translation from Google's response shapes into the
//! crate's [`Prediction`](crate::models::Prediction) and
//! [`PlaceDetails`](crate::models::PlaceDetails) models.

mod platform;
mod traits;

pub mod legacy;
pub mod places_api;

use std::time::Duration;

use reqwest::Client;

use crate::errors::PlacesError;

pub use platform::{resolve_lookup, LookupSource, Platform};
pub use traits::PlaceLookup;

/// Default HTTP request timeout. Lookup strategies own timeout policy; the
/// manager never times out a fetch itself.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const PREDICTIONS_CONTEXT: &str = "Failed to fetch predictions";
pub(crate) const DETAILS_CONTEXT: &str = "Failed to fetch place details";

pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

pub(crate) fn require_api_key(api_key: String) -> Result<String, PlacesError> {
    if api_key.trim().is_empty() {
        return Err(PlacesError::MissingApiKey);
    }
    Ok(api_key)
}
