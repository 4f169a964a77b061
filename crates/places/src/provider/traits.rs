//! Lookup port trait definition.

use async_trait::async_trait;

use crate::errors::PlacesError;
use crate::models::{PlaceDetails, Prediction};

/// The fetch capability a [`PlacesManager`](crate::PlacesManager) delegates to.
///
/// Implement this trait to plug in a different backend, or a stub in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use places_autocomplete::{PlaceDetails, PlaceLookup, PlacesError, Prediction};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl PlaceLookup for Fixed {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_predictions(&self, input: &str) -> Result<Vec<Prediction>, PlacesError> {
///         Ok(vec![Prediction::new("p1", input)])
///     }
///
///     async fn fetch_place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
///         Ok(PlaceDetails { place_id: place_id.to_string(), ..Default::default() })
///     }
/// }
/// ```
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Identifier used in log output, e.g. "PLACES_API".
    fn id(&self) -> &'static str;

    /// Fetch autocomplete predictions for a partial query.
    ///
    /// An empty list is a valid answer. Errors carry a human readable
    /// message and are never retried by the caller.
    async fn fetch_predictions(&self, input: &str) -> Result<Vec<Prediction>, PlacesError>;

    /// Fetch the full record for one place.
    async fn fetch_place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}
