//! Places Autocomplete Crate
//!
//! A client for Google Places autocomplete and place details, fronted by a
//! small reactive state manager.
//!
//! # Overview
//!
//! - Input debouncing: only the last search text within the quiet period is
//!   fetched
//! - Subscriber broadcast of consistent state snapshots
//! - Pluggable lookup strategies: the new Places API, the legacy web
//!   service, or any caller-supplied [`PlaceLookup`]
//!
//! # Architecture
//!
//! ```text
//! update_search_input(text)
//!          |
//!          v
//! +------------------+
//! |    Debouncer     |  (one pending timer, cancellable)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |  PlacesManager   | --> |   PlaceLookup    |  (PlacesApi, Legacy, custom)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |   Subscribers    |  (PlacesState snapshots)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`PlacesManager`] - Owns state, debounce and subscribers
//! - [`PlacesState`] - Predictions, loading flag and last error
//! - [`Prediction`] / [`PlaceDetails`] - Google data in one common shape
//! - [`PlacesOptions`] - Debounce delay, region restrictions, bias, language
//! - [`PlacesError`] - Every failure, construction or fetch

pub mod debounce;
pub mod errors;
pub mod manager;
pub mod models;
pub mod provider;

pub use debounce::Debouncer;
pub use errors::PlacesError;
pub use manager::{PlacesManager, Subscription};
pub use models::{
    AddressComponent, Coordinates, Geometry, LatLng, LocationBias, PlaceDetails, PlacesOptions,
    PlacesState, Prediction, StructuredFormatting, Viewport, DEFAULT_DEBOUNCE, DEFAULT_LANGUAGE,
};
pub use provider::legacy::LegacyPlacesClient;
pub use provider::places_api::PlacesApiClient;
pub use provider::{resolve_lookup, LookupSource, PlaceLookup, Platform};
