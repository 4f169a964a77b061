//! Places data models
//!
//! - `prediction` - Autocomplete suggestions (Prediction, StructuredFormatting)
//! - `details` - Resolved place records (PlaceDetails, Geometry, LatLng, Viewport)
//! - `state` - Manager state snapshot (PlacesState)
//! - `options` - Caller options (PlacesOptions, LocationBias)

mod details;
mod options;
mod prediction;
mod state;

pub use details::{AddressComponent, Geometry, LatLng, PlaceDetails, Viewport};
pub use options::{Coordinates, LocationBias, PlacesOptions, DEFAULT_DEBOUNCE, DEFAULT_LANGUAGE};
pub use prediction::{Prediction, StructuredFormatting};
pub use state::PlacesState;
