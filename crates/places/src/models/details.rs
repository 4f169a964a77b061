//! Place details model.
//!
//! This is the common shape both HTTP strategies translate into. Field names
//! follow the legacy web-service format so the serialized form is what UI
//! code written against the older API already expects.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Recommended viewport for displaying a place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// One component of a structured address (street number, locality, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// The full record for a single resolved place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place_id: String,

    #[serde(default)]
    pub formatted_address: String,

    pub geometry: Geometry,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_components: Option<Vec<AddressComponent>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl PlaceDetails {
    /// Look up the first address component tagged with `kind`
    /// (e.g., "country", "postal_code").
    pub fn component(&self, kind: &str) -> Option<&AddressComponent> {
        self.address_components
            .as_deref()?
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
    }
}
