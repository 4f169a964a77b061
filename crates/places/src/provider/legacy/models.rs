//! Response shapes of the legacy Places web service (maps/api/place/*/json).

use serde::Deserialize;

use crate::models::{AddressComponent, Geometry, LatLng, PlaceDetails, Prediction, Viewport};

pub(super) const STATUS_OK: &str = "OK";
pub(super) const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Autocomplete response. Predictions already match the crate model.
#[derive(Debug, Deserialize)]
pub(super) struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub status: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DetailsResponse {
    pub result: Option<LegacyPlace>,
    #[serde(default)]
    pub status: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LegacyPlace {
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<LegacyGeometry>,
    pub name: Option<String>,
    pub address_components: Option<Vec<AddressComponent>>,
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LegacyGeometry {
    pub location: LatLng,
    pub viewport: Option<LegacyViewport>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LegacyViewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

/// Payload returned with a non-success HTTP status.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub error_message: Option<String>,
}

/// Outcome of checking a body's `status` field.
#[derive(Debug, PartialEq)]
pub(super) enum StatusCheck {
    Ok,
    ZeroResults,
    Failed { status: String, message: String },
}

/// Classify a legacy `status`. A missing status is treated as OK.
pub(super) fn check_status(status: Option<&str>, error_message: Option<&str>) -> StatusCheck {
    match status {
        None | Some(STATUS_OK) => StatusCheck::Ok,
        Some(STATUS_ZERO_RESULTS) => StatusCheck::ZeroResults,
        Some(other) => StatusCheck::Failed {
            status: other.to_string(),
            message: error_message.unwrap_or(other).to_string(),
        },
    }
}

impl LegacyPlace {
    pub fn into_details(self, requested_id: &str) -> PlaceDetails {
        let (location, viewport) = match self.geometry {
            Some(geometry) => (
                geometry.location,
                geometry.viewport.map(|v| Viewport {
                    north: v.northeast.lat,
                    south: v.southwest.lat,
                    east: v.northeast.lng,
                    west: v.southwest.lng,
                }),
            ),
            None => (LatLng::default(), None),
        };

        PlaceDetails {
            place_id: self.place_id.unwrap_or_else(|| requested_id.to_string()),
            formatted_address: self.formatted_address.unwrap_or_default(),
            geometry: Geometry { location, viewport },
            name: self.name,
            address_components: self.address_components,
            types: self.types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocomplete_response_parsing() {
        let json = r#"{
            "predictions": [
                {
                    "description": "Eiffel Tower, Avenue Gustave Eiffel, Paris, France",
                    "matched_substrings": [{ "length": 6, "offset": 0 }],
                    "place_id": "ChIJLU7jZClu5kcR4PcOOO6p3I0",
                    "reference": "ChIJLU7jZClu5kcR4PcOOO6p3I0",
                    "structured_formatting": {
                        "main_text": "Eiffel Tower",
                        "main_text_matched_substrings": [{ "length": 6, "offset": 0 }],
                        "secondary_text": "Avenue Gustave Eiffel, Paris, France"
                    },
                    "terms": [],
                    "types": ["tourist_attraction", "point_of_interest", "establishment"]
                }
            ],
            "status": "OK"
        }"#;

        let response: AutocompleteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predictions.len(), 1);
        assert_eq!(response.predictions[0].structured_formatting.main_text, "Eiffel Tower");
        assert_eq!(response.predictions[0].types.len(), 3);
        assert_eq!(
            check_status(response.status.as_deref(), None),
            StatusCheck::Ok
        );
    }

    #[test]
    fn test_check_status() {
        assert_eq!(check_status(Some("ZERO_RESULTS"), None), StatusCheck::ZeroResults);
        assert_eq!(check_status(None, None), StatusCheck::Ok);
        assert_eq!(
            check_status(
                Some("REQUEST_DENIED"),
                Some("The provided API key is invalid.")
            ),
            StatusCheck::Failed {
                status: "REQUEST_DENIED".to_string(),
                message: "The provided API key is invalid.".to_string(),
            }
        );
        assert_eq!(
            check_status(Some("OVER_QUERY_LIMIT"), None),
            StatusCheck::Failed {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: "OVER_QUERY_LIMIT".to_string(),
            }
        );
    }

    #[test]
    fn test_details_translation() {
        let json = r#"{
            "result": {
                "formatted_address": "Av. Gustave Eiffel, 75007 Paris, France",
                "geometry": {
                    "location": { "lat": 48.8583701, "lng": 2.2944813 },
                    "viewport": {
                        "northeast": { "lat": 48.8597, "lng": 2.2958 },
                        "southwest": { "lat": 48.8569, "lng": 2.2931 }
                    }
                },
                "name": "Eiffel Tower",
                "place_id": "ChIJLU7jZClu5kcR4PcOOO6p3I0",
                "address_components": [
                    { "long_name": "Paris", "short_name": "Paris", "types": ["locality", "political"] }
                ]
            },
            "status": "OK"
        }"#;

        let response: DetailsResponse = serde_json::from_str(json).unwrap();
        let details = response.result.unwrap().into_details("ignored");

        assert_eq!(details.place_id, "ChIJLU7jZClu5kcR4PcOOO6p3I0");
        assert_eq!(details.geometry.location.lat, 48.8583701);
        let viewport = details.geometry.viewport.unwrap();
        assert_eq!(viewport.north, 48.8597);
        assert_eq!(viewport.west, 2.2931);
        assert_eq!(details.component("locality").unwrap().long_name, "Paris");
        assert!(details.types.is_none());
    }

    #[test]
    fn test_details_without_geometry() {
        let json = r#"{ "result": { "formatted_address": "Somewhere" }, "status": "OK" }"#;
        let response: DetailsResponse = serde_json::from_str(json).unwrap();
        let details = response.result.unwrap().into_details("p2");

        assert_eq!(details.place_id, "p2");
        assert_eq!(details.geometry.location, LatLng::default());
        assert!(details.geometry.viewport.is_none());
    }

    #[test]
    fn test_not_found_body() {
        let json = r#"{ "html_attributions": [], "status": "NOT_FOUND" }"#;
        let response: DetailsResponse = serde_json::from_str(json).unwrap();
        assert!(response.result.is_none());
        assert!(matches!(
            check_status(response.status.as_deref(), response.error_message.as_deref()),
            StatusCheck::Failed { .. }
        ));
    }
}
