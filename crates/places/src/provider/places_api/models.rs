//! Request and response shapes of the new Places API (places.googleapis.com/v1).

use serde::{Deserialize, Serialize};

use crate::models::{
    AddressComponent, Coordinates, Geometry, LatLng, LocationBias, PlaceDetails, Prediction,
    StructuredFormatting, Viewport,
};

/// Bias applied when the caller configured none.
pub(super) const DEFAULT_BIAS: LocationBias = LocationBias {
    center: Coordinates {
        latitude: 9.082,
        longitude: 8.6753,
    },
    radius: 50000.0,
};

/// Primary types requested for every autocomplete call.
pub(super) const INCLUDED_PRIMARY_TYPES: &[&str] = &["establishment", "geocode"];

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AutocompleteRequest<'a> {
    pub input: &'a str,
    pub language_code: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub included_region_codes: &'a [String],
    pub location_bias: LocationBiasBody,
    pub included_primary_types: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub(super) struct LocationBiasBody {
    pub circle: LocationBias,
}

// ============================================================================
// Autocomplete response
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub(super) struct AutocompleteResponse {
    #[serde(default)]
    pub suggestions: Option<Vec<Suggestion>>,
}

/// A suggestion is either a place or a query prediction; only place
/// predictions are requested through the field mask.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Suggestion {
    pub place_prediction: Option<PlacePrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PlacePrediction {
    pub place_id: Option<String>,
    pub text: Option<FormattableText>,
    pub structured_format: Option<StructuredFormat>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FormattableText {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StructuredFormat {
    pub main_text: Option<FormattableText>,
    pub secondary_text: Option<FormattableText>,
}

fn text_of(text: Option<FormattableText>) -> String {
    text.map(|t| t.text).unwrap_or_default()
}

impl From<PlacePrediction> for Prediction {
    fn from(p: PlacePrediction) -> Self {
        let (main_text, secondary_text) = match p.structured_format {
            Some(format) => (text_of(format.main_text), text_of(format.secondary_text)),
            None => (String::new(), String::new()),
        };

        Prediction {
            place_id: p.place_id.unwrap_or_default(),
            description: text_of(p.text),
            structured_formatting: StructuredFormatting {
                main_text,
                secondary_text,
            },
            types: p.types,
        }
    }
}

impl AutocompleteResponse {
    pub fn into_predictions(self) -> Vec<Prediction> {
        self.suggestions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| s.place_prediction)
            .map(Prediction::from)
            .collect()
    }
}

// ============================================================================
// Place details response
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PlaceResponse {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub location: Option<ApiLatLng>,
    pub viewport: Option<ApiViewport>,
    pub address_components: Option<Vec<ApiAddressComponent>>,
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LocalizedText {
    #[serde(default)]
    pub text: String,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub(super) struct ApiLatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiViewport {
    pub low: ApiLatLng,
    pub high: ApiLatLng,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiAddressComponent {
    #[serde(default)]
    pub long_text: String,
    #[serde(default)]
    pub short_text: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl PlaceResponse {
    /// Translate into the common model. `requested_id` fills in the id when
    /// the response omits it.
    pub fn into_details(self, requested_id: &str) -> PlaceDetails {
        let location = self.location.unwrap_or_default();

        PlaceDetails {
            place_id: self.id.unwrap_or_else(|| requested_id.to_string()),
            formatted_address: self.formatted_address.unwrap_or_default(),
            geometry: Geometry {
                location: LatLng::new(location.latitude, location.longitude),
                viewport: self.viewport.map(|v| Viewport {
                    north: v.high.latitude,
                    south: v.low.latitude,
                    east: v.high.longitude,
                    west: v.low.longitude,
                }),
            },
            name: self.display_name.map(|n| n.text),
            address_components: self.address_components.map(|components| {
                components
                    .into_iter()
                    .map(|c| AddressComponent {
                        long_name: c.long_text,
                        short_name: c.short_text,
                        types: c.types,
                    })
                    .collect()
            }),
            types: self.types,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error payload: `{"error": {"code": 400, "message": "...", "status": "..."}}`
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocomplete_response_translation() {
        let json = r#"{
            "suggestions": [
                {
                    "placePrediction": {
                        "place": "places/ChIJLU7jZClu5kcR4PcOOO6p3I0",
                        "placeId": "ChIJLU7jZClu5kcR4PcOOO6p3I0",
                        "text": { "text": "Eiffel Tower, Avenue Gustave Eiffel, Paris, France" },
                        "structuredFormat": {
                            "mainText": { "text": "Eiffel Tower" },
                            "secondaryText": { "text": "Avenue Gustave Eiffel, Paris, France" }
                        },
                        "types": ["tourist_attraction", "point_of_interest"]
                    }
                },
                { "queryPrediction": { "text": { "text": "eiffel tower tickets" } } }
            ]
        }"#;

        let response: AutocompleteResponse = serde_json::from_str(json).unwrap();
        let predictions = response.into_predictions();

        assert_eq!(predictions.len(), 1);
        let p = &predictions[0];
        assert_eq!(p.place_id, "ChIJLU7jZClu5kcR4PcOOO6p3I0");
        assert_eq!(p.structured_formatting.main_text, "Eiffel Tower");
        assert_eq!(
            p.structured_formatting.secondary_text,
            "Avenue Gustave Eiffel, Paris, France"
        );
        assert_eq!(p.types[0], "tourist_attraction");
    }

    #[test]
    fn test_missing_suggestions_is_empty() {
        let response: AutocompleteResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_predictions().is_empty());
    }

    #[test]
    fn test_sparse_prediction_defaults_to_empty_strings() {
        let json = r#"{ "suggestions": [ { "placePrediction": {} } ] }"#;
        let response: AutocompleteResponse = serde_json::from_str(json).unwrap();
        let predictions = response.into_predictions();

        assert_eq!(predictions[0].place_id, "");
        assert_eq!(predictions[0].description, "");
        assert_eq!(predictions[0].structured_formatting.main_text, "");
        assert!(predictions[0].types.is_empty());
    }

    #[test]
    fn test_place_response_translation() {
        let json = r#"{
            "id": "ChIJLU7jZClu5kcR4PcOOO6p3I0",
            "displayName": { "text": "Eiffel Tower", "languageCode": "en" },
            "formattedAddress": "Av. Gustave Eiffel, 75007 Paris, France",
            "location": { "latitude": 48.8583701, "longitude": 2.2944813 },
            "viewport": {
                "low": { "latitude": 48.8569, "longitude": 2.2931 },
                "high": { "latitude": 48.8597, "longitude": 2.2958 }
            },
            "addressComponents": [
                { "longText": "France", "shortText": "FR", "types": ["country", "political"], "languageCode": "en" }
            ],
            "types": ["tourist_attraction"]
        }"#;

        let response: PlaceResponse = serde_json::from_str(json).unwrap();
        let details = response.into_details("ignored");

        assert_eq!(details.place_id, "ChIJLU7jZClu5kcR4PcOOO6p3I0");
        assert_eq!(details.name.as_deref(), Some("Eiffel Tower"));
        assert_eq!(details.geometry.location, LatLng::new(48.8583701, 2.2944813));

        let viewport = details.geometry.viewport.unwrap();
        assert_eq!(viewport.north, 48.8597);
        assert_eq!(viewport.south, 48.8569);
        assert_eq!(viewport.east, 2.2958);
        assert_eq!(viewport.west, 2.2931);

        assert_eq!(details.component("country").unwrap().short_name, "FR");
        assert_eq!(details.types, Some(vec!["tourist_attraction".to_string()]));
    }

    #[test]
    fn test_place_response_without_id_uses_requested() {
        let response: PlaceResponse =
            serde_json::from_str(r#"{ "formattedAddress": "Lagos, Nigeria" }"#).unwrap();
        let details = response.into_details("p9");

        assert_eq!(details.place_id, "p9");
        assert_eq!(details.formatted_address, "Lagos, Nigeria");
        assert!(details.geometry.viewport.is_none());
        assert!(details.name.is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let regions = vec!["ng".to_string()];
        let body = AutocompleteRequest {
            input: "lekki",
            language_code: "en",
            included_region_codes: &regions,
            location_bias: LocationBiasBody { circle: DEFAULT_BIAS },
            included_primary_types: INCLUDED_PRIMARY_TYPES,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["input"], "lekki");
        assert_eq!(value["languageCode"], "en");
        assert_eq!(value["includedRegionCodes"], serde_json::json!(["ng"]));
        assert_eq!(value["locationBias"]["circle"]["center"]["latitude"], 9.082);
        assert_eq!(value["locationBias"]["circle"]["radius"], 50000.0);
        assert_eq!(
            value["includedPrimaryTypes"],
            serde_json::json!(["establishment", "geocode"])
        );
    }

    #[test]
    fn test_request_body_omits_empty_regions() {
        let body = AutocompleteRequest {
            input: "x",
            language_code: "en",
            included_region_codes: &[],
            location_bias: LocationBiasBody { circle: DEFAULT_BIAS },
            included_primary_types: INCLUDED_PRIMARY_TYPES,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("includedRegionCodes").is_none());
    }

    #[test]
    fn test_error_response_parsing() {
        let json = r#"{ "error": { "code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED" } }"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.error.and_then(|e| e.message).as_deref(),
            Some("API key not valid.")
        );
    }
}
