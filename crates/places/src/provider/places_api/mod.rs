//! New Places API strategy (places.googleapis.com/v1).
//!
//! - Predictions via `POST /v1/places:autocomplete`
//! - Details via `GET /v1/places/{place_id}`
//!
//! The API key travels in the `X-Goog-Api-Key` header and every call names
//! the fields it wants through `X-Goog-FieldMask`.
//! API documentation: https://developers.google.com/maps/documentation/places/web-service/op-overview

mod models;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info};

use crate::errors::PlacesError;
use crate::models::{PlaceDetails, PlacesOptions, Prediction};
use crate::provider::{
    http_client, require_api_key, PlaceLookup, DETAILS_CONTEXT, PREDICTIONS_CONTEXT,
};

use models::{
    AutocompleteRequest, AutocompleteResponse, ErrorResponse, LocationBiasBody, PlaceResponse,
    DEFAULT_BIAS, INCLUDED_PRIMARY_TYPES,
};

const BASE_URL: &str = "https://places.googleapis.com/v1";
const PROVIDER_ID: &str = "PLACES_API";

const AUTOCOMPLETE_FIELD_MASK: &str = "suggestions.placePrediction";
const DETAILS_FIELD_MASK: &str =
    "id,displayName,formattedAddress,location,viewport,addressComponents,types";

/// Lookup backed by the new Places API. Default strategy for native targets.
pub struct PlacesApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    options: PlacesOptions,
}

impl PlacesApiClient {
    /// Create a client. Fails with [`PlacesError::MissingApiKey`] on a blank key.
    pub fn new(api_key: impl Into<String>, options: PlacesOptions) -> Result<Self, PlacesError> {
        let api_key = require_api_key(api_key.into())?;

        Ok(Self {
            client: http_client(),
            api_key,
            base_url: BASE_URL.to_string(),
            options,
        })
    }

    /// Point the client at a different host (proxy, emulator).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn log(&self, message: &str) {
        if self.options.enable_logging {
            info!("[{}] {}", PROVIDER_ID, message);
        }
    }

    fn autocomplete_url(&self) -> String {
        format!("{}/places:autocomplete", self.base_url)
    }

    fn details_url(&self, place_id: &str) -> String {
        format!("{}/places/{}", self.base_url, urlencoding::encode(place_id))
    }

    fn autocomplete_body<'a>(&'a self, input: &'a str) -> AutocompleteRequest<'a> {
        AutocompleteRequest {
            input,
            language_code: self.options.language(),
            included_region_codes: &self.options.country_restrictions,
            location_bias: LocationBiasBody {
                circle: self.options.location_bias.unwrap_or(DEFAULT_BIAS),
            },
            included_primary_types: INCLUDED_PRIMARY_TYPES,
        }
    }

    fn authorized(&self, request: RequestBuilder, field_mask: &str) -> RequestBuilder {
        request
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", field_mask)
    }

    /// Send a request and return the body text of a successful response.
    async fn send(&self, request: RequestBuilder, context: &str) -> Result<String, PlacesError> {
        let response = request
            .send()
            .await
            .map_err(|e| PlacesError::request(context, e))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response, context).await);
        }

        response
            .text()
            .await
            .map_err(|e| PlacesError::request(context, e))
    }

    /// Build an error from a non-success response, preferring the message in
    /// the error payload over the HTTP status text.
    async fn api_error(response: Response, context: &str) -> PlacesError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|r| r.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string())
            });

        debug!("{} API error {}: {}", PROVIDER_ID, status, body);
        PlacesError::api(context, status.as_u16().to_string(), &message)
    }
}

#[async_trait]
impl PlaceLookup for PlacesApiClient {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_predictions(&self, input: &str) -> Result<Vec<Prediction>, PlacesError> {
        self.log(&format!("Fetching predictions for: {}", input));

        let request = self
            .authorized(self.client.post(self.autocomplete_url()), AUTOCOMPLETE_FIELD_MASK)
            .json(&self.autocomplete_body(input));

        let text = self.send(request, PREDICTIONS_CONTEXT).await?;
        let response: AutocompleteResponse = serde_json::from_str(&text)
            .map_err(|e| PlacesError::invalid_response(PREDICTIONS_CONTEXT, e))?;

        let predictions = response.into_predictions();
        if predictions.is_empty() {
            self.log("No suggestions found");
        }
        Ok(predictions)
    }

    async fn fetch_place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.log(&format!("Fetching place details for: {}", place_id));

        let request = self
            .authorized(self.client.get(self.details_url(place_id)), DETAILS_FIELD_MASK)
            .query(&[("languageCode", self.options.language())]);

        let text = self.send(request, DETAILS_CONTEXT).await?;
        let response: PlaceResponse = serde_json::from_str(&text)
            .map_err(|e| PlacesError::invalid_response(DETAILS_CONTEXT, e))?;

        Ok(response.into_details(place_id))
    }
}
