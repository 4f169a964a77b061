//! Legacy Places web service strategy.
//!
//! - Predictions via `GET /maps/api/place/autocomplete/json`
//! - Details via `GET /maps/api/place/details/json`
//!
//! These endpoints answer HTTP 200 for most API failures and report them in
//! the body's `status` field, so both the HTTP status and `status` are checked.

mod models;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::errors::PlacesError;
use crate::models::{PlaceDetails, PlacesOptions, Prediction};
use crate::provider::{
    http_client, require_api_key, PlaceLookup, DETAILS_CONTEXT, PREDICTIONS_CONTEXT,
};

use models::{check_status, AutocompleteResponse, DetailsResponse, ErrorResponse, StatusCheck};

const BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const PROVIDER_ID: &str = "PLACES_LEGACY";

const DETAILS_FIELDS: &str = "place_id,name,formatted_address,geometry,address_components,types";

/// Lookup backed by the legacy JSON web service.
pub struct LegacyPlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    options: PlacesOptions,
}

impl LegacyPlacesClient {
    pub fn new(api_key: impl Into<String>, options: PlacesOptions) -> Result<Self, PlacesError> {
        let api_key = require_api_key(api_key.into())?;

        Ok(Self {
            client: http_client(),
            api_key,
            base_url: BASE_URL.to_string(),
            options,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn log(&self, message: &str) {
        if self.options.enable_logging {
            info!("[{}] {}", PROVIDER_ID, message);
        }
    }

    /// Query parameters for an autocomplete call, excluding the key.
    fn autocomplete_params(&self, input: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("input", input.to_string()),
            ("language", self.options.language().to_string()),
        ];

        if !self.options.country_restrictions.is_empty() {
            let components = self
                .options
                .country_restrictions
                .iter()
                .map(|code| format!("country:{}", code.to_lowercase()))
                .collect::<Vec<_>>()
                .join("|");
            params.push(("components", components));
        }

        if let Some(bias) = &self.options.location_bias {
            params.push((
                "location",
                format!("{},{}", bias.center.latitude, bias.center.longitude),
            ));
            params.push(("radius", bias.radius.to_string()));
        }

        params
    }

    fn details_params(&self, place_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("place_id", place_id.to_string()),
            ("fields", DETAILS_FIELDS.to_string()),
            ("language", self.options.language().to_string()),
        ]
    }

    /// GET an endpoint and return the body of a successful response.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
        context: &str,
    ) -> Result<String, PlacesError> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        debug!("{} request: {} with {} params", PROVIDER_ID, endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| PlacesError::request(context, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::request(context, e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|r| r.error_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or_else(|| status.to_string())
                });
            return Err(PlacesError::api(context, status.as_u16().to_string(), &message));
        }

        Ok(body)
    }
}

#[async_trait]
impl PlaceLookup for LegacyPlacesClient {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_predictions(&self, input: &str) -> Result<Vec<Prediction>, PlacesError> {
        self.log(&format!("Fetching predictions for: {}", input));

        let params = self.autocomplete_params(input);
        let body = self.fetch("autocomplete", &params, PREDICTIONS_CONTEXT).await?;
        let response: AutocompleteResponse = serde_json::from_str(&body)
            .map_err(|e| PlacesError::invalid_response(PREDICTIONS_CONTEXT, e))?;

        match check_status(response.status.as_deref(), response.error_message.as_deref()) {
            StatusCheck::Ok => Ok(response.predictions),
            StatusCheck::ZeroResults => {
                self.log("No suggestions found");
                Ok(Vec::new())
            }
            StatusCheck::Failed { status, message } => {
                Err(PlacesError::api(PREDICTIONS_CONTEXT, status, &message))
            }
        }
    }

    async fn fetch_place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.log(&format!("Fetching place details for: {}", place_id));

        let params = self.details_params(place_id);
        let body = self.fetch("details", &params, DETAILS_CONTEXT).await?;
        let response: DetailsResponse = serde_json::from_str(&body)
            .map_err(|e| PlacesError::invalid_response(DETAILS_CONTEXT, e))?;

        match check_status(response.status.as_deref(), response.error_message.as_deref()) {
            StatusCheck::Ok => response
                .result
                .map(|place| place.into_details(place_id))
                .ok_or_else(|| PlacesError::api(DETAILS_CONTEXT, "NOT_FOUND", "NOT_FOUND")),
            StatusCheck::ZeroResults => {
                Err(PlacesError::api(DETAILS_CONTEXT, "ZERO_RESULTS", "ZERO_RESULTS"))
            }
            StatusCheck::Failed { status, message } => {
                Err(PlacesError::api(DETAILS_CONTEXT, status, &message))
            }
        }
    }
}
