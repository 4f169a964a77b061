//! Caller options for a places manager and its lookup strategy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default quiet period before a prediction fetch is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Language sent to Google when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

/// Latitude/longitude as the new Places API spells them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Circle that biases predictions towards an area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationBias {
    pub center: Coordinates,
    /// Radius in meters
    pub radius: f64,
}

impl LocationBias {
    pub fn circle(latitude: f64, longitude: f64, radius: f64) -> Self {
        Self {
            center: Coordinates {
                latitude,
                longitude,
            },
            radius,
        }
    }
}

/// Options accepted at construction.
///
/// Deserializes from the camelCase options record used by JavaScript
/// callers; unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacesOptions {
    /// Debounce delay in milliseconds
    #[serde(rename = "debounceTime", default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Region codes predictions are restricted to (e.g., "fr", "ng")
    #[serde(default)]
    pub country_restrictions: Vec<String>,

    #[serde(default)]
    pub location_bias: Option<LocationBias>,

    #[serde(default)]
    pub language_code: Option<String>,

    /// Emit informational diagnostics (errors are always logged)
    #[serde(default)]
    pub enable_logging: bool,
}

impl Default for PlacesOptions {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            country_restrictions: Vec::new(),
            location_bias: None,
            language_code: None,
            enable_logging: false,
        }
    }
}

impl PlacesOptions {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Language to send, falling back to [`DEFAULT_LANGUAGE`].
    pub fn language(&self) -> &str {
        self.language_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_country_restrictions<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.country_restrictions = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location_bias(mut self, bias: LocationBias) -> Self {
        self.location_bias = Some(bias);
        self
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language_code = Some(code.into());
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PlacesOptions::default();
        assert_eq!(options.debounce(), Duration::from_millis(300));
        assert_eq!(options.language(), "en");
        assert!(options.country_restrictions.is_empty());
        assert!(!options.enable_logging);
    }

    #[test]
    fn test_parse_options_record() {
        let json = r#"{
            "debounceTime": 150,
            "countryRestrictions": ["ng", "gh"],
            "locationBias": { "center": { "latitude": 6.5244, "longitude": 3.3792 }, "radius": 20000 },
            "languageCode": "fr",
            "enableLogging": true
        }"#;

        let options: PlacesOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.debounce(), Duration::from_millis(150));
        assert_eq!(options.country_restrictions, vec!["ng", "gh"]);
        assert_eq!(
            options.location_bias,
            Some(LocationBias::circle(6.5244, 3.3792, 20000.0))
        );
        assert_eq!(options.language(), "fr");
        assert!(options.enable_logging);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{ "debounceTime": 500, "theme": "dark", "retries": 3 }"#;
        let options: PlacesOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.debounce_ms, 500);
        assert_eq!(options.language_code, None);
    }

    #[test]
    fn test_empty_record_uses_defaults() {
        let options: PlacesOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, PlacesOptions::default());
    }

    #[test]
    fn test_blank_language_falls_back() {
        let options = PlacesOptions::default().with_language("  ");
        assert_eq!(options.language(), "en");
    }
}
