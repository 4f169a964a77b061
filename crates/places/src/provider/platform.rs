//! Platform selection and lookup resolution.
//!
//! Construction inputs (an API key or a ready-made lookup, plus an optional
//! platform hint) are resolved exactly once into a concrete
//! [`PlaceLookup`]. Nothing inspects the environment after that.

use std::fmt;
use std::sync::Arc;

use crate::errors::PlacesError;
use crate::models::PlacesOptions;

use super::places_api::PlacesApiClient;
use super::PlaceLookup;

/// Delivery platform a manager is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Browser host with the Maps JavaScript SDK.
    Web,
    /// Any other host; talks to Google over HTTP.
    Native,
}

impl Platform {
    /// Platform implied by the compile target.
    pub const fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else {
            Platform::Native
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Native => "native",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = PlacesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Platform::Web),
            "native" => Ok(Platform::Native),
            other => Err(PlacesError::UnsupportedPlatform {
                platform: other.to_string(),
            }),
        }
    }
}

/// What a manager is built from.
#[derive(Clone)]
pub enum LookupSource {
    /// Build the platform's default strategy with this key.
    ApiKey(String),
    /// Use a caller-supplied lookup as-is.
    Lookup(Arc<dyn PlaceLookup>),
}

impl fmt::Debug for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupSource::ApiKey(_) => f.write_str("ApiKey(..)"),
            LookupSource::Lookup(lookup) => write!(f, "Lookup({})", lookup.id()),
        }
    }
}

impl From<String> for LookupSource {
    fn from(api_key: String) -> Self {
        LookupSource::ApiKey(api_key)
    }
}

impl From<&str> for LookupSource {
    fn from(api_key: &str) -> Self {
        LookupSource::ApiKey(api_key.to_string())
    }
}

impl From<Arc<dyn PlaceLookup>> for LookupSource {
    fn from(lookup: Arc<dyn PlaceLookup>) -> Self {
        LookupSource::Lookup(lookup)
    }
}

/// Resolve construction inputs into a lookup.
///
/// A caller-supplied lookup wins regardless of platform. With an API key,
/// `Native` builds a [`PlacesApiClient`]; `Web` needs the Maps JavaScript SDK
/// and fails with [`PlacesError::UnsupportedPlatform`] in native builds.
pub fn resolve_lookup(
    source: LookupSource,
    platform: Option<Platform>,
    options: &PlacesOptions,
) -> Result<Arc<dyn PlaceLookup>, PlacesError> {
    match source {
        LookupSource::Lookup(lookup) => Ok(lookup),
        LookupSource::ApiKey(api_key) => {
            if api_key.trim().is_empty() {
                return Err(PlacesError::MissingApiKey);
            }

            match platform.unwrap_or_else(Platform::detect) {
                Platform::Native => Ok(Arc::new(PlacesApiClient::new(api_key, options.clone())?)),
                Platform::Web => Err(PlacesError::UnsupportedPlatform {
                    platform: Platform::Web.to_string(),
                }),
            }
        }
    }
}
