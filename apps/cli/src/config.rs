use std::time::Duration;

use anyhow::{bail, Context};
use places_autocomplete::{Platform, PlacesOptions, DEFAULT_DEBOUNCE};

/// Which HTTP strategy the CLI talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    PlacesApi,
    Legacy,
}

pub struct Config {
    pub api_key: String,
    pub backend: Backend,
    /// `None` lets the library pick from the compile target.
    pub platform: Option<Platform>,
    pub debounce: Duration,
    pub countries: Vec<String>,
    pub language: Option<String>,
    pub enable_logging: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = var("PLACES_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .context("PLACES_API_KEY must be set")?;

        let backend = match var("PLACES_BACKEND")
            .unwrap_or_else(|| "places".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "places" => Backend::PlacesApi,
            "legacy" => Backend::Legacy,
            other => bail!("Invalid PLACES_BACKEND: {}", other),
        };

        let platform = var("PLACES_PLATFORM")
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.parse::<Platform>())
            .transpose()
            .context("Invalid PLACES_PLATFORM")?;

        let debounce = match var("PLACES_DEBOUNCE_MS") {
            Some(ms) => Duration::from_millis(
                ms.trim()
                    .parse()
                    .with_context(|| format!("Invalid PLACES_DEBOUNCE_MS: {}", ms))?,
            ),
            None => DEFAULT_DEBOUNCE,
        };

        let countries = var("PLACES_COUNTRIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let enable_logging = var("PLACES_ENABLE_LOGGING")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            api_key,
            backend,
            platform,
            debounce,
            countries,
            language: var("PLACES_LANGUAGE").filter(|l| !l.trim().is_empty()),
            enable_logging,
        })
    }

    pub fn options(&self) -> PlacesOptions {
        let mut options = PlacesOptions::default()
            .with_debounce(self.debounce)
            .with_country_restrictions(self.countries.iter().cloned())
            .with_logging(self.enable_logging);
        if let Some(language) = &self.language {
            options = options.with_language(language.clone());
        }
        options
    }
}
