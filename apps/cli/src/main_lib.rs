use std::sync::Arc;

use places_autocomplete::{
    LegacyPlacesClient, LookupSource, PlaceLookup, PlacesManager, PlacesState,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Backend, Config};

pub fn init_tracing() {
    let log_format = std::env::var("PLACES_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout only carries command output.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_manager(config: &Config) -> anyhow::Result<PlacesManager> {
    let options = config.options();
    let source = match config.backend {
        Backend::PlacesApi => LookupSource::ApiKey(config.api_key.clone()),
        Backend::Legacy => {
            let legacy: Arc<dyn PlaceLookup> = Arc::new(LegacyPlacesClient::new(
                config.api_key.clone(),
                options.clone(),
            )?);
            LookupSource::Lookup(legacy)
        }
    };
    Ok(PlacesManager::create(source, config.platform, options)?)
}

/// One line of user input.
#[derive(Debug, PartialEq)]
pub enum Command<'a> {
    Search(&'a str),
    Details(&'a str),
    State,
    Quit,
}

pub fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();
    let (head, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    match head {
        ":quit" | ":q" => Command::Quit,
        ":state" => Command::State,
        ":details" => Command::Details(rest.trim()),
        _ => Command::Search(line),
    }
}

/// One-line summary of a state broadcast.
pub fn render_state(state: &PlacesState) -> String {
    if state.is_loading {
        return "… loading".to_string();
    }
    if let Some(message) = state.error_message() {
        return format!("! {}", message);
    }

    let mut out = format!("{} prediction(s)", state.predictions.len());
    for prediction in &state.predictions {
        out.push_str(&format!(
            "\n  {}  {}",
            prediction.place_id, prediction.description
        ));
    }
    out
}
