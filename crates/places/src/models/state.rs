//! Manager state snapshot.

use serde::Serialize;

use super::Prediction;
use crate::errors::PlacesError;

/// State broadcast by the manager.
///
/// Every value handed out (to subscribers or from `get_state`) is an owned
/// copy; changing it never affects the manager.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacesState {
    pub predictions: Vec<Prediction>,

    /// True exactly while a debounced prediction fetch is in flight.
    pub is_loading: bool,

    /// Error from the most recent failed operation.
    pub error: Option<PlacesError>,
}

impl PlacesState {
    /// Message of the current error, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Serialized form used when state is handed to a UI layer. The error is
/// flattened to its message.
impl Serialize for PlacesState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("PlacesState", 3)?;
        s.serialize_field("predictions", &self.predictions)?;
        s.serialize_field("isLoading", &self.is_loading)?;
        s.serialize_field("error", &self.error_message())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state = PlacesState::default();
        assert!(state.predictions.is_empty());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_serialize_flattens_error() {
        let state = PlacesState {
            predictions: vec![],
            is_loading: false,
            error: Some(PlacesError::Request {
                message: "Failed to fetch predictions: timeout".to_string(),
            }),
        };

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["isLoading"], false);
        assert_eq!(value["error"], "Failed to fetch predictions: timeout");
        assert_eq!(value["predictions"], serde_json::json!([]));
    }
}
