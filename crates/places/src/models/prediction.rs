//! Autocomplete prediction model.

use serde::{Deserialize, Serialize};

/// Main/secondary split of a prediction's description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredFormatting {
    /// Primary text, usually the place name (e.g., "Eiffel Tower")
    #[serde(default)]
    pub main_text: String,

    /// Secondary text, usually the locality (e.g., "Paris, France")
    #[serde(default)]
    pub secondary_text: String,
}

/// A single autocomplete suggestion for a partial query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub place_id: String,

    /// Full human readable text of the suggestion
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub structured_formatting: StructuredFormatting,

    /// Category tags (e.g., "tourist_attraction", "locality")
    #[serde(default)]
    pub types: Vec<String>,
}

impl Prediction {
    /// Create a prediction with the given id and description.
    pub fn new(place_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Set the main and secondary text.
    pub fn with_formatting(
        mut self,
        main_text: impl Into<String>,
        secondary_text: impl Into<String>,
    ) -> Self {
        self.structured_formatting = StructuredFormatting {
            main_text: main_text.into(),
            secondary_text: secondary_text.into(),
        };
        self
    }

    /// Set the category tags.
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let prediction = Prediction::new("p1", "Eiffel Tower")
            .with_formatting("Eiffel Tower", "Paris, France")
            .with_types(["tourist_attraction"]);

        assert_eq!(prediction.place_id, "p1");
        assert_eq!(prediction.structured_formatting.secondary_text, "Paris, France");
        assert_eq!(prediction.types, vec!["tourist_attraction".to_string()]);
    }

    #[test]
    fn test_missing_secondary_text_defaults_to_empty() {
        let json = r#"{
            "place_id": "ChIJ123",
            "description": "Lagos",
            "structured_formatting": { "main_text": "Lagos" },
            "types": ["locality", "political"]
        }"#;

        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.structured_formatting.main_text, "Lagos");
        assert_eq!(prediction.structured_formatting.secondary_text, "");
        assert_eq!(prediction.types.len(), 2);
    }
}
