/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog layer and the UI layer.
use serde::Deserialize;

/// A saved plant photo and everything we know about it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlantImage {
    /// Path or URI of the stored photo. Unique key for selection and deletion.
    pub uri: String,
    /// Display label
    pub name: String,
    pub species: String,
    pub description: Option<String>,
    /// Free-form watering advice (e.g. "Average")
    pub watering: Option<String>,
    /// Watering interval amount, paired with `watering_unit` (e.g. "7" "days")
    pub watering_value: Option<String>,
    pub watering_unit: Option<String>,
    pub poisonous_to_humans: Option<bool>,
    pub poisonous_to_pets: Option<bool>,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub sunlight: Option<String>,
    /// Path to the 256px gallery thumbnail (None if not generated)
    pub thumbnail_path: Option<String>,
}

/// One labelled row of the detail modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

impl DetailLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Treat empty strings the same as missing values
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    present(value).unwrap_or(fallback).to_string()
}

fn yes_or_unknown(flag: Option<bool>) -> &'static str {
    if flag == Some(true) {
        "Yes"
    } else {
        "No information"
    }
}

impl PlantImage {
    pub fn new(uri: impl Into<String>, name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            species: species.into(),
            ..Self::default()
        }
    }

    /// Source for the gallery tile: the thumbnail if we have one, otherwise the photo
    pub fn thumbnail_source(&self) -> &str {
        present(&self.thumbnail_path).unwrap_or(&self.uri)
    }

    /// Rows shown under the full image, with placeholders for missing fields
    pub fn detail_lines(&self) -> Vec<DetailLine> {
        let water_every = format!(
            "{} {}",
            present(&self.watering_value).unwrap_or("N/A"),
            present(&self.watering_unit).unwrap_or(""),
        );

        vec![
            DetailLine::new("Plant Name", self.name.clone()),
            DetailLine::new("Plant Species", self.species.clone()),
            DetailLine::new(
                "Description",
                or_fallback(&self.description, "Description not available"),
            ),
            DetailLine::new(
                "Watering",
                or_fallback(&self.watering, "Watering information not available"),
            ),
            DetailLine::new("Water every", water_every.trim_end()),
            DetailLine::new("Poisonous to Humans", yes_or_unknown(self.poisonous_to_humans)),
            DetailLine::new("Poisonous to Pets", yes_or_unknown(self.poisonous_to_pets)),
            DetailLine::new(
                "Scientific Name",
                or_fallback(&self.scientific_name, "Scientific name not available"),
            ),
            DetailLine::new(
                "Family",
                or_fallback(&self.family, "Family information not available"),
            ),
            DetailLine::new(
                "Sunlight",
                or_fallback(&self.sunlight, "Sunlight requirements not available"),
            ),
        ]
    }

    /// Fill in the fields a metadata sidecar provides
    pub fn apply_metadata(&mut self, meta: PlantMetadata) {
        if let Some(name) = meta.name.filter(|n| !n.is_empty()) {
            self.name = name;
        }
        if let Some(species) = meta.species.filter(|s| !s.is_empty()) {
            self.species = species;
        }
        self.description = meta.description;
        self.watering = meta.watering;
        self.watering_value = meta.watering_value;
        self.watering_unit = meta.watering_unit;
        self.poisonous_to_humans = meta.poisonous_to_humans;
        self.poisonous_to_pets = meta.poisonous_to_pets;
        self.scientific_name = meta.scientific_name;
        self.family = meta.family;
        self.sunlight = meta.sunlight;
    }
}

/// Identification results stored next to a photo as `<stem>.json`
///
/// Field names follow the camelCase keys the plant lookup service produces.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlantMetadata {
    pub name: Option<String>,
    pub species: Option<String>,
    pub description: Option<String>,
    pub watering: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub watering_value: Option<String>,
    pub watering_unit: Option<String>,
    pub poisonous_to_humans: Option<bool>,
    pub poisonous_to_pets: Option<bool>,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub sunlight: Option<String>,
}

impl PlantMetadata {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// `wateringValue` shows up both as "7" and as 7
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
