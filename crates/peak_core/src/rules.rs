use std::ops::RangeInclusive;

/// Latitude and longitude ranges used to tell the two apart in free text.
///
/// Defaults cover Slovenia with a generous margin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlausibilityBands {
    pub latitude: RangeInclusive<f64>,
    pub longitude: RangeInclusive<f64>,
}

impl PlausibilityBands {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.latitude.contains(&latitude) && self.longitude.contains(&longitude)
    }
}

impl Default for PlausibilityBands {
    fn default() -> Self {
        Self {
            latitude: 42.0..=48.0,
            longitude: 8.0..=19.0,
        }
    }
}

/// Site layout knowledge: markers, labels and thresholds for hribi.net pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRules {
    /// Path prefix that identifies a detail-page link on the listing page.
    pub item_path_prefix: String,
    /// Label preceding the classification text on a detail page.
    pub classification_marker: String,
    /// Labels that end the classification text when they follow it.
    pub classification_stop_labels: Vec<String>,
    /// Whole word that must appear in the classification for an item to be kept.
    pub accept_token: String,
    /// Label preceding the coordinate text on a detail page.
    pub coordinate_label: String,
    pub bands: PlausibilityBands,
    /// Strict-pattern longitudes below this are treated as a bad match.
    pub min_strict_longitude: f64,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            item_path_prefix: "/gora/".to_string(),
            classification_marker: "Vrsta".to_string(),
            classification_stop_labels: vec![
                "Vremenska".to_string(),
                "Širina".to_string(),
                "Višina".to_string(),
            ],
            accept_token: "vrh".to_string(),
            coordinate_label: "Širina/Dolžina".to_string(),
            bands: PlausibilityBands::default(),
            min_strict_longitude: 10.0,
        }
    }
}
