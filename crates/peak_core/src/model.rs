use serde::{Deserialize, Serialize};

/// One row of the listing page, before its detail page has been visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    pub name: String,
    pub elevation_raw: Option<u32>,
    /// Absolute address of the detail page; the dedup key.
    pub address: String,
    pub group: String,
}

/// The record written to the output file.
///
/// The detail address is deliberately absent; it only lives on [`crate::AcceptedPeak`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakRecord {
    pub name: String,
    pub elevation: Option<u32>,
    #[serde(alias = "mountain_range")]
    pub group: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PeakRecord {
    pub fn from_candidate(item: &CandidateItem, coordinates: Option<CoordinatePair>) -> Self {
        Self {
            name: item.name.clone(),
            elevation: item.elevation_raw,
            group: item.group.clone(),
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePair {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordinatePair {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Which resolution strategy produced a coordinate pair, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSource {
    /// Labelled pattern matched and the longitude passed the plausibility gate.
    Strict,
    /// First adjacent pair of degree values inside the plausibility bands.
    BandScan,
    /// First two degree values on the page, unchecked.
    FirstPair,
    /// Labelled pattern matched but failed the gate, and nothing better was found.
    UncheckedStrict,
}

impl CoordinateSource {
    pub fn is_weak(self) -> bool {
        matches!(self, CoordinateSource::FirstPair | CoordinateSource::UncheckedStrict)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCoordinates {
    pub pair: CoordinatePair,
    pub source: CoordinateSource,
}
