use std::fmt;

use crate::{CoordinateSource, PeakRecord};

/// A record that passed the classification filter, still paired with its dedup key.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedPeak {
    pub address: String,
    pub record: PeakRecord,
    pub coordinate_source: Option<CoordinateSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Detail page could not be retrieved after all retries.
    FetchFailed { message: String },
    /// No classification label could be located on the page.
    MissingClassification,
    /// Label found but it does not contain the accept token.
    ClassificationMismatch { label: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FetchFailed { message } => write!(f, "no page ({message})"),
            SkipReason::MissingClassification => write!(f, "type mismatch -- no type label"),
            SkipReason::ClassificationMismatch { label } => {
                write!(f, "type mismatch -- type: {label}")
            }
        }
    }
}

/// Result of one detail-page chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Accepted(AcceptedPeak),
    Skipped { name: String, reason: SkipReason },
}

impl ItemOutcome {
    pub fn skipped(name: impl Into<String>, reason: SkipReason) -> Self {
        ItemOutcome::Skipped {
            name: name.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Rows found on the listing page.
    pub listed: usize,
    /// Chains actually run (after the item limit and optional early dedup).
    pub processed: usize,
    /// Records in the final collection.
    pub accepted: usize,
    /// Skipped outcomes plus dropped duplicates.
    pub skipped: usize,
    pub duplicates: usize,
    /// Accepted records whose coordinates came from a weak strategy.
    pub weak_coordinates: usize,
}
