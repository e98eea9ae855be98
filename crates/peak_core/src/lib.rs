//! Peak core: domain model, extraction rules and pure result collection.
mod dedupe;
mod model;
mod outcome;
mod rules;

pub use dedupe::{collect_unique, dedupe_candidates, normalize_address_for_dedupe, Collected};
pub use model::{CandidateItem, CoordinatePair, CoordinateSource, PeakRecord, ResolvedCoordinates};
pub use outcome::{AcceptedPeak, ItemOutcome, RunSummary, SkipReason};
pub use rules::{ExtractionRules, PlausibilityBands};
