use std::collections::HashSet;

use url::Url;

use crate::{AcceptedPeak, CandidateItem, ItemOutcome, PeakRecord, SkipReason};

/// Canonical form of a detail address for duplicate detection.
///
/// Fragments never select a different page, so they are dropped. Addresses that
/// do not parse are compared verbatim.
pub fn normalize_address_for_dedupe(address: &str) -> String {
    match Url::parse(address.trim()) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => address.trim().to_string(),
    }
}

/// Drops candidates whose address was already seen, keeping the first.
pub fn dedupe_candidates(items: Vec<CandidateItem>) -> Vec<CandidateItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(normalize_address_for_dedupe(&item.address)))
        .collect()
}

/// Accepted peaks and skips separated from a batch of outcomes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collected {
    pub accepted: Vec<AcceptedPeak>,
    pub skipped: Vec<(String, SkipReason)>,
    pub duplicates: usize,
}

impl Collected {
    pub fn records(&self) -> Vec<PeakRecord> {
        self.accepted.iter().map(|peak| peak.record.clone()).collect()
    }
}

/// Splits outcomes into accepted and skipped, keeping only the first accepted
/// peak per address in the given order.
pub fn collect_unique(outcomes: impl IntoIterator<Item = ItemOutcome>) -> Collected {
    let mut seen = HashSet::new();
    let mut collected = Collected::default();
    for outcome in outcomes {
        match outcome {
            ItemOutcome::Accepted(peak) => {
                if seen.insert(normalize_address_for_dedupe(&peak.address)) {
                    collected.accepted.push(peak);
                } else {
                    collected.duplicates += 1;
                }
            }
            ItemOutcome::Skipped { name, reason } => collected.skipped.push((name, reason)),
        }
    }
    collected
}
