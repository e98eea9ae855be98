use peak_core::{AcceptedPeak, CandidateItem, ExtractionRules, ItemOutcome, PeakRecord, SkipReason};
use scraper::Html;
use scrape_logging::scrape_info;

use crate::coords::CoordinateResolver;
use crate::detail::ClassificationMatcher;
use crate::text::document_text;

#[derive(Debug, Clone)]
pub struct DetailAnalyzer {
    classification: ClassificationMatcher,
    coordinates: CoordinateResolver,
}

impl DetailAnalyzer {
    pub fn new(rules: &ExtractionRules) -> Result<Self, regex::Error> {
        Ok(Self {
            classification: ClassificationMatcher::new(rules)?,
            coordinates: CoordinateResolver::new(rules)?,
        })
    }

    /// Coordinates are only resolved for accepted pages.
    pub fn analyze(&self, item: &CandidateItem, html: &str) -> ItemOutcome {
        let document = Html::parse_document(html);
        let page_text = document_text(&document);

        let Some(label) = self.classification.extract(&page_text, &document) else {
            scrape_info!("Skipped (type mismatch): {} -- no type label", item.name);
            return ItemOutcome::skipped(&item.name, SkipReason::MissingClassification);
        };
        if !self.classification.is_accepted(&label) {
            scrape_info!("Skipped (type mismatch): {} -- type: {}", item.name, label);
            return ItemOutcome::skipped(&item.name, SkipReason::ClassificationMismatch { label });
        }

        let resolved = self.coordinates.resolve_document(&document, &page_text);
        ItemOutcome::Accepted(AcceptedPeak {
            address: item.address.clone(),
            record: PeakRecord::from_candidate(item, resolved.map(|r| r.pair)),
            coordinate_source: resolved.map(|r| r.source),
        })
    }
}
