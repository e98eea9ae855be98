use std::sync::Arc;

use futures_util::stream::{FuturesUnordered, StreamExt};
use peak_core::{
    collect_unique, dedupe_candidates, CandidateItem, ExtractionRules, ItemOutcome, PeakRecord,
    RunSummary, SkipReason,
};
use scrape_logging::{scrape_debug, scrape_info};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::analyze::DetailAnalyzer;
use crate::listing::parse_listing;
use crate::retry::{fetch_page, RetryPolicy};
use crate::{EngineEvent, FetchError, Fetcher};

pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_BATCH_SIZE: usize = 50;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: EngineEvent) {}
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub listing_url: String,
    pub concurrency: usize,
    /// Process only the first N listing rows; zero means no limit.
    pub item_limit: Option<usize>,
    pub batch_size: usize,
    pub retry: RetryPolicy,
    /// Drop duplicate addresses before fetching instead of after.
    pub dedupe_before_fetch: bool,
    pub rules: ExtractionRules,
}

impl ScrapeConfig {
    pub fn new(listing_url: impl Into<String>) -> Self {
        Self {
            listing_url: listing_url.into(),
            concurrency: DEFAULT_CONCURRENCY,
            item_limit: None,
            batch_size: DEFAULT_BATCH_SIZE,
            retry: RetryPolicy::default(),
            dedupe_before_fetch: false,
            rules: ExtractionRules::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid listing url {url}: {source}")]
    InvalidListingUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("extraction rules do not compile: {0}")]
    Rules(#[from] regex::Error),
    #[error("could not fetch listing page {url}: {source}")]
    ListingUnavailable {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeOutput {
    pub group: String,
    pub records: Vec<PeakRecord>,
    pub summary: RunSummary,
}

pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    config: ScrapeConfig,
    listing_url: Url,
    analyzer: DetailAnalyzer,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: ScrapeConfig) -> Result<Self, PipelineError> {
        let listing_url =
            Url::parse(&config.listing_url).map_err(|source| PipelineError::InvalidListingUrl {
                url: config.listing_url.clone(),
                source,
            })?;
        let analyzer = DetailAnalyzer::new(&config.rules)?;
        Ok(Self {
            fetcher,
            config,
            listing_url,
            analyzer,
        })
    }

    /// Resolves to [`PipelineError::Cancelled`] as soon as `cancel` fires.
    pub async fn run(
        &self,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ScrapeOutput, PipelineError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PipelineError::Cancelled),
            result = self.run_to_completion(sink) => result,
        }
    }

    async fn run_to_completion(&self, sink: &dyn ProgressSink) -> Result<ScrapeOutput, PipelineError> {
        scrape_info!("Fetching range page and list of peaks...");
        let page = fetch_page(self.fetcher.as_ref(), self.listing_url.as_str(), &self.config.retry)
            .await
            .map_err(|source| PipelineError::ListingUnavailable {
                url: self.config.listing_url.clone(),
                source,
            })?;
        let listing = parse_listing(&page.html, &self.listing_url, &self.config.rules);
        let listed = listing.items.len();
        scrape_info!("Found {} entries on range page {}", listed, listing.group);
        sink.emit(EngineEvent::ListingParsed {
            group: listing.group.clone(),
            candidates: listed,
        });

        let mut candidates = listing.items;
        if let Some(limit) = self.config.item_limit.filter(|&limit| limit > 0) {
            candidates.truncate(limit);
        }
        if self.config.dedupe_before_fetch {
            candidates = dedupe_candidates(candidates);
        }

        let outcomes = self.process_all(candidates, sink).await;
        let processed = outcomes.len();
        let collected = collect_unique(outcomes);

        let weak_coordinates = collected
            .accepted
            .iter()
            .filter(|peak| peak.coordinate_source.is_some_and(|s| s.is_weak()))
            .count();
        let records = collected.records();
        let summary = RunSummary {
            listed,
            processed,
            accepted: records.len(),
            skipped: collected.skipped.len() + collected.duplicates,
            duplicates: collected.duplicates,
            weak_coordinates,
        };
        scrape_info!(
            "Done: {} peaks accepted (deduped), {} skipped",
            summary.accepted,
            summary.skipped
        );

        Ok(ScrapeOutput {
            group: listing.group,
            records,
            summary,
        })
    }

    async fn process_all(
        &self,
        candidates: Vec<CandidateItem>,
        sink: &dyn ProgressSink,
    ) -> Vec<ItemOutcome> {
        let total = candidates.len();
        let slots = Semaphore::new(self.config.concurrency.max(1));
        let batch_size = self.config.batch_size.max(1);
        scrape_info!(
            "Scraping details (concurrency={})...",
            self.config.concurrency.max(1)
        );

        let mut outcomes = Vec::with_capacity(total);
        let mut pending = candidates.into_iter().peekable();
        while pending.peek().is_some() {
            let mut in_flight: FuturesUnordered<_> = pending
                .by_ref()
                .take(batch_size)
                .map(|item| self.process_item(item, &slots))
                .collect();
            while let Some(outcome) = in_flight.next().await {
                match &outcome {
                    ItemOutcome::Accepted(peak) => sink.emit(EngineEvent::ItemAccepted {
                        name: peak.record.name.clone(),
                    }),
                    ItemOutcome::Skipped { name, reason } => sink.emit(EngineEvent::ItemSkipped {
                        name: name.clone(),
                        reason: reason.clone(),
                    }),
                }
                outcomes.push(outcome);
            }
            sink.emit(EngineEvent::BatchCompleted {
                processed: outcomes.len(),
                total,
            });
        }
        outcomes
    }

    async fn process_item(&self, item: CandidateItem, slots: &Semaphore) -> ItemOutcome {
        // The semaphore is never closed, so acquisition only fails if that changes.
        let Ok(_permit) = slots.acquire().await else {
            return ItemOutcome::skipped(
                item.name,
                SkipReason::FetchFailed {
                    message: "concurrency limiter closed".to_string(),
                },
            );
        };

        scrape_debug!("processing {} <{}>", item.name, item.address);
        match fetch_page(self.fetcher.as_ref(), &item.address, &self.config.retry).await {
            Ok(page) => self.analyzer.analyze(&item, &page.html),
            Err(err) => {
                scrape_info!("Skipped (no page): {} -- {}", item.name, err);
                ItemOutcome::skipped(
                    item.name,
                    SkipReason::FetchFailed {
                        message: err.to_string(),
                    },
                )
            }
        }
    }
}
