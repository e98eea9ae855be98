use std::sync::Mutex;

use peak_core::SkipReason;
use peak_engine::{EngineEvent, ProgressSink};
use scrape_logging::{scrape_debug, scrape_info};

/// Skip counts by reason, for the closing summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipTally {
    pub no_page: usize,
    pub no_label: usize,
    pub other_type: usize,
}

impl SkipTally {
    fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::FetchFailed { .. } => self.no_page += 1,
            SkipReason::MissingClassification => self.no_label += 1,
            SkipReason::ClassificationMismatch { .. } => self.other_type += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.no_page + self.no_label + self.other_type
    }
}

/// Reports batch progress through the logger and keeps a skip tally.
///
/// Individual skips are already logged by the engine as they happen.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    tally: Mutex<SkipTally>,
}

impl ConsoleProgress {
    pub fn tally(&self) -> SkipTally {
        self.tally.lock().map(|tally| *tally).unwrap_or_default()
    }

    pub fn report_skips(&self) {
        let tally = self.tally();
        if tally.total() > 0 {
            scrape_info!(
                "Skipped: {} without page, {} without type label, {} of another type",
                tally.no_page,
                tally.no_label,
                tally.other_type
            );
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::ListingParsed { .. } => {}
            EngineEvent::ItemAccepted { name } => scrape_debug!("Accepted: {}", name),
            EngineEvent::ItemSkipped { reason, .. } => {
                if let Ok(mut tally) = self.tally.lock() {
                    tally.record(&reason);
                }
            }
            EngineEvent::BatchCompleted { processed, total } => {
                scrape_info!("Progress: {}/{} peaks processed", processed, total)
            }
        }
    }
}
