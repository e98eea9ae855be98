use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use peak_engine::{FetchSettings, RetryPolicy, ScrapeConfig, DEFAULT_CONCURRENCY};
use url::Url;

use crate::logging::LogDestination;
use crate::ranges::{find_range, DEFAULT_RANGE, RANGES};

#[derive(Debug, Parser)]
#[command(name = "peak_scraper", version)]
#[command(about = "Collect the peaks of one hribi.net mountain range into a JSON file")]
pub struct Cli {
    /// Process only the first N entries of the listing (0: all)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Detail pages processed at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_positive)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 20, value_parser = parse_positive_u64)]
    pub timeout: u64,

    /// Extra attempts after a transient fetch failure
    #[arg(long, default_value_t = 2)]
    pub retries: u32,

    /// Range preset to scrape (see --list-ranges)
    #[arg(long, default_value = DEFAULT_RANGE, conflicts_with = "listing_url")]
    pub range: String,

    /// Scrape this listing page instead of a preset
    #[arg(long)]
    pub listing_url: Option<String>,

    /// Output file [default: <range>.json]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Drop duplicate listing links before fetching their pages
    #[arg(long)]
    pub dedupe_early: bool,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the known range presets and exit
    #[arg(long)]
    pub list_ranges: bool,
}

/// Where to read from and where to write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub listing_url: String,
    pub output: PathBuf,
}

impl Cli {
    pub fn target(&self) -> anyhow::Result<Target> {
        let (listing_url, default_output) = match &self.listing_url {
            Some(raw) => {
                let url = Url::parse(raw).with_context(|| format!("invalid --listing-url {raw}"))?;
                (raw.clone(), output_file_name_for(&url))
            }
            None => {
                let Some(range) = find_range(&self.range) else {
                    let known: Vec<&str> = RANGES.iter().map(|r| r.slug).collect();
                    bail!(
                        "unknown range '{}'; known ranges: {}",
                        self.range,
                        known.join(", ")
                    );
                };
                (range.listing_url(), range.output_file_name())
            }
        };
        Ok(Target {
            listing_url,
            output: self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_output)),
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.timeout),
            ..FetchSettings::default()
        }
    }

    pub fn scrape_config(&self, listing_url: String) -> ScrapeConfig {
        let mut config = ScrapeConfig::new(listing_url);
        config.concurrency = self.concurrency;
        config.item_limit = self.limit.filter(|&limit| limit > 0);
        config.dedupe_before_fetch = self.dedupe_early;
        config.retry = RetryPolicy {
            retries: self.retries,
            ..RetryPolicy::default()
        };
        config
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }
}

/// `<slug>.json` for `.../gorovje/<slug>/<id>`, otherwise the last non-numeric
/// path segment, otherwise `peaks.json`.
fn output_file_name_for(url: &Url) -> String {
    let slug = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty() && !segment.chars().all(|c| c.is_ascii_digit()))
        .last()
        .unwrap_or("peaks");
    format!("{slug}.json")
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(value) => Ok(value),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_positive_u64(raw: &str) -> Result<u64, String> {
    parse_positive(raw).map(|value| value as u64)
}
