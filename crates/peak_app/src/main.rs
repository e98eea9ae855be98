mod cli;
mod logging;
mod progress;
mod ranges;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use peak_engine::{write_peaks_json, Pipeline, PipelineError, ReqwestFetcher};
use scrape_logging::{level_for_verbosity, scrape_error, scrape_info, scrape_warn};
use tokio_util::sync::CancellationToken;

use crate::cli::Cli;
use crate::progress::ConsoleProgress;
use crate::ranges::RANGES;

const EXIT_INTERRUPTED: u8 = 130;

enum Completion {
    Finished,
    Interrupted,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.list_ranges {
        for range in &RANGES {
            println!("{:<48} {}", range.slug, range.listing_url());
        }
        return ExitCode::SUCCESS;
    }

    logging::initialize(cli.log_destination(), level_for_verbosity(cli.verbose));

    match run(&cli).await {
        Ok(Completion::Finished) => ExitCode::SUCCESS,
        Ok(Completion::Interrupted) => {
            println!("\nCancelled by user");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(err) => {
            scrape_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<Completion> {
    let target = cli.target()?;
    let fetcher = ReqwestFetcher::new(cli.fetch_settings()).context("could not set up HTTP client")?;
    let config = cli.scrape_config(target.listing_url);
    if let Some(limit) = config.item_limit {
        scrape_info!("Testing limited to first {} peaks", limit);
    }
    let pipeline = Pipeline::new(Arc::new(fetcher), config).context("invalid scrape configuration")?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let progress = ConsoleProgress::default();
    let output = match pipeline.run(&progress, &cancel).await {
        Ok(output) => output,
        Err(PipelineError::Cancelled) => return Ok(Completion::Interrupted),
        Err(err) => return Err(err).context("scrape failed"),
    };
    progress.report_skips();
    if output.summary.weak_coordinates > 0 {
        scrape_warn!(
            "{} peaks have coordinates from a fallback guess; check them by hand",
            output.summary.weak_coordinates
        );
    }

    write_peaks_json(&target.output, &output.records)
        .with_context(|| format!("could not write {}", target.output.display()))?;
    Ok(Completion::Finished)
}
