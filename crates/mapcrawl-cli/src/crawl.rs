//! `crawl` command: replay a recorded feed through the crawl loop.
//!
//! Listings go to stdout, logs to stderr. A crawl that stops on a driver
//! error still prints everything it harvested and exits successfully.

use std::time::Duration;

use mapcrawl_core::{build_search_query, AppConfig, Listing};
use mapcrawl_scraper::{
    CrawlOptions, CrawlOrchestrator, CrawlOutcome, JitterPacing, NoPacing, Pacing, ReplayDriver,
    StopReason,
};

use crate::{CrawlArgs, OutputFormat};

/// Resolves the search text from either `--query` or the keyword/location flags.
pub(crate) fn resolve_query(args: &CrawlArgs) -> anyhow::Result<String> {
    if let Some(query) = &args.query {
        return Ok(query.clone());
    }
    let query = build_search_query(
        args.keyword.as_deref().unwrap_or_default(),
        args.country.as_deref().unwrap_or_default(),
        args.city.as_deref(),
    )?;
    Ok(query)
}

/// Builds validated crawl options; all configuration errors surface here,
/// before the fixture is touched.
pub(crate) fn crawl_options(config: &AppConfig, args: &CrawlArgs) -> anyhow::Result<CrawlOptions> {
    let query = resolve_query(args)?;
    let mut options = CrawlOptions::from_app_config(&query, config)?;
    if let Some(max_stall_passes) = args.max_stall_passes {
        options = options.with_max_stall_passes(max_stall_passes)?;
    }
    if args.no_pacing {
        options = options.with_settle_delay(Duration::ZERO);
    }
    Ok(options)
}

pub(crate) async fn run_crawl(config: &AppConfig, args: &CrawlArgs) -> anyhow::Result<()> {
    let options = crawl_options(config, args)?;
    let mut driver = ReplayDriver::load(&args.fixture)?;

    tracing::info!(
        query = options.query(),
        fixture = %args.fixture.display(),
        recorded_passes = driver.recorded_passes(),
        "replaying result feed"
    );

    let orchestrator = CrawlOrchestrator::new(options);
    let outcome = if args.no_pacing {
        execute(orchestrator.with_pacing(NoPacing), &mut driver, args.format).await
    } else {
        let pacing = JitterPacing::new(config.pacing_min_ms, config.pacing_max_ms);
        execute(orchestrator.with_pacing(pacing), &mut driver, args.format).await
    };

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcome.listings)?);
    }

    match &outcome.stop_reason {
        StopReason::Plateau => tracing::info!(
            listings = outcome.listings.len(),
            passes = outcome.passes,
            "reached end of results"
        ),
        reason => tracing::warn!(
            listings = outcome.listings.len(),
            passes = outcome.passes,
            %reason,
            "crawl ended early; results are partial"
        ),
    }

    Ok(())
}

async fn execute<P: Pacing>(
    mut orchestrator: CrawlOrchestrator<P>,
    driver: &mut ReplayDriver,
    format: OutputFormat,
) -> CrawlOutcome {
    let cancel = orchestrator.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; stopping at the next pass");
            cancel.cancel();
        }
    });

    let outcome = orchestrator
        .run_with(driver, |listing| {
            if format == OutputFormat::Jsonl {
                print_listing(listing);
            }
        })
        .await;

    interrupt.abort();
    outcome
}

fn print_listing(listing: &Listing) {
    match serde_json::to_string(listing) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(serial = listing.serial, error = %e, "could not serialize listing"),
    }
}
