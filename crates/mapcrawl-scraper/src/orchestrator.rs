//! The crawl loop: search, then scroll → pace → extract → dedup → stall-check
//! until the feed plateaus, the caller cancels, or the driver fails.
//!
//! ```text
//! Searching ──submitted + settled──▶ Scrolling ──plateau | cancel | driver error──▶ Stopped
//!     └───────────────── submit failed | cancelled ─────────────────────────────────▲
//! ```
//!
//! Listings are emitted as soon as they are admitted, so a crawl that stops
//! on a driver error still returns everything harvested up to that point.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use mapcrawl_core::{
    validate_stall_passes, AppConfig, ConfigError, Listing, DEFAULT_STALL_PASSES, NO_ADDRESS,
    NO_NAME, NO_PHONE,
};

use crate::dedup::DedupStore;
use crate::driver::{FieldRole, PageDriver, RawItemSnapshot};
use crate::error::DriverError;
use crate::pacing::{JitterPacing, Pacing};
use crate::phone::extract_phone;
use crate::stall::StallDetector;

/// Wait after submitting the query before the first pass.
const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(7);

/// Validated parameters of one crawl invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    query: String,
    max_stall_passes: u32,
    settle_delay: Duration,
}

impl CrawlOptions {
    /// Creates options for `query` with the default plateau threshold (6)
    /// and settle delay (7 s).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `query` is blank.
    pub fn new(query: &str) -> Result<Self, ConfigError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ConfigError::MissingField("search_query"));
        }
        Ok(Self {
            query: query.to_owned(),
            max_stall_passes: DEFAULT_STALL_PASSES,
            settle_delay: DEFAULT_SETTLE_DELAY,
        })
    }

    /// Creates options for `query` using the threshold and settle delay from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `query` is blank or the configured
    /// threshold is out of range.
    pub fn from_app_config(query: &str, config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(query)?
            .with_max_stall_passes(config.max_stall_passes)?
            .with_settle_delay(config.settle_delay()))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] unless `max_stall_passes` is within `3..=10`.
    pub fn with_max_stall_passes(mut self, max_stall_passes: u32) -> Result<Self, ConfigError> {
        self.max_stall_passes = validate_stall_passes(max_stall_passes)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn max_stall_passes(&self) -> u32 {
        self.max_stall_passes
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

/// Why a crawl ended. None of these is a failure of the crawl itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The visible-item count stopped changing for the configured number of passes.
    Plateau,
    /// The caller cancelled the orchestrator's [`CancellationToken`].
    Cancelled,
    /// The driver could not search, scroll or read the feed.
    DriverFailed(DriverError),
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Plateau => write!(f, "plateau"),
            StopReason::Cancelled => write!(f, "cancelled"),
            StopReason::DriverFailed(err) => write!(f, "driver failed: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlPhase {
    Searching,
    Scrolling,
    Stopped(StopReason),
}

/// Result of one crawl invocation.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Admitted listings in emission order; serials run `1..=len`.
    pub listings: Vec<Listing>,
    pub stop_reason: StopReason,
    /// Completed scroll passes.
    pub passes: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlOutcome {
    /// `true` when the crawl ended before the feed plateaued.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !matches!(self.stop_reason, StopReason::Plateau)
    }
}

/// Per-invocation mutable state. Never outlives a single `run`.
#[derive(Debug)]
struct CrawlState {
    dedup: DedupStore,
    stall: StallDetector,
    passes: u32,
    listings: Vec<Listing>,
}

impl CrawlState {
    fn new(max_stall_passes: u32) -> Self {
        Self {
            dedup: DedupStore::new(),
            stall: StallDetector::new(max_stall_passes),
            passes: 0,
            listings: Vec::new(),
        }
    }
}

/// Drives a [`PageDriver`] through one crawl.
///
/// Each call to [`run`](Self::run) starts from a fresh dedup store and stall
/// detector, so successive invocations are independent.
#[derive(Debug)]
pub struct CrawlOrchestrator<P = JitterPacing> {
    options: CrawlOptions,
    pacing: P,
    cancel: CancellationToken,
}

impl CrawlOrchestrator<JitterPacing> {
    /// Creates an orchestrator with the default 2.5–3.8 s jittered pacing.
    #[must_use]
    pub fn new(options: CrawlOptions) -> Self {
        Self {
            options,
            pacing: JitterPacing::default(),
            cancel: CancellationToken::new(),
        }
    }
}

impl<P: Pacing> CrawlOrchestrator<P> {
    #[must_use]
    pub fn with_pacing<Q: Pacing>(self, pacing: Q) -> CrawlOrchestrator<Q> {
        CrawlOrchestrator {
            options: self.options,
            pacing,
            cancel: self.cancel,
        }
    }

    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that stops the crawl at the next pass boundary. Cancelling
    /// also cuts short any settle wait or pacing pause in progress.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Runs a crawl to completion and returns every admitted listing.
    pub async fn run<D: PageDriver>(&mut self, driver: &mut D) -> CrawlOutcome {
        self.run_with(driver, |_| {}).await
    }

    /// Runs a crawl, invoking `on_listing` for each listing the moment it is
    /// admitted, in emission order.
    pub async fn run_with<D, F>(&mut self, driver: &mut D, mut on_listing: F) -> CrawlOutcome
    where
        D: PageDriver,
        F: FnMut(&Listing),
    {
        let started_at = Utc::now();
        let mut state = CrawlState::new(self.options.max_stall_passes);
        let mut phase = CrawlPhase::Searching;

        tracing::info!(
            query = %self.options.query,
            max_stall_passes = self.options.max_stall_passes,
            "starting crawl"
        );

        let stop_reason = loop {
            phase = match phase {
                CrawlPhase::Searching => self.search(driver).await,
                CrawlPhase::Scrolling => self.scroll_pass(driver, &mut state, &mut on_listing).await,
                CrawlPhase::Stopped(reason) => break reason,
            };
        };

        let finished_at = Utc::now();
        tracing::info!(
            reason = %stop_reason,
            passes = state.passes,
            listings = state.listings.len(),
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "crawl stopped"
        );

        CrawlOutcome {
            listings: state.listings,
            stop_reason,
            passes: state.passes,
            started_at,
            finished_at,
        }
    }

    async fn search<D: PageDriver>(&self, driver: &mut D) -> CrawlPhase {
        if self.cancel.is_cancelled() {
            tracing::info!("crawl cancelled before search");
            return CrawlPhase::Stopped(StopReason::Cancelled);
        }

        if let Err(err) = driver.submit_query(&self.options.query).await {
            tracing::error!(query = %self.options.query, error = %err, "search submission failed");
            return CrawlPhase::Stopped(StopReason::DriverFailed(err));
        }

        pause(self.options.settle_delay, &self.cancel).await;
        CrawlPhase::Scrolling
    }

    async fn scroll_pass<D, F>(
        &mut self,
        driver: &mut D,
        state: &mut CrawlState,
        on_listing: &mut F,
    ) -> CrawlPhase
    where
        D: PageDriver,
        F: FnMut(&Listing),
    {
        let pass = state.passes + 1;

        if self.cancel.is_cancelled() {
            tracing::info!(pass, "crawl cancelled at pass boundary");
            return CrawlPhase::Stopped(StopReason::Cancelled);
        }

        if let Err(err) = driver.advance_scroll().await {
            tracing::error!(pass, error = %err, "scroll failed; keeping partial results");
            return CrawlPhase::Stopped(StopReason::DriverFailed(err));
        }

        pause(self.pacing.next_delay(), &self.cancel).await;

        let items = match driver.current_visible_items().await {
            Ok(items) => items,
            Err(err) => {
                tracing::error!(pass, error = %err, "reading feed failed; keeping partial results");
                return CrawlPhase::Stopped(StopReason::DriverFailed(err));
            }
        };

        let admitted = harvest(&items, state, on_listing);
        state.passes = pass;

        let visible = items.len();
        tracing::debug!(
            pass,
            visible,
            admitted,
            total = state.listings.len(),
            "pass complete"
        );

        if state.stall.observe(visible) {
            CrawlPhase::Stopped(StopReason::Plateau)
        } else {
            CrawlPhase::Scrolling
        }
    }
}

/// Extracts, dedups and emits the new listings among `items`, in scan order.
/// Returns how many were admitted.
fn harvest<S, F>(items: &[S], state: &mut CrawlState, on_listing: &mut F) -> usize
where
    S: RawItemSnapshot,
    F: FnMut(&Listing),
{
    let mut admitted = 0;
    for (card, item) in items.iter().enumerate() {
        let name = read_field(item, FieldRole::Name, NO_NAME, card);
        let address = read_field(item, FieldRole::Address, NO_ADDRESS, card);

        let Some(serial) = state.dedup.try_admit(&name, &address) else {
            continue;
        };

        let listing = Listing {
            serial,
            name,
            address,
            phone: read_phone(item, card),
        };
        tracing::debug!(serial, name = %listing.name, phone = %listing.phone, "new listing");
        on_listing(&listing);
        state.listings.push(listing);
        admitted += 1;
    }

    debug_assert_eq!(state.dedup.len(), state.listings.len());
    admitted
}

fn read_field<S: RawItemSnapshot>(
    item: &S,
    role: FieldRole,
    placeholder: &str,
    card: usize,
) -> String {
    match item.field(role) {
        Ok(Some(value)) if !value.trim().is_empty() => value.trim().to_owned(),
        Ok(_) => placeholder.to_owned(),
        Err(err) => {
            tracing::warn!(card, %role, error = %err, "card field unreadable; using placeholder");
            placeholder.to_owned()
        }
    }
}

fn read_phone<S: RawItemSnapshot>(item: &S, card: usize) -> String {
    match item.text() {
        Ok(text) => extract_phone(&text),
        Err(err) => {
            tracing::warn!(card, error = %err, "card text unreadable; no phone");
            NO_PHONE.to_owned()
        }
    }
}

/// Sleeps for `delay` unless the token fires first. Whether to stop is
/// decided at the next pass boundary, not here.
async fn pause(delay: Duration, cancel: &CancellationToken) {
    if delay.is_zero() {
        return;
    }
    tokio::select! {
        () = tokio::time::sleep(delay) => {}
        () = cancel.cancelled() => {}
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
