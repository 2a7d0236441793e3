//! Contract between the crawl loop and whatever renders the result feed.
//!
//! A live browser, a recorded fixture ([`crate::ReplayDriver`]) or a test
//! double can all back a crawl, as long as they can submit the query,
//! advance the feed and hand back the currently visible cards.

use std::future::Future;

use crate::error::{DriverError, ExtractionError};

/// Structured sub-field of a result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Name,
    Address,
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRole::Name => write!(f, "name"),
            FieldRole::Address => write!(f, "address"),
        }
    }
}

/// Read-only view of one result card as seen during a single pass.
pub trait RawItemSnapshot {
    /// Full raw text of the card, the input to phone extraction.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] when the card text cannot be read.
    fn text(&self) -> Result<String, ExtractionError>;

    /// Text of a structured sub-field, or `None` when the card lacks it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] when the field exists but cannot be read.
    fn field(&self, role: FieldRole) -> Result<Option<String>, ExtractionError>;
}

/// Handle on a scrollable, lazily loading result feed.
pub trait PageDriver {
    type Item: RawItemSnapshot;

    /// Types `text` into the search surface and submits it.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::SearchInputUnavailable`] when the input surface
    /// cannot be located or accepts no input.
    fn submit_query(&mut self, text: &str) -> impl Future<Output = Result<(), DriverError>> + Send;

    /// Scrolls the feed to its end so the next batch starts loading.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on an unrecoverable automation failure.
    fn advance_scroll(&mut self) -> impl Future<Output = Result<(), DriverError>> + Send;

    /// Cards currently rendered in the feed, in display order. The length of
    /// this list is the plateau signal.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] when the feed cannot be read.
    fn current_visible_items(
        &mut self,
    ) -> impl Future<Output = Result<Vec<Self::Item>, DriverError>> + Send;
}
