//! Fixture-backed [`PageDriver`] that replays recorded feed passes.
//!
//! ## Fixture format
//!
//! ```json
//! {
//!   "passes": [
//!     [ { "text": "Fast Freight\n+966 11 234 5678", "name": "Fast Freight", "address": "King Fahd Rd" } ],
//!     [ { "text": "..." }, { "text": "..." } ]
//!   ],
//!   "fail_at_pass": 3
//! }
//! ```
//!
//! Each entry of `passes` is the full visible card list after one scroll.
//! Scrolling past the last recorded pass keeps showing it, which is how an
//! exhausted feed behaves. `fail_at_pass` (1-based, optional) closes the page
//! on that scroll.

use std::path::Path;

use serde::Deserialize;

use crate::driver::{FieldRole, PageDriver, RawItemSnapshot};
use crate::error::{DriverError, ExtractionError, ReplayError};

/// One recorded result card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayItem {
    pub text: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl RawItemSnapshot for ReplayItem {
    fn text(&self) -> Result<String, ExtractionError> {
        Ok(self.text.clone())
    }

    fn field(&self, role: FieldRole) -> Result<Option<String>, ExtractionError> {
        Ok(match role {
            FieldRole::Name => self.name.clone(),
            FieldRole::Address => self.address.clone(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ReplayFixture {
    passes: Vec<Vec<ReplayItem>>,
    #[serde(default)]
    fail_at_pass: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ReplayDriver {
    fixture: ReplayFixture,
    query: Option<String>,
    scrolls: usize,
    closed: bool,
}

impl ReplayDriver {
    /// Loads a fixture from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Io`] if the file cannot be read and
    /// [`ReplayError::Parse`] if it is not a valid fixture.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses a fixture from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Parse`] if `json` is not a valid fixture.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let fixture: ReplayFixture = serde_json::from_str(json)?;
        Ok(Self::from_passes(fixture.passes, fixture.fail_at_pass))
    }

    #[must_use]
    pub fn from_passes(passes: Vec<Vec<ReplayItem>>, fail_at_pass: Option<usize>) -> Self {
        Self {
            fixture: ReplayFixture {
                passes,
                fail_at_pass,
            },
            query: None,
            scrolls: 0,
            closed: false,
        }
    }

    /// The query most recently submitted, if any.
    #[must_use]
    pub fn submitted_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Number of successful scroll advances so far.
    #[must_use]
    pub fn scrolls(&self) -> usize {
        self.scrolls
    }

    #[must_use]
    pub fn recorded_passes(&self) -> usize {
        self.fixture.passes.len()
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.closed {
            Err(DriverError::PageClosed)
        } else {
            Ok(())
        }
    }
}

impl PageDriver for ReplayDriver {
    type Item = ReplayItem;

    async fn submit_query(&mut self, text: &str) -> Result<(), DriverError> {
        self.ensure_open()?;
        if text.trim().is_empty() {
            return Err(DriverError::SearchInputUnavailable(
                "search box accepts no empty input".to_owned(),
            ));
        }
        self.query = Some(text.to_owned());
        Ok(())
    }

    async fn advance_scroll(&mut self) -> Result<(), DriverError> {
        self.ensure_open()?;
        if self.query.is_none() {
            return Err(DriverError::Automation(
                "no result feed before a search is submitted".to_owned(),
            ));
        }
        if self.fixture.fail_at_pass == Some(self.scrolls + 1) {
            self.closed = true;
            return Err(DriverError::PageClosed);
        }
        self.scrolls += 1;
        Ok(())
    }

    async fn current_visible_items(&mut self) -> Result<Vec<ReplayItem>, DriverError> {
        self.ensure_open()?;
        if self.scrolls == 0 {
            return Ok(Vec::new());
        }
        let index = (self.scrolls - 1).min(self.fixture.passes.len().saturating_sub(1));
        Ok(self.fixture.passes.get(index).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> ReplayItem {
        ReplayItem {
            text: format!("{name}\n0112223333"),
            name: Some(name.to_owned()),
            address: Some("1 St".to_owned()),
        }
    }

    #[test]
    fn parses_fixture_with_optional_fields() {
        let json = r#"{"passes": [[{"text": "A"}, {"text": "B", "name": "B", "address": "x"}]]}"#;
        let driver = ReplayDriver::from_json(json).unwrap();
        assert_eq!(driver.recorded_passes(), 1);
        let first = &driver.fixture.passes[0][0];
        assert!(first.name.is_none());
        assert!(first.address.is_none());
        assert!(driver.fixture.fail_at_pass.is_none());
    }

    #[test]
    fn rejects_malformed_fixture() {
        let err = ReplayDriver::from_json(r#"{"passes": "nope"}"#).unwrap_err();
        assert!(matches!(err, ReplayError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ReplayDriver::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { ref path, .. } if path.contains("not/here")));
    }

    #[test]
    fn item_fields_map_to_roles() {
        let item = item("Depot");
        assert_eq!(item.field(FieldRole::Name).unwrap().as_deref(), Some("Depot"));
        assert_eq!(item.field(FieldRole::Address).unwrap().as_deref(), Some("1 St"));
        assert_eq!(item.text().unwrap(), "Depot\n0112223333");
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let mut driver = ReplayDriver::from_passes(vec![], None);
        let err = driver.submit_query("  ").await.unwrap_err();
        assert!(matches!(err, DriverError::SearchInputUnavailable(_)));
        assert!(driver.submitted_query().is_none());
    }

    #[tokio::test]
    async fn scrolling_before_search_fails() {
        let mut driver = ReplayDriver::from_passes(vec![vec![item("A")]], None);
        let err = driver.advance_scroll().await.unwrap_err();
        assert!(matches!(err, DriverError::Automation(_)));
    }

    #[tokio::test]
    async fn nothing_is_visible_before_the_first_scroll() {
        let mut driver = ReplayDriver::from_passes(vec![vec![item("A")]], None);
        driver.submit_query("q").await.unwrap();
        assert!(driver.current_visible_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replays_passes_then_holds_the_last_one() {
        let mut driver =
            ReplayDriver::from_passes(vec![vec![item("A")], vec![item("A"), item("B")]], None);
        driver.submit_query("q").await.unwrap();

        let mut counts = Vec::new();
        for _ in 0..4 {
            driver.advance_scroll().await.unwrap();
            counts.push(driver.current_visible_items().await.unwrap().len());
        }
        assert_eq!(counts, vec![1, 2, 2, 2]);
        assert_eq!(driver.scrolls(), 4);
    }

    #[tokio::test]
    async fn fail_at_pass_closes_the_page() {
        let mut driver = ReplayDriver::from_passes(vec![vec![item("A")]], Some(2));
        driver.submit_query("q").await.unwrap();
        driver.advance_scroll().await.unwrap();
        assert_eq!(driver.advance_scroll().await, Err(DriverError::PageClosed));
        assert_eq!(
            driver.current_visible_items().await.unwrap_err(),
            DriverError::PageClosed
        );
        assert_eq!(driver.scrolls(), 1);
    }

    #[tokio::test]
    async fn fixture_without_passes_shows_an_empty_feed() {
        let mut driver = ReplayDriver::from_passes(Vec::new(), None);
        driver.submit_query("q").await.unwrap();
        driver.advance_scroll().await.unwrap();
        assert!(driver.current_visible_items().await.unwrap().is_empty());
    }
}
