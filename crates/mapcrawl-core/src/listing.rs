//! Harvested listing record and its composite identity.

use serde::{Deserialize, Serialize};

/// Placeholder used when a card has no readable name. Such cards are never kept.
pub const NO_NAME: &str = "No name";
/// Placeholder used when a card has no readable address.
pub const NO_ADDRESS: &str = "No address";
/// Placeholder returned by the phone heuristic when nothing phone-shaped survives.
pub const NO_PHONE: &str = "No phone";

/// A deduplicated business listing, in emission order.
///
/// Serialized field names are the public output schema consumed by table
/// and spreadsheet renderers; they must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "Serial No.")]
    pub serial: u64,
    #[serde(rename = "Shop Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Phone Number")]
    pub phone: String,
}

impl Listing {
    /// Composite identity of this listing. See [`dedup_key`].
    #[must_use]
    pub fn dedup_key(&self) -> String {
        dedup_key(&self.name, &self.address)
    }
}

/// Builds the `name_address` composite key used to recognise a listing seen
/// in an earlier scroll window.
///
/// Two businesses with identical name and address text share a key and are
/// treated as one entity.
#[must_use]
pub fn dedup_key(name: &str, address: &str) -> String {
    format!("{name}_{address}")
}
