pub mod dedup;
pub mod driver;
pub mod error;
pub mod orchestrator;
pub mod pacing;
pub mod phone;
pub mod replay;
pub mod stall;

pub use dedup::DedupStore;
pub use driver::{FieldRole, PageDriver, RawItemSnapshot};
pub use error::{DriverError, ExtractionError, ReplayError};
pub use orchestrator::{CrawlOptions, CrawlOrchestrator, CrawlOutcome, CrawlPhase, StopReason};
pub use pacing::{JitterPacing, NoPacing, Pacing};
pub use phone::{extract_phone, normalize_phone};
pub use replay::{ReplayDriver, ReplayItem};
pub use stall::StallDetector;
