use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Consecutive unchanged passes that end a crawl.
    pub max_stall_passes: u32,
    /// Lower bound of the post-scroll pause, in milliseconds.
    pub pacing_min_ms: u64,
    /// Upper bound of the post-scroll pause, in milliseconds.
    pub pacing_max_ms: u64,
    /// Wait after submitting the query before the first scroll pass.
    pub settle_delay_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Colored log output is for interactive development only; test and
    /// production logs are usually captured to files.
    #[must_use]
    pub fn ansi_logs(&self) -> bool {
        self.env == Environment::Development
    }
}
