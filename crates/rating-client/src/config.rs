use std::time::Duration;

pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Settings of the external rating fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Maximum number of requests in flight
    pub workers: usize,
    /// Per-request deadline, applied by the HTTP client and around each unit of work
    pub timeout: Duration,
    pub base_url: String,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
