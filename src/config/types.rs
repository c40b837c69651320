use serde::Deserialize;

/// Main configuration structure for docharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(rename = "target", default)]
    pub targets: Vec<TargetConfig>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Minimum delay before every request, including the first (milliseconds)
    #[serde(rename = "rate-limit-ms", default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Maximum fetch attempts per URL before the page is dropped
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Read timeout (seconds)
    #[serde(rename = "read-timeout-secs", default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Frontier checkpoint cadence, in newly saved pages
    #[serde(rename = "checkpoint-interval", default = "default_checkpoint_interval")]
    pub checkpoint_interval: u64,

    /// Optional cap on pages saved per run
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u64>,

    /// Whether revision/amendment sub-paths are crawled
    #[serde(rename = "include-revisions", default)]
    pub include_revisions: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory holding per-target state, page records, and corpus files
    #[serde(rename = "data-dir")]
    pub data_dir: std::path::PathBuf,
}

/// One crawl target: a named, prefix-restricted slice of a document site
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Human-readable target name, also used for the output directory
    pub name: String,

    /// URL the breadth-first crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Only URLs starting with one of these prefixes are fetched
    #[serde(rename = "allow-prefixes")]
    pub allow_prefixes: Vec<String>,
}

fn default_rate_limit_ms() -> u64 {
    1200
}

fn default_retries() -> u32 {
    3
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_checkpoint_interval() -> u64 {
    25
}
