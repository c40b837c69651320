//! Configuration loading, parsing, and validation
//!
//! Configuration is a single TOML file listing the crawl targets and the
//! crawler's politeness, retry, and checkpoint settings.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig, TargetConfig, UserAgentConfig};
pub use validation::validate;
