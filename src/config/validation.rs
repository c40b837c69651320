use crate::config::types::{Config, CrawlerConfig, OutputConfig, TargetConfig, UserAgentConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_targets(&config.targets)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.retries < 1 {
        return Err(ConfigError::Validation(format!(
            "retries must be >= 1, got {}",
            config.retries
        )));
    }

    if config.checkpoint_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "checkpoint-interval must be >= 1, got {}",
            config.checkpoint_interval
        )));
    }

    if config.connect_timeout_secs < 1 || config.read_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "fetch timeouts must be >= 1 second".to_string(),
        ));
    }

    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1 when set, got {}",
                max_pages
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "data-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the crawl target list
///
/// Each target must have a usable seed and at least one allow prefix on the
/// seed's host, and the seed itself must fall under one of its prefixes;
/// otherwise the crawl would admit nothing and silently do no work.
fn validate_targets(targets: &[TargetConfig]) -> Result<(), ConfigError> {
    if targets.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[target]] must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    for target in targets {
        if target.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "target name cannot be empty".to_string(),
            ));
        }

        // Target names double as output directory names
        if !seen_names.insert(target.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate target name '{}'",
                target.name
            )));
        }

        let seed = Url::parse(&target.seed_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid seed-url '{}': {}", target.seed_url, e))
        })?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "seed-url '{}' must use the http or https scheme",
                target.seed_url
            )));
        }

        let seed_host = seed.host_str().ok_or_else(|| {
            ConfigError::Validation(format!("seed-url '{}' has no host", target.seed_url))
        })?;

        if target.allow_prefixes.is_empty() {
            return Err(ConfigError::Validation(format!(
                "target '{}' must have at least one allow-prefix",
                target.name
            )));
        }

        for prefix in &target.allow_prefixes {
            let prefix_url = Url::parse(prefix).map_err(|e| {
                ConfigError::InvalidUrl(format!("Invalid allow-prefix '{}': {}", prefix, e))
            })?;

            if prefix_url.host_str() != Some(seed_host) {
                return Err(ConfigError::Validation(format!(
                    "allow-prefix '{}' is not on the seed host '{}'",
                    prefix, seed_host
                )));
            }
        }

        if !target
            .allow_prefixes
            .iter()
            .any(|prefix| target.seed_url.starts_with(prefix.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "seed-url '{}' does not start with any of its allow-prefixes",
                target.seed_url
            )));
        }
    }

    Ok(())
}

/// Basic email shape check: something@something.something
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "contact-email '{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}
