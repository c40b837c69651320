//! HTTP fetcher
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client with a proper user agent string
//! - Enforcing the politeness delay before every request
//! - Retry logic with different backoff slopes for rate-limit responses
//!   and other failures
//! - Error classification into a closed set of outcomes

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Backoff slope for HTTP 429/503 responses
const TRANSIENT_BACKOFF: Duration = Duration::from_millis(2500);

/// Backoff slope for all other failures
const ERROR_BACKOFF: Duration = Duration::from_millis(1500);

/// Sleep abstraction so retry logic is testable without wall-clock delay
///
/// Every pause the fetcher takes, politeness delay and backoff alike, goes
/// through this trait.
pub trait Pacer {
    fn pause(&mut self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production pacer backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    fn pause(&mut self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Classified fetch failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 429 or 503: the server asked us to slow down
    RateLimited(u16),

    /// Any other non-success HTTP status
    Http(u16),

    /// Connection failure, timeout, or body decoding failure
    Network(String),
}

/// Result of fetching a single URL
///
/// Fetching never propagates an error: either the body arrives, or the
/// retry budget is exhausted and the caller drops the page for this run.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with the decoded body
    Success { body: String },

    /// Retry budget exhausted
    GaveUp {
        attempts: u32,
        last_error: FetchError,
    },
}

/// Builds an HTTP client with the configured identity and timeouts
///
/// The user agent follows the `Name/Version (+ContactURL; ContactEmail)`
/// convention so site operators can identify and reach us.
pub fn build_http_client(
    config: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.read_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rate-limited, retrying fetcher for a single in-flight request
pub struct Fetcher<P: Pacer = TokioPacer> {
    client: Client,
    config: CrawlerConfig,
    pacer: P,
}

impl Fetcher<TokioPacer> {
    /// Creates a fetcher with the production tokio pacer
    pub fn new(
        config: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        Self::with_pacer(config, user_agent, TokioPacer)
    }
}

impl<P: Pacer> Fetcher<P> {
    /// Creates a fetcher with a caller-supplied pacer
    pub fn with_pacer(
        config: &CrawlerConfig,
        user_agent: &UserAgentConfig,
        pacer: P,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, user_agent)?,
            config: config.clone(),
            pacer,
        })
    }

    /// Fetches a URL, retrying transient failures
    ///
    /// # Request Flow
    ///
    /// 1. Pause for the politeness delay (every attempt, including the first)
    /// 2. Send GET with bounded timeouts
    /// 3. 2xx: decode the body (charset from Content-Type, UTF-8 fallback)
    /// 4. 429/503: back off 2.5s x attempt number, retry
    /// 5. Anything else: back off 1.5s x attempt number, retry
    /// 6. After the configured number of attempts, give up
    pub async fn fetch(&mut self, url: &Url) -> FetchOutcome {
        let rate_limit = Duration::from_millis(self.config.rate_limit_ms);
        let mut last_error = FetchError::Network("no attempts made".to_string());

        for attempt in 1..=self.config.retries {
            self.pacer.pause(rate_limit).await;

            let error = match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => return FetchOutcome::Success { body },
                            Err(e) => FetchError::Network(format!("body decode: {}", e)),
                        }
                    } else if status == StatusCode::TOO_MANY_REQUESTS
                        || status == StatusCode::SERVICE_UNAVAILABLE
                    {
                        FetchError::RateLimited(status.as_u16())
                    } else {
                        FetchError::Http(status.as_u16())
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        FetchError::Network("request timeout".to_string())
                    } else if e.is_connect() {
                        FetchError::Network("connection failed".to_string())
                    } else {
                        FetchError::Network(e.to_string())
                    }
                }
            };

            tracing::debug!("attempt {} for {} failed: {:?}", attempt, url, error);

            if attempt < self.config.retries {
                self.pacer.pause(backoff(&error, attempt)).await;
            }
            last_error = error;
        }

        tracing::warn!(
            "giving up on {} after {} attempts: {:?}",
            url,
            self.config.retries,
            last_error
        );

        FetchOutcome::GaveUp {
            attempts: self.config.retries,
            last_error,
        }
    }
}

/// Backoff grows linearly with the attempt number; rate-limit responses get
/// the steeper slope so a struggling server sees us slow down sooner.
fn backoff(error: &FetchError, attempt: u32) -> Duration {
    match error {
        FetchError::RateLimited(_) => TRANSIENT_BACKOFF * attempt,
        FetchError::Http(_) | FetchError::Network(_) => ERROR_BACKOFF * attempt,
    }
}
