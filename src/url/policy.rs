use crate::config::TargetConfig;
use crate::url::canonicalize;
use url::Url;

/// Path extensions that never hold document text
const BLOCKED_EXTENSIONS: &[&str] = &[
    ".pdf", ".zip", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".mp3", ".mp4",
];

/// Path segment marking revision/amendment pages
const REVISION_SEGMENT: &str = "/kaisei/";

/// Admission policy for discovered URLs
///
/// Decides whether a candidate link may enter the frontier of a target.
/// The checks are pure functions of the URL and the target configuration;
/// rejections are not errors and carry no detail beyond `None`.
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    include_revisions: bool,
}

impl UrlPolicy {
    pub fn new(include_revisions: bool) -> Self {
        Self { include_revisions }
    }

    /// Canonicalizes a candidate href and checks it against the target's gates
    ///
    /// # Arguments
    ///
    /// * `candidate` - The href as found in the document (may be relative)
    /// * `base` - The URL of the page the href was found on
    /// * `target` - The crawl target whose host and prefixes apply
    ///
    /// # Returns
    ///
    /// * `Some(Url)` - The canonical URL, admitted for fetching
    /// * `None` - Rejected for any reason
    pub fn admit(&self, candidate: &str, base: &Url, target: &TargetConfig) -> Option<Url> {
        let url = canonicalize(base, candidate)?;
        self.allows(&url, target).then_some(url)
    }

    /// Checks an already-canonical URL against the target's gates
    ///
    /// Used directly when re-validating queued URLs at dequeue time, so a
    /// resumed run under a tightened configuration does not fetch pages the
    /// current policy would reject.
    pub fn allows(&self, url: &Url, target: &TargetConfig) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        let Some(host) = url.host_str() else {
            return false;
        };
        let Some(seed_host) = Url::parse(&target.seed_url)
            .ok()
            .and_then(|seed| seed.host_str().map(str::to_string))
        else {
            return false;
        };
        if host != seed_host {
            return false;
        }

        if !target
            .allow_prefixes
            .iter()
            .any(|prefix| url.as_str().starts_with(prefix.as_str()))
        {
            return false;
        }

        let path = url.path().to_ascii_lowercase();
        if BLOCKED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            return false;
        }

        if !self.include_revisions && path.contains(REVISION_SEGMENT) {
            return false;
        }

        true
    }
}
