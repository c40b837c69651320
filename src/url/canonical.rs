use url::Url;

/// Pseudo-link schemes that never resolve to fetchable pages
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Canonicalizes a discovered href against the page it was found on
///
/// The canonical form is the unit of identity for deduplication: an absolute
/// URL with the fragment removed. Query strings are preserved, so two URLs
/// differing only in their query are distinct pages.
///
/// Returns `None` for anything that can never become a page identity:
/// empty or whitespace-only hrefs, in-page anchors, pseudo-links
/// (`javascript:`, `mailto:`, `tel:`, `data:`), and hrefs that fail to
/// resolve against the base.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docharvest::url::canonicalize;
///
/// let base = Url::parse("https://example.com/docs/index.htm").unwrap();
/// let url = canonicalize(&base, "02.htm#section-3").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/02.htm");
/// ```
pub fn canonicalize(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // In-page anchors point back at the page being parsed
    if href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved)
}
