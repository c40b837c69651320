//! Content extraction from heterogeneous page structures
//!
//! Document sites vary in markup between sections, so the main content
//! region is located by trying an ordered chain of container strategies and
//! taking the first match. Navigational chrome and embedded code are
//! skipped during text collection; scraper's DOM is immutable, so cleaning
//! is a skip-list applied while walking the tree rather than node removal.

use crate::url::canonicalize;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Title used when a page offers neither a heading nor a `<title>`
const FALLBACK_TITLE: &str = "Untitled";

/// Elements whose subtrees never contribute document text
const STRIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "header", "footer", "nav", "aside", "form",
];

/// Class names marking navigational chrome and boilerplate
const STRIP_CLASSES: &[&str] = &[
    "breadcrumb",
    "pankuzu",
    "topicpath",
    "global-nav",
    "local-nav",
    "sidemenu",
];

/// Container selectors ordered from most to least specific
const CONTAINER_SELECTORS: &[&str] = &[
    "main",
    "div#main",
    "div.col-sm-12",
    "td.valign-top",
    "article",
    "div.contents",
    "body",
];

/// Extracted title and body text of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub text: String,
}

/// A single attempt at locating the main content region
///
/// Strategies are tried in order; the first one returning a container wins.
/// New site-structure patterns slot in as additional strategies without
/// touching the extraction control flow.
pub trait ContainerStrategy {
    fn try_select<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>>;
}

/// Strategy backed by a CSS selector
pub struct SelectorStrategy {
    selector: Selector,
}

impl SelectorStrategy {
    /// Returns `None` if the CSS fails to parse
    pub fn new(css: &str) -> Option<Self> {
        Selector::parse(css).ok().map(|selector| Self { selector })
    }
}

impl ContainerStrategy for SelectorStrategy {
    fn try_select<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&self.selector).next()
    }
}

/// Content extractor with an ordered fallback chain of container strategies
pub struct Extractor {
    strategies: Vec<Box<dyn ContainerStrategy + Send + Sync>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Creates an extractor with the default strategy chain
    pub fn new() -> Self {
        let strategies = CONTAINER_SELECTORS
            .iter()
            .filter_map(|css| SelectorStrategy::new(css))
            .map(|s| Box::new(s) as Box<dyn ContainerStrategy + Send + Sync>)
            .collect();
        Self { strategies }
    }

    /// Extracts the title and cleaned body text from raw HTML
    ///
    /// Malformed or partial HTML never raises: a missing heading falls
    /// through to the `<title>` and then to a placeholder, and a document
    /// matching no container strategy is dumped whole.
    pub fn extract(&self, html: &str) -> ExtractedPage {
        let document = Html::parse_document(html);
        ExtractedPage {
            title: extract_title(&document),
            text: self.extract_text(&document),
        }
    }

    fn extract_text(&self, document: &Html) -> String {
        let container = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.try_select(document));

        let mut lines = Vec::new();
        match container {
            Some(element) => collect_text(element, &mut lines),
            // html5ever synthesizes <body> for document parses, so this
            // only fires on fragment-like input
            None => collect_text(document.root_element(), &mut lines),
        }

        collapse_blank_lines(&lines.join("\n"))
    }
}

/// First non-empty `<h1>`, else the `<title>`, else a fixed placeholder
fn extract_title(document: &Html) -> String {
    for css in ["h1", "title"] {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        let found = document
            .select(&selector)
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .find(|text| !text.is_empty());
        if let Some(title) = found {
            return title;
        }
    }
    FALLBACK_TITLE.to_string()
}

/// Extracts every link target from the document, canonicalized
///
/// Links are gathered from the whole document, not just the content
/// container, since section navigation often lives in the chrome.
pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| canonicalize(base, href))
        .map(|url| url.to_string())
        .collect()
}

/// Collects text lines beneath an element, skipping stripped subtrees
fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let collapsed = collapse_whitespace(text);
            if !collapsed.is_empty() {
                lines.push(collapsed);
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if should_strip(&child_element) {
                continue;
            }
            collect_text(child_element, lines);
        }
    }
}

fn should_strip(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if STRIP_TAGS.contains(&value.name()) {
        return true;
    }
    value.classes().any(|class| STRIP_CLASSES.contains(&class))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Caps runs of blank lines at one and trims the ends
fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut blanks = 0;

    for line in text.lines() {
        if line.trim().is_empty() {
            blanks += 1;
            if blanks == 1 {
                out.push("");
            }
        } else {
            blanks = 0;
            out.push(line);
        }
    }

    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/docs/index.htm").unwrap()
    }

    #[test]
    fn test_title_from_h1() {
        let html = "<html><head><title>Meta Title</title></head><body><h1>Heading</h1></body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.title, "Heading");
    }

    #[test]
    fn test_title_falls_back_to_title_tag() {
        let html = "<html><head><title>Meta Title</title></head><body><p>No heading</p></body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.title, "Meta Title");
    }

    #[test]
    fn test_empty_h1_falls_through() {
        let html = "<html><head><title>Meta Title</title></head><body><h1>  </h1></body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.title, "Meta Title");
    }

    #[test]
    fn test_second_h1_used_when_first_empty() {
        let html = "<html><body><h1></h1><h1>Real Heading</h1></body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.title, "Real Heading");
    }

    #[test]
    fn test_title_placeholder_when_nothing_present() {
        let html = "<html><body><p>text</p></body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.title, "Untitled");
    }

    #[test]
    fn test_main_preferred_over_article() {
        let html = "<html><body>\
            <article>Article text</article>\
            <main>Main text</main>\
            </body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "Main text");
    }

    #[test]
    fn test_div_main_container() {
        let html = "<html><body>\
            <div id=\"main\">Inner text</div>\
            <div>Outer text</div>\
            </body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "Inner text");
    }

    #[test]
    fn test_body_fallback() {
        let html = "<html><body><p>Just a paragraph</p></body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "Just a paragraph");
    }

    #[test]
    fn test_scripts_and_styles_stripped() {
        let html = "<html><body>\
            <script>var x = 1;</script>\
            <style>p { color: red; }</style>\
            <noscript>enable js</noscript>\
            <p>Visible</p>\
            </body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "Visible");
    }

    #[test]
    fn test_chrome_elements_stripped() {
        let html = "<html><body>\
            <header>Site header</header>\
            <nav>Menu</nav>\
            <p>Content</p>\
            <aside>Sidebar</aside>\
            <form><input type=\"text\"></form>\
            <footer>Site footer</footer>\
            </body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "Content");
    }

    #[test]
    fn test_boilerplate_classes_stripped() {
        let html = "<html><body>\
            <div class=\"breadcrumb\">Home &gt; Docs</div>\
            <div class=\"pankuzu\">path</div>\
            <ul class=\"global-nav\"><li>nav</li></ul>\
            <p>Body text</p>\
            </body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "Body text");
    }

    #[test]
    fn test_interior_whitespace_collapsed() {
        let html = "<html><body><p>a   b\n\t c</p></body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "a b c");
    }

    #[test]
    fn test_multiple_blocks_become_lines() {
        let html = "<html><body><p>First</p><p>Second</p></body></html>";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "First\nSecond");
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = "<html><body><div><p>Unclosed";
        let page = Extractor::new().extract(html);
        assert_eq!(page.text, "Unclosed");
    }

    #[test]
    fn test_empty_document() {
        let page = Extractor::new().extract("");
        assert_eq!(page.title, "Untitled");
        assert_eq!(page.text, "");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("\n\na\n\n"), "a");
        assert_eq!(collapse_blank_lines(""), "");
    }

    #[test]
    fn test_extract_links_resolves_and_canonicalizes() {
        let html = "<html><body>\
            <a href=\"02.htm\">next</a>\
            <a href=\"/top.htm#frag\">top</a>\
            <a href=\"https://other.example.org/x\">other</a>\
            </body></html>";
        let links = extract_links(html, &base_url());
        assert_eq!(
            links,
            vec![
                "https://example.com/docs/02.htm",
                "https://example.com/top.htm",
                "https://other.example.org/x",
            ]
        );
    }

    #[test]
    fn test_extract_links_skips_pseudo_links() {
        let html = "<html><body>\
            <a href=\"javascript:void(0)\">js</a>\
            <a href=\"mailto:a@example.com\">mail</a>\
            <a href=\"#section\">anchor</a>\
            <a href=\"real.htm\">real</a>\
            </body></html>";
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://example.com/docs/real.htm"]);
    }

    #[test]
    fn test_extract_links_from_chrome_included() {
        // Section navigation often lives in nav elements
        let html = "<html><body><nav><a href=\"03.htm\">next</a></nav></body></html>";
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://example.com/docs/03.htm"]);
    }
}
