//! Crawl engine: fetching, extraction, and frontier orchestration

mod coordinator;
mod extractor;
mod fetcher;

pub use coordinator::Coordinator;
pub use extractor::{extract_links, ContainerStrategy, ExtractedPage, Extractor, SelectorStrategy};
pub use fetcher::{build_http_client, FetchError, FetchOutcome, Fetcher, Pacer, TokioPacer};
