use crate::config::TargetConfig;
use crate::state::FrontierState;
use crate::storage::PageStore;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use url::Url;

/// Assembles the corpus document for a target from its persisted state
///
/// Walks `order` in sequence and emits one numbered section per page record
/// found on disk. Entries whose record is missing are skipped without
/// failing the merge; their section numbers are skipped with them, so the
/// numbering always reflects discovery order. The output is deterministic
/// given `order` and the on-disk records.
///
/// # Arguments
///
/// * `target` - The crawl target being merged
/// * `state` - The target's frontier state (read-only)
/// * `store` - The target's page record store
/// * `include_revisions` - The policy flag recorded in the header
///
/// # Returns
///
/// The corpus document as a markdown string
pub fn build_corpus(
    target: &TargetConfig,
    state: &FrontierState,
    store: &PageStore,
    include_revisions: bool,
) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", target.name));
    md.push_str(&format!("- Seed URL: {}\n", target.seed_url));
    md.push_str(&format!("- Saved pages: {}\n", state.order.len()));
    md.push_str(&format!("- Include revisions: {}\n\n", include_revisions));
    md.push_str("---\n\n");

    for (index, url_str) in state.order.iter().enumerate() {
        let Ok(url) = Url::parse(url_str) else {
            continue;
        };

        let record = match store.load(&url) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Skipping unreadable record for {}: {}", url_str, e);
                continue;
            }
        };

        md.push_str(&format!("## {}. {}\n\n", index + 1, record.title));
        md.push_str(&format!("- URL: {}\n\n", record.url));
        md.push_str(&record.text);
        md.push_str("\n\n---\n\n");
    }

    md
}

/// Writes a corpus document to disk
pub fn write_corpus(path: &Path, corpus: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(corpus.as_bytes())?;
    Ok(())
}
