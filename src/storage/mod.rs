//! Per-page record storage
//!
//! Each fetched page becomes one JSON file named after the tail of its URL
//! path plus a short hash of the full URL. The label keeps names
//! recognizable; the hash keeps them filesystem-safe and collision-free.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create pages directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write page record {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read page record {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Page record {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode page record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One fetched page: its canonical URL, extracted title, and cleaned text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub text: String,
}

/// Maximum length of a sanitized filename component
const MAX_COMPONENT_LEN: usize = 180;

/// How many trailing path segments contribute to a record's label
const LABEL_SEGMENTS: usize = 4;

/// Hex characters of the URL hash appended to every record name
const HASH_LEN: usize = 10;

/// Replaces filesystem-unsafe characters and collapses whitespace
///
/// Used for page record labels and for target directory names.
pub fn sanitize_component(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_COMPONENT_LEN).collect()
}

/// Derives the record file name for a canonical URL
///
/// The name is the last few path segments joined with underscores, plus the
/// first ten hex characters of the URL's SHA-256. The hash covers the whole
/// URL, so two pages sharing a path tail (or differing only in their query)
/// still get distinct files.
pub fn page_file_name(url: &Url) -> String {
    let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();
    let tail = if segments.is_empty() {
        "root".to_string()
    } else {
        segments[segments.len().saturating_sub(LABEL_SEGMENTS)..].join("_")
    };
    let tail = sanitize_component(&tail);

    let mut hasher = Sha256::new();
    hasher.update(url.as_str().as_bytes());
    let digest = hex::encode(hasher.finalize());

    format!("{}_{}.json", tail, &digest[..HASH_LEN])
}

/// Filesystem layout of one target under the data directory
#[derive(Debug, Clone)]
pub struct TargetPaths {
    pub root: PathBuf,
    pub pages_dir: PathBuf,
    pub state_file: PathBuf,
    pub corpus_file: PathBuf,
}

impl TargetPaths {
    pub fn new(data_dir: &Path, target_name: &str) -> Self {
        let name = sanitize_component(target_name);
        let root = data_dir.join(&name);
        Self {
            pages_dir: root.join("pages"),
            state_file: root.join("state.json"),
            corpus_file: root.join(format!("{}_FULL.md", name)),
            root,
        }
    }
}

/// Reads and writes page records within one target's pages directory
#[derive(Debug)]
pub struct PageStore {
    pages_dir: PathBuf,
}

impl PageStore {
    /// Opens a store, creating the pages directory if needed
    pub fn open(pages_dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&pages_dir).map_err(|source| StorageError::CreateDir {
            path: pages_dir.clone(),
            source,
        })?;
        Ok(Self { pages_dir })
    }

    /// Path of the record file for a canonical URL
    pub fn path_for(&self, url: &Url) -> PathBuf {
        self.pages_dir.join(page_file_name(url))
    }

    /// Persists a record, overwriting any previous one for the same URL
    ///
    /// Overwriting is safe: extraction is idempotent, so a re-fetch
    /// reproduces the same content.
    pub fn save(&self, url: &Url, record: &PageRecord) -> Result<(), StorageError> {
        let path = self.path_for(url);
        let json = serde_json::to_string(record)?;
        fs::write(&path, json).map_err(|source| StorageError::Write { path, source })?;
        Ok(())
    }

    /// Loads the record for a URL, or `None` if it was never flushed
    pub fn load(&self, url: &Url) -> Result<Option<PageRecord>, StorageError> {
        let path = self.path_for(url);
        if !path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).map_err(|source| StorageError::Read {
                path: path.clone(),
                source,
            })?;
        let record = serde_json::from_str(&content)
            .map_err(|source| StorageError::Corrupt { path, source })?;
        Ok(Some(record))
    }
}
