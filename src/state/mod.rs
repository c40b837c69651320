//! Frontier state persistence
//!
//! One state file per target records the visited set, the discovery order,
//! and the pending queue. Checkpoints are written to a temporary file and
//! renamed into place, so a crash mid-write leaves the previous checkpoint
//! intact rather than a half-written one.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// State persistence errors
///
/// A corrupt checkpoint is fatal for its target: resuming from guesswork
/// would either re-crawl everything or silently drop pages.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to read state file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("State file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Breadth-first frontier of one crawl target
///
/// Invariants maintained by the coordinator:
/// - every element of `order` is in `visited`
/// - every dequeued URL is added to `visited` before its processing
///   completes, even when the fetch fails
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontierState {
    /// Every canonical URL ever dequeued, including failed fetches
    pub visited: HashSet<String>,

    /// Successfully saved URLs in discovery order, append-only
    pub order: Vec<String>,

    /// FIFO queue of canonical URLs awaiting processing
    pub pending: VecDeque<String>,

    /// When this snapshot was written
    #[serde(default)]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl FrontierState {
    /// Fresh state seeded with a target's start URL
    pub fn seeded(seed_url: &str) -> Self {
        Self {
            pending: VecDeque::from([seed_url.to_string()]),
            ..Default::default()
        }
    }

    /// Loads a checkpoint if one exists
    ///
    /// # Returns
    ///
    /// * `Ok(Some(state))` - A checkpoint was found and parsed
    /// * `Ok(None)` - No state file exists yet (first run)
    /// * `Err(StateError)` - The file exists but is unreadable or corrupt
    pub fn load(path: &Path) -> Result<Option<Self>, StateError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| StateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let state = serde_json::from_str(&content).map_err(|source| StateError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(state))
    }

    /// Writes a checkpoint atomically
    ///
    /// The snapshot goes to `<path>.tmp` first and is renamed over the
    /// target path, making the checkpoint the unit of durability.
    pub fn checkpoint(&mut self, path: &Path) -> Result<(), StateError> {
        self.saved_at = Some(chrono::Utc::now());

        let json = serde_json::to_string_pretty(self)?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|source| StateError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, path).map_err(|source| StateError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }
}
