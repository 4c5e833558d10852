//! Core data types for the albumload pipeline.
//!
//! `ImageItem` is the in-flight value handed from the transcoder to the
//! writer; `PhotoRecord` mirrors a stored metadata row; `ItemOutcome` and
//! `LoadReport` describe what a run did.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One transcoded image on its way to storage.
#[derive(Debug, Clone)]
pub struct ImageItem {
    /// Album the image belongs to (the source directory name by default)
    pub album: String,

    /// Source file name
    pub name: String,

    /// Encoded image bytes
    pub content: Vec<u8>,
}

/// A stored photo metadata row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub album: String,
    pub name: String,
    pub view_count: i64,
    pub caption: String,
    pub published: bool,
}

impl PhotoRecord {
    /// A freshly loaded photo: zero views, empty caption, unpublished.
    pub fn new(album: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            album: album.into(),
            name: name.into(),
            view_count: 0,
            caption: String::new(),
            published: false,
        }
    }
}

/// What happened to a single source file during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Both rows were written
    Loaded { name: String, bytes: usize },

    /// The file could not be read or decoded; nothing was written
    Skipped { path: PathBuf, reason: String },

    /// The file transcoded but the write failed; nothing was written
    Failed { name: String, reason: String },
}

/// Summary of a completed load run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadReport {
    /// Album the rows were written under
    pub album: String,

    /// Image files found in the source directory
    pub discovered: usize,

    /// Items written to storage
    pub loaded: usize,

    /// Items skipped because they could not be decoded
    pub skipped: usize,

    /// Items that failed to persist
    pub failed: usize,

    /// Whether both tables were emptied first
    pub cleared: bool,

    /// Total encoded bytes written
    pub bytes_written: u64,

    /// Wall-clock duration of the run in seconds
    pub total_seconds: f64,
}

impl LoadReport {
    /// Start an empty report for `album`.
    pub fn new(album: impl Into<String>, discovered: usize, cleared: bool) -> Self {
        Self {
            album: album.into(),
            discovered,
            cleared,
            ..Self::default()
        }
    }

    /// Fold one item outcome into the totals.
    pub fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Loaded { bytes, .. } => {
                self.loaded += 1;
                self.bytes_written += *bytes as u64;
            }
            ItemOutcome::Skipped { .. } => self.skipped += 1,
            ItemOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Stamp the elapsed time.
    pub fn finish(&mut self, elapsed: Duration) {
        self.total_seconds = elapsed.as_secs_f64();
    }

    /// Items per second over the whole run.
    pub fn rate(&self) -> f64 {
        if self.total_seconds > 0.0 {
            (self.loaded + self.skipped + self.failed) as f64 / self.total_seconds
        } else {
            0.0
        }
    }

    /// True when every discovered file made it into storage.
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.failed == 0
    }
}
