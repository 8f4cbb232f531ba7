//! Resolving playback identifiers to media records.
//!
//! The streamer only needs the [`Resolver`] trait. [`Catalog`] is the
//! in-process implementation: an index of media files keyed by file name,
//! built once at startup and read-only afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Content type served when the extension is not recognised.
pub const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

/// Suffixes of files that are still being written by a downloader.
const PARTIAL_SUFFIXES: &[&str] = &[".part", ".tmp", ".crdownload", ".aria2"];

/// A catalog entry. The file it points to may have disappeared since the
/// entry was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    /// Lookup key, the file name.
    pub name: String,
    /// Absolute or root-relative path to the file.
    pub path: PathBuf,
    /// MIME type sent in `Content-Type`.
    pub content_type: String,
}

impl MediaRecord {
    /// Build a record named after the file, with a content type guessed from
    /// its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        let content_type = content_type_for(&path).to_string();
        Some(Self {
            name,
            path,
            content_type,
        })
    }
}

/// Looks up the media record for a playback identifier.
///
/// Lookups must be deterministic and return at most one record.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve `resource_id`, failing with [`Error::NotFound`] when there is no
    /// record for it.
    async fn resolve(&self, resource_id: &str) -> Result<MediaRecord>;
}

/// Guess the MIME type from a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "ts" => "video/mp2t",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// In-memory media index keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<String, MediaRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every media file under `root`.
    ///
    /// `extensions` are compared lowercase; an empty list accepts every file.
    /// When two files share a name, the first one walked wins.
    pub fn scan(root: &Path, extensions: &[String]) -> Self {
        let mut catalog = Self::new();

        if !root.exists() {
            tracing::warn!(path = %root.display(), "Media root does not exist, catalog is empty");
            return catalog;
        }

        let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();

        for entry in walkdir::WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "Error walking media root");
                    None
                }
            })
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

            if PARTIAL_SUFFIXES.iter().any(|s| file_name.ends_with(s)) {
                continue;
            }

            if !extensions.is_empty() {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_lowercase())
                    .unwrap_or_default();
                if !extensions.contains(&ext) {
                    continue;
                }
            }

            let Some(record) = MediaRecord::from_path(path) else {
                tracing::debug!(path = %path.display(), "Skipping file with non UTF-8 name");
                continue;
            };

            if let Some(existing) = catalog.records.get(&record.name) {
                tracing::warn!(
                    name = %record.name,
                    kept = %existing.path.display(),
                    skipped = %record.path.display(),
                    "Duplicate media file name"
                );
                continue;
            }

            catalog.insert(record);
        }

        tracing::info!(
            path = %root.display(),
            count = catalog.len(),
            "Media catalog built"
        );
        catalog
    }

    /// Add or replace a record.
    pub fn insert(&mut self, record: MediaRecord) {
        self.records.insert(record.name.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in name order.
    pub fn records(&self) -> impl Iterator<Item = &MediaRecord> {
        self.records.values()
    }

    /// Exact name match first, then the first name (in sorted order) that
    /// contains `resource_id`, ignoring case.
    pub fn lookup(&self, resource_id: &str) -> Option<&MediaRecord> {
        if resource_id.is_empty() {
            return None;
        }

        if let Some(record) = self.records.get(resource_id) {
            return Some(record);
        }

        let needle = resource_id.to_lowercase();
        self.records
            .values()
            .find(|r| r.name.to_lowercase().contains(&needle))
    }
}

#[async_trait]
impl Resolver for Catalog {
    async fn resolve(&self, resource_id: &str) -> Result<MediaRecord> {
        self.lookup(resource_id)
            .cloned()
            .ok_or_else(|| Error::not_found("video", resource_id))
    }
}
